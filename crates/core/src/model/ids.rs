use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mints a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a User.
    UserId
);
string_id!(
    /// Unique identifier for a Folder.
    FolderId
);
string_id!(
    /// Unique identifier for a ContentItem.
    ItemId
);
string_id!(
    /// Unique identifier for a QuizQuestion.
    QuestionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_display_round_trips() {
        let id = ItemId::new("v1");
        assert_eq!(id.to_string(), "v1");
        assert_eq!(id.as_str(), "v1");
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }

    #[test]
    fn debug_includes_kind() {
        let id = QuestionId::new("q1");
        assert_eq!(format!("{id:?}"), "QuestionId(q1)");
    }
}
