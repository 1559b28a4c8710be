use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user name cannot be empty")]
    EmptyName,

    #[error("user email cannot be empty")]
    EmptyEmail,
}

/// Account role, as asserted at login.
///
/// The role is self-asserted by the login form and never verified; any
/// deployment beyond a single trusted device must authenticate it externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

/// A logged-in account. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDoc")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: Role,
}

#[derive(Deserialize)]
struct UserDoc {
    id: UserId,
    name: String,
    email: String,
    role: Role,
}

impl TryFrom<UserDoc> for User {
    type Error = UserError;

    fn try_from(doc: UserDoc) -> Result<Self, Self::Error> {
        Self::new(doc.id, doc.name, doc.email, doc.role)
    }
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if name or email is empty or whitespace-only.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, UserError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserError::EmptyName);
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            role,
        })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_new_rejects_empty_name() {
        let err = User::new(UserId::new("1"), "  ", "a@b.c", Role::Student).unwrap_err();
        assert_eq!(err, UserError::EmptyName);
    }

    #[test]
    fn user_new_rejects_empty_email() {
        let err = User::new(UserId::new("1"), "Ana", "", Role::Student).unwrap_err();
        assert_eq!(err, UserError::EmptyEmail);
    }

    #[test]
    fn user_new_trims_fields() {
        let user = User::new(UserId::new("1"), " Ana ", " ana@campus.dev ", Role::Admin).unwrap();
        assert_eq!(user.name(), "Ana");
        assert_eq!(user.email(), "ana@campus.dev");
        assert!(user.is_admin());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Student).unwrap(),
            "\"student\""
        );
    }
}
