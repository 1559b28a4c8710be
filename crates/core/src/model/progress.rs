use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ids::{ItemId, UserId};

/// Completed-item record for the current session's user.
///
/// The single source of truth for "is this item done". Membership is
/// idempotent and monotonic within a session: items are only ever added, and
/// adding an already-present id is a no-op. Ids are not checked against the
/// catalog here; a dangling id simply never matches a live item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    user_id: UserId,
    completed_items: BTreeSet<ItemId>,
}

impl Progress {
    /// Creates an empty progress record for the given user.
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            completed_items: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Re-points the record at a newly logged-in user.
    ///
    /// The completed set is kept: this mirrors single-device usage where the
    /// stored snapshot belongs to whoever logs in next.
    pub fn assign_user(&mut self, user_id: UserId) {
        self.user_id = user_id;
    }

    #[must_use]
    pub fn is_completed(&self, item_id: &ItemId) -> bool {
        self.completed_items.contains(item_id)
    }

    /// Marks an item completed. Returns `true` if it was newly added.
    pub fn mark_completed(&mut self, item_id: ItemId) -> bool {
        self.completed_items.insert(item_id)
    }

    /// Number of completed items overall, dangling ids included.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_items.len()
    }

    /// Number of completed items among the given ids.
    #[must_use]
    pub fn completed_count_within<'a, I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a ItemId>,
    {
        ids.into_iter().filter(|id| self.is_completed(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_completed_is_idempotent() {
        let mut progress = Progress::for_user(UserId::new("u1"));
        assert!(progress.mark_completed(ItemId::new("v1")));
        assert!(!progress.mark_completed(ItemId::new("v1")));
        assert_eq!(progress.completed_count(), 1);
        assert!(progress.is_completed(&ItemId::new("v1")));
    }

    #[test]
    fn completed_count_within_ignores_foreign_ids() {
        let mut progress = Progress::for_user(UserId::new("u1"));
        progress.mark_completed(ItemId::new("v1"));
        progress.mark_completed(ItemId::new("gone"));

        let folder_ids = [ItemId::new("v1"), ItemId::new("v2")];
        assert_eq!(progress.completed_count_within(folder_ids.iter()), 1);
    }

    #[test]
    fn assign_user_keeps_completed_set() {
        let mut progress = Progress::for_user(UserId::new("u1"));
        progress.mark_completed(ItemId::new("v1"));
        progress.assign_user(UserId::new("u2"));
        assert_eq!(progress.user_id(), &UserId::new("u2"));
        assert!(progress.is_completed(&ItemId::new("v1")));
    }

    #[test]
    fn default_progress_is_empty() {
        let progress = Progress::default();
        assert_eq!(progress.completed_count(), 0);
        assert!(!progress.is_completed(&ItemId::new("v1")));
    }
}
