use serde::{Deserialize, Serialize};

use crate::model::ids::{ItemId, UserId};
use crate::model::user::User;

//
// ─── ITEM COMPLETION ───────────────────────────────────────────────────────────
//

/// One completed activity in a user's history.
///
/// Item and folder names are captured at completion time, so the history
/// stays readable even if the catalog entry is later edited or removed.
/// `score`/`max_score` are absent for quiz-less completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCompletion {
    item_id: ItemId,
    item_title: String,
    folder_name: String,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_score: Option<u32>,
    completed_at: String,
}

impl ItemCompletion {
    /// Builds a completion snapshot.
    ///
    /// `completed_at` is a preformatted display timestamp; it is stored as an
    /// opaque string and never parsed back.
    #[must_use]
    pub fn new(
        item_id: ItemId,
        item_title: impl Into<String>,
        folder_name: impl Into<String>,
        score: Option<u32>,
        max_score: Option<u32>,
        completed_at: impl Into<String>,
    ) -> Self {
        Self {
            item_id,
            item_title: item_title.into(),
            folder_name: folder_name.into(),
            completed: true,
            score,
            max_score,
            completed_at: completed_at.into(),
        }
    }

    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    #[must_use]
    pub fn item_title(&self) -> &str {
        &self.item_title
    }

    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> Option<u32> {
        self.max_score
    }

    #[must_use]
    pub fn completed_at(&self) -> &str {
        &self.completed_at
    }
}

//
// ─── USER REPORT ───────────────────────────────────────────────────────────────
//

/// Whether a user has any recorded activity. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Active,
    Inactive,
}

/// Completion history for one user, as shown to administrators.
///
/// Holds at most one entry per item id: re-completing an item replaces the
/// existing entry in place, keeping its original list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReport {
    user_id: UserId,
    user_name: String,
    user_email: String,
    progress: Vec<ItemCompletion>,
}

impl UserReport {
    /// Creates an empty report for a newly observed user.
    #[must_use]
    pub fn new(user_id: UserId, user_name: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            user_email: user_email.into(),
            progress: Vec::new(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    /// Completion history in recorded order.
    #[must_use]
    pub fn progress(&self) -> &[ItemCompletion] {
        &self.progress
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.progress.len()
    }

    #[must_use]
    pub fn status(&self) -> ActivityStatus {
        if self.progress.is_empty() {
            ActivityStatus::Inactive
        } else {
            ActivityStatus::Active
        }
    }

    /// Records a completion, replacing any existing entry for the same item
    /// in place rather than appending a duplicate.
    pub fn upsert(&mut self, entry: ItemCompletion) {
        match self
            .progress
            .iter()
            .position(|p| p.item_id() == entry.item_id())
        {
            Some(idx) => self.progress[idx] = entry,
            None => self.progress.push(entry),
        }
    }

    /// Case-insensitive substring match over name or email.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.user_name.to_lowercase().contains(&query)
            || self.user_email.to_lowercase().contains(&query)
    }
}

//
// ─── REPORT BOOK ───────────────────────────────────────────────────────────────
//

/// All user reports, in first-observed order.
///
/// The only place with cross-user visibility; the rest of the system sees a
/// single session user at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportBook {
    reports: Vec<UserReport>,
}

impl ReportBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty report on first observation of a user.
    ///
    /// Idempotent: if a report already exists for the user id, it is left
    /// untouched, history included, even when the asserted name or email
    /// differ from a previous session.
    pub fn ensure_user(&mut self, user: &User) {
        if self.get(user.id()).is_some() {
            return;
        }
        self.reports
            .push(UserReport::new(user.id().clone(), user.name(), user.email()));
    }

    /// Records a completion for a known user.
    ///
    /// Returns `false` (and records nothing) when the user was never
    /// observed; callers are expected to `ensure_user` at login.
    pub fn record(&mut self, user_id: &UserId, entry: ItemCompletion) -> bool {
        match self.reports.iter_mut().find(|r| r.user_id() == user_id) {
            Some(report) => {
                report.upsert(entry);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, user_id: &UserId) -> Option<&UserReport> {
        self.reports.iter().find(|r| r.user_id() == user_id)
    }

    /// All reports in first-observed order.
    #[must_use]
    pub fn reports(&self) -> &[UserReport] {
        &self.reports
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Reports whose user name or email contains `query`, case-insensitively,
    /// in first-observed order. An empty query matches everyone.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&UserReport> {
        self.reports
            .iter()
            .filter(|r| r.matches_query(query))
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::Role;

    fn student(id: &str, name: &str, email: &str) -> User {
        User::new(UserId::new(id), name, email, Role::Student).unwrap()
    }

    fn entry(item: &str, score: Option<u32>, max: Option<u32>) -> ItemCompletion {
        ItemCompletion::new(
            ItemId::new(item),
            format!("Title {item}"),
            "Intro",
            score,
            max,
            "14/11/2023 22:13:20",
        )
    }

    #[test]
    fn ensure_user_is_idempotent_and_keeps_history() {
        let mut book = ReportBook::new();
        let ana = student("u1", "Ana", "ana@campus.dev");
        book.ensure_user(&ana);
        assert!(book.record(&UserId::new("u1"), entry("v1", Some(1), Some(1))));

        // Re-login with a different asserted name must not reset anything.
        let renamed = student("u1", "Ana Maria", "other@campus.dev");
        book.ensure_user(&renamed);

        assert_eq!(book.len(), 1);
        let report = book.get(&UserId::new("u1")).unwrap();
        assert_eq!(report.user_name(), "Ana");
        assert_eq!(report.completed_count(), 1);
    }

    #[test]
    fn record_without_ensure_is_a_no_op() {
        let mut book = ReportBook::new();
        assert!(!book.record(&UserId::new("ghost"), entry("v1", None, None)));
        assert!(book.is_empty());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut book = ReportBook::new();
        book.ensure_user(&student("u1", "Ana", "ana@campus.dev"));

        book.record(&UserId::new("u1"), entry("v1", Some(1), Some(2)));
        book.record(&UserId::new("u1"), entry("v2", None, None));
        // Re-pass v1 with a better score: replaced, not appended.
        book.record(&UserId::new("u1"), entry("v1", Some(2), Some(2)));

        let report = book.get(&UserId::new("u1")).unwrap();
        assert_eq!(report.completed_count(), 2);
        assert_eq!(report.progress()[0].item_id(), &ItemId::new("v1"));
        assert_eq!(report.progress()[0].score(), Some(2));
        assert_eq!(report.progress()[1].item_id(), &ItemId::new("v2"));
    }

    #[test]
    fn status_is_derived_from_history() {
        let mut book = ReportBook::new();
        book.ensure_user(&student("u1", "Ana", "ana@campus.dev"));
        assert_eq!(
            book.get(&UserId::new("u1")).unwrap().status(),
            ActivityStatus::Inactive
        );

        book.record(&UserId::new("u1"), entry("v1", None, None));
        assert_eq!(
            book.get(&UserId::new("u1")).unwrap().status(),
            ActivityStatus::Active
        );
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let mut book = ReportBook::new();
        book.ensure_user(&student("u1", "Ana Silva", "ana@campus.dev"));
        book.ensure_user(&student("u2", "Bruno", "bruno@else.where"));

        let by_name = book.search("silva");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].user_name(), "Ana Silva");

        let by_email = book.search("ELSE.WHERE");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].user_name(), "Bruno");

        assert_eq!(book.search("").len(), 2);
        assert_eq!(book.search("nobody").len(), 0);
    }

    #[test]
    fn reports_keep_first_observed_order() {
        let mut book = ReportBook::new();
        book.ensure_user(&student("u2", "Bruno", "b@x.y"));
        book.ensure_user(&student("u1", "Ana", "a@x.y"));
        book.ensure_user(&student("u2", "Bruno", "b@x.y"));

        let order: Vec<_> = book.reports().iter().map(|r| r.user_id().as_str()).collect();
        assert_eq!(order, ["u2", "u1"]);
    }

    #[test]
    fn scoreless_entry_serializes_without_score_keys() {
        let json = serde_json::to_value(entry("v1", None, None)).unwrap();
        assert!(json.get("score").is_none());
        assert!(json.get("maxScore").is_none());
        assert_eq!(json["completed"], true);
    }
}
