use campus_core::model::{Folder, Progress};

/// Completed-vs-total counts for a folder or the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
}

impl CompletionStats {
    /// Counts completion inside a single folder.
    #[must_use]
    pub fn for_folder(folder: &Folder, progress: &Progress) -> Self {
        Self {
            completed: progress.completed_count_within(folder.items().iter().map(|i| i.id())),
            total: folder.items().len(),
        }
    }

    /// Counts completion across every folder in the catalog.
    #[must_use]
    pub fn across(folders: &[Folder], progress: &Progress) -> Self {
        Self {
            completed: progress
                .completed_count_within(folders.iter().flat_map(|f| f.items()).map(|i| i.id())),
            total: folders.iter().map(|f| f.items().len()).sum(),
        }
    }

    /// Completion percentage rounded to the nearest integer; 0 when there is
    /// nothing to complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u32
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::model::{ContentItem, ContentKind, FolderId, ItemId, UserId};

    fn item(id: &str) -> ContentItem {
        ContentItem::new(
            ItemId::new(id),
            format!("Item {id}"),
            ContentKind::Exercise,
            None,
            None,
            Vec::new(),
        )
        .unwrap()
    }

    fn folder(id: &str, item_ids: &[&str]) -> Folder {
        Folder::new(
            FolderId::new(id),
            format!("Folder {id}"),
            "",
            item_ids.iter().map(|i| item(i)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn percent_of_empty_set_is_zero() {
        let stats = CompletionStats {
            completed: 0,
            total: 0,
        };
        assert_eq!(stats.percent(), 0);
        assert!(!stats.is_complete());
    }

    #[test]
    fn percent_rounds_to_nearest_integer() {
        assert_eq!(
            CompletionStats {
                completed: 2,
                total: 4
            }
            .percent(),
            50
        );
        assert_eq!(
            CompletionStats {
                completed: 3,
                total: 3
            }
            .percent(),
            100
        );
        assert_eq!(
            CompletionStats {
                completed: 1,
                total: 3
            }
            .percent(),
            33
        );
        assert_eq!(
            CompletionStats {
                completed: 2,
                total: 3
            }
            .percent(),
            67
        );
    }

    #[test]
    fn folder_stats_count_only_that_folder() {
        let mut progress = Progress::for_user(UserId::new("u1"));
        progress.mark_completed(ItemId::new("a1"));
        progress.mark_completed(ItemId::new("b1"));

        let folder_a = folder("a", &["a1", "a2"]);
        let stats = CompletionStats::for_folder(&folder_a, &progress);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.percent(), 50);
        assert_eq!(stats.remaining(), 1);
    }

    #[test]
    fn global_stats_span_all_folders_and_skip_dangling_ids() {
        let mut progress = Progress::for_user(UserId::new("u1"));
        progress.mark_completed(ItemId::new("a1"));
        progress.mark_completed(ItemId::new("deleted-item"));

        let catalog = vec![folder("a", &["a1", "a2"]), folder("b", &["b1"])];
        let stats = CompletionStats::across(&catalog, &progress);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.percent(), 33);
    }

    #[test]
    fn fully_completed_folder_reports_complete() {
        let mut progress = Progress::for_user(UserId::new("u1"));
        progress.mark_completed(ItemId::new("a1"));

        let stats = CompletionStats::for_folder(&folder("a", &["a1"]), &progress);
        assert!(stats.is_complete());
        assert_eq!(stats.percent(), 100);
    }
}
