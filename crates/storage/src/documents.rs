use std::sync::Arc;

use campus_core::model::{Folder, Progress, ReportBook, User};

use crate::gateway::{DocumentStore, StorageError, load_optional, load_or_default, save_doc};

/// Logical document keys, one per persisted collection.
pub mod keys {
    /// The currently logged-in user.
    pub const USER: &str = "campus_user";
    /// The folder catalog.
    pub const FOLDERS: &str = "campus_folders";
    /// The current session's completion set.
    pub const PROGRESS: &str = "campus_progress";
    /// All user reports.
    pub const REPORTS: &str = "campus_reports";
}

/// Typed access to the application's persisted documents.
///
/// Loads never fail: absent or malformed documents come back as defaults
/// (`None` for the current user). Saves report backend errors so callers can
/// decide whether to log or surface them.
#[derive(Clone)]
pub struct Documents {
    store: Arc<dyn DocumentStore>,
}

impl Documents {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn load_user(&self) -> Option<User> {
        load_optional(self.store.as_ref(), keys::USER)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    pub fn save_user(&self, user: &User) -> Result<(), StorageError> {
        save_doc(self.store.as_ref(), keys::USER, user)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be removed.
    pub fn clear_user(&self) -> Result<(), StorageError> {
        self.store.remove(keys::USER)
    }

    /// Loads the folder catalog. `None` when the document is absent or
    /// malformed, so callers can substitute their built-in starter catalog.
    #[must_use]
    pub fn load_folders(&self) -> Option<Vec<Folder>> {
        load_optional(self.store.as_ref(), keys::FOLDERS)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    pub fn save_folders(&self, folders: &[Folder]) -> Result<(), StorageError> {
        save_doc(self.store.as_ref(), keys::FOLDERS, &folders)
    }

    #[must_use]
    pub fn load_progress(&self) -> Progress {
        load_or_default(self.store.as_ref(), keys::PROGRESS)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    pub fn save_progress(&self, progress: &Progress) -> Result<(), StorageError> {
        save_doc(self.store.as_ref(), keys::PROGRESS, progress)
    }

    #[must_use]
    pub fn load_reports(&self) -> ReportBook {
        load_or_default(self.store.as_ref(), keys::REPORTS)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    pub fn save_reports(&self, reports: &ReportBook) -> Result<(), StorageError> {
        save_doc(self.store.as_ref(), keys::REPORTS, reports)
    }
}
