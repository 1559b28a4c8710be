//! Shared error types for the services crate.

use thiserror::Error;

use campus_core::model::{ContentError, FolderId, ItemId};

/// Errors emitted by `QuizGenService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizGenError {
    #[error("quiz generation is not configured")]
    Disabled,
    #[error("quiz generation returned an empty response")]
    EmptyResponse,
    #[error("quiz generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("quiz generation returned a malformed quiz: {0}")]
    Malformed(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by quiz attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("not every question has been answered")]
    Incomplete,
    #[error("attempt was already submitted")]
    AlreadySubmitted,
}

/// Errors emitted by the application context.
///
/// Every failure here leaves the application state unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("no user is logged in")]
    NotLoggedIn,
    #[error("folder {0} not found")]
    FolderNotFound(FolderId),
    #[error("content item {0} not found")]
    ItemNotFound(ItemId),
    #[error("item {0} has a quiz; completion requires passing it")]
    QuizRequired(ItemId),
    #[error("item {0} has no quiz to submit")]
    NoQuiz(ItemId),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Content(#[from] ContentError),
}
