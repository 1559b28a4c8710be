#![forbid(unsafe_code)]

pub mod app;
pub mod error;
pub mod generation;
pub mod quiz;
pub mod stats;

pub use campus_core::Clock;

pub use app::{AppContext, ItemDraft, starter_catalog};
pub use error::{AppError, QuizError, QuizGenError};
pub use generation::{QuizGenConfig, QuizGenService, parse_questions};
pub use quiz::{
    AnswerSheet, ItemStatus, QuizAttempt, QuizOutcome, evaluate, is_submittable, item_status,
};
pub use stats::CompletionStats;
