use std::collections::HashMap;

use campus_core::model::{QuestionId, QuizQuestion};

use crate::error::QuizError;

/// Selected option index per question, keyed by question id.
///
/// Partial while answering; entries for unknown question ids are ignored.
pub type AnswerSheet = HashMap<QuestionId, usize>;

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Result of scoring one quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct_count: usize,
    pub total: usize,
    pub passed: bool,
}

/// True iff every question in the quiz has an answer on the sheet.
#[must_use]
pub fn is_submittable(quiz: &[QuizQuestion], answers: &AnswerSheet) -> bool {
    quiz.iter().all(|q| answers.contains_key(q.id()))
}

/// Scores `answers` against `quiz`.
///
/// Passing is all-or-nothing: one wrong (or missing) answer fails the
/// attempt. Pure; recording the completion is the caller's decision, and
/// only on a pass.
#[must_use]
pub fn evaluate(quiz: &[QuizQuestion], answers: &AnswerSheet) -> QuizOutcome {
    let correct_count = quiz
        .iter()
        .filter(|q| answers.get(q.id()) == Some(&q.correct_answer()))
        .count();
    let total = quiz.len();
    QuizOutcome {
        correct_count,
        total,
        passed: correct_count == total,
    }
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// Display state of one content item for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    NotStarted,
    InProgress,
    Failed,
    Completed,
}

/// In-memory answering state for one quiz being taken.
///
/// Holds the partially filled sheet until submission. A failed attempt can be
/// retried indefinitely; retrying clears the sheet and nothing else. Tracked
/// progress and reports only change when a later submission passes.
#[derive(Debug, Clone, Default)]
pub struct QuizAttempt {
    answers: AnswerSheet,
    outcome: Option<QuizOutcome>,
}

impl QuizAttempt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// The outcome of the submitted attempt, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.outcome.is_some()
    }

    /// Selects an option for a question, replacing any earlier choice.
    /// Ignored once the attempt has been submitted.
    pub fn select(&mut self, question_id: QuestionId, option_index: usize) {
        if self.outcome.is_none() {
            self.answers.insert(question_id, option_index);
        }
    }

    /// True iff the sheet answers every question of `quiz`.
    #[must_use]
    pub fn can_submit(&self, quiz: &[QuizQuestion]) -> bool {
        !self.is_submitted() && is_submittable(quiz, &self.answers)
    }

    /// Scores the sheet against `quiz` and locks the attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete` when a question is unanswered, or
    /// `QuizError::AlreadySubmitted` on a second submit.
    pub fn submit(&mut self, quiz: &[QuizQuestion]) -> Result<QuizOutcome, QuizError> {
        if self.is_submitted() {
            return Err(QuizError::AlreadySubmitted);
        }
        if !is_submittable(quiz, &self.answers) {
            return Err(QuizError::Incomplete);
        }
        let outcome = evaluate(quiz, &self.answers);
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    /// Starts over after a failed attempt: clears the sheet and the outcome.
    pub fn retry(&mut self) {
        self.answers.clear();
        self.outcome = None;
    }
}

/// Derives the display status of an item from its completion flag and the
/// current attempt, if one is open.
#[must_use]
pub fn item_status(is_completed: bool, attempt: Option<&QuizAttempt>) -> ItemStatus {
    if is_completed {
        return ItemStatus::Completed;
    }
    match attempt {
        None => ItemStatus::NotStarted,
        Some(attempt) => match attempt.outcome() {
            Some(outcome) if !outcome.passed => ItemStatus::Failed,
            _ => ItemStatus::InProgress,
        },
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
