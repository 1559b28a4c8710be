use std::sync::Arc;

use tracing::warn;

use campus_core::Clock;
use campus_core::model::{
    ContentItem, ContentKind, Folder, FolderId, ItemCompletion, ItemId, Progress, QuestionId,
    QuizQuestion, ReportBook, User, UserId, UserReport,
};
use storage::{DocumentStore, Documents};

use crate::error::{AppError, QuizError};
use crate::generation::QuizGenService;
use crate::quiz::{AnswerSheet, QuizOutcome, evaluate, is_submittable};
use crate::stats::CompletionStats;

//
// ─── ITEM DRAFT ────────────────────────────────────────────────────────────────
//

/// Authoring input for a new content item; the id is minted on creation.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: String,
    pub kind: ContentKind,
    pub url: Option<String>,
    pub description: Option<String>,
    pub quiz: Vec<QuizQuestion>,
}

impl ItemDraft {
    #[must_use]
    pub fn video(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ContentKind::Video,
            url: Some(url.into()),
            description: None,
            quiz: Vec::new(),
        }
    }

    #[must_use]
    pub fn exercise(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ContentKind::Exercise,
            url: None,
            description: None,
            quiz: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a quiz, typically the output of the generation service;
    /// `None` (generation failed or skipped) leaves the item quiz-less.
    #[must_use]
    pub fn with_quiz(mut self, quiz: Option<Vec<QuizQuestion>>) -> Self {
        self.quiz = quiz.unwrap_or_default();
        self
    }
}

//
// ─── APP CONTEXT ───────────────────────────────────────────────────────────────
//

/// Root owner of all application state.
///
/// Holds the current user, the folder catalog, the session completion set and
/// the report book; every mutation is followed by a whole-document save
/// (last-writer-wins). Save failures are logged and never surfaced: a reload
/// simply resumes from the last snapshot that made it to the store.
pub struct AppContext {
    documents: Documents,
    clock: Clock,
    user: Option<User>,
    folders: Vec<Folder>,
    progress: Progress,
    reports: ReportBook,
}

impl AppContext {
    /// Hydrates the context from the store, substituting defaults for absent
    /// or malformed documents. A first run (no folder catalog stored) seeds
    /// the starter catalog and persists it.
    #[must_use]
    pub fn load(store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        let documents = Documents::new(store);
        let user = documents.load_user();
        let folders = match documents.load_folders() {
            Some(folders) => folders,
            None => {
                let seeded = starter_catalog();
                if let Err(err) = documents.save_folders(&seeded) {
                    warn!(%err, "failed to persist starter catalog");
                }
                seeded
            }
        };
        let progress = documents.load_progress();
        let reports = documents.load_reports();

        Self {
            documents,
            clock,
            user,
            folders,
            progress,
            reports,
        }
    }

    // ── session ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Starts a session for `user`: the report book learns about them, the
    /// session progress is re-pointed at their id, and everything is saved.
    pub fn login(&mut self, user: User) {
        self.reports.ensure_user(&user);
        self.progress.assign_user(user.id().clone());

        if let Err(err) = self.documents.save_user(&user) {
            warn!(%err, "failed to persist current user");
        }
        self.persist_progress();
        self.persist_reports();

        self.user = Some(user);
    }

    /// Ends the session. Progress and reports stay in the store.
    pub fn logout(&mut self) {
        self.user = None;
        if let Err(err) = self.documents.clear_user() {
            warn!(%err, "failed to clear persisted user");
        }
    }

    // ── catalog ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    #[must_use]
    pub fn folder(&self, folder_id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id() == folder_id)
    }

    /// Finds an item anywhere in the catalog, with its folder.
    #[must_use]
    pub fn find_item(&self, item_id: &ItemId) -> Option<(&Folder, &ContentItem)> {
        self.folders
            .iter()
            .find_map(|f| f.item(item_id).map(|i| (f, i)))
    }

    /// Creates an empty folder. Administrator authoring action.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Content` if the name is empty; nothing is mutated.
    pub fn add_folder(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<FolderId, AppError> {
        let id = FolderId::generate();
        let folder = Folder::new(id.clone(), name, description, Vec::new())?;
        self.folders.push(folder);
        self.persist_folders();
        Ok(id)
    }

    /// Creates a content item inside a folder. Administrator authoring
    /// action; the quiz (if any) comes attached on the draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FolderNotFound` for an unknown folder and
    /// `AppError::Content` for invalid drafts; nothing is mutated on error.
    pub fn add_item(
        &mut self,
        folder_id: &FolderId,
        draft: ItemDraft,
    ) -> Result<ItemId, AppError> {
        let idx = self
            .folders
            .iter()
            .position(|f| f.id() == folder_id)
            .ok_or_else(|| AppError::FolderNotFound(folder_id.clone()))?;

        let id = ItemId::generate();
        let item = ContentItem::new(
            id.clone(),
            draft.title,
            draft.kind,
            draft.url,
            draft.description,
            draft.quiz,
        )?;
        self.folders[idx].push_item(item);
        self.persist_folders();
        Ok(id)
    }

    /// Authors an item the way the admin form does: video drafts without a
    /// quiz first ask the generation service for one, and a failed or
    /// disabled service silently leaves the item quiz-less. This is the only
    /// operation that waits on the network.
    ///
    /// # Errors
    ///
    /// Same as [`AppContext::add_item`]; generation failures are not errors.
    pub async fn author_item(
        &mut self,
        folder_id: &FolderId,
        draft: ItemDraft,
        generator: &QuizGenService,
    ) -> Result<ItemId, AppError> {
        let draft = if draft.kind == ContentKind::Video && draft.quiz.is_empty() {
            let description = draft
                .description
                .clone()
                .unwrap_or_else(|| "educational content".to_owned());
            let quiz = generator.generate_or_none(&draft.title, &description).await;
            draft.with_quiz(quiz)
        } else {
            draft
        };
        self.add_item(folder_id, draft)
    }

    // ── completion ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn is_completed(&self, item_id: &ItemId) -> bool {
        self.progress.is_completed(item_id)
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Completes a quiz-less item after its primary interaction (video fully
    /// viewed, or an exercise acknowledged). No score is recorded.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn`, `AppError::ItemNotFound`, or
    /// `AppError::QuizRequired` when the item has a quiz to pass instead.
    pub fn complete_without_quiz(&mut self, item_id: &ItemId) -> Result<(), AppError> {
        let user_id = self.session_user_id()?;
        let (folder, item) = self
            .find_item(item_id)
            .ok_or_else(|| AppError::ItemNotFound(item_id.clone()))?;
        if item.has_quiz() {
            return Err(AppError::QuizRequired(item_id.clone()));
        }

        let item_title = item.title().to_owned();
        let folder_name = folder.name().to_owned();
        self.record_completion(&user_id, item_id, item_title, folder_name, None, None);
        Ok(())
    }

    /// Evaluates a quiz submission for an item.
    ///
    /// On a pass the item is marked completed and the score lands in the
    /// user's report; on a fail nothing changes and the caller may retry with
    /// a fresh sheet. Returns the outcome either way.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn`, `AppError::ItemNotFound`,
    /// `AppError::NoQuiz` for quiz-less items, or `AppError::Quiz` when a
    /// question is still unanswered.
    pub fn submit_quiz(
        &mut self,
        item_id: &ItemId,
        answers: &AnswerSheet,
    ) -> Result<QuizOutcome, AppError> {
        let user_id = self.session_user_id()?;
        let (folder, item) = self
            .find_item(item_id)
            .ok_or_else(|| AppError::ItemNotFound(item_id.clone()))?;
        if !item.has_quiz() {
            return Err(AppError::NoQuiz(item_id.clone()));
        }
        if !is_submittable(item.quiz(), answers) {
            return Err(AppError::Quiz(QuizError::Incomplete));
        }

        let outcome = evaluate(item.quiz(), answers);
        if outcome.passed {
            let item_title = item.title().to_owned();
            let folder_name = folder.name().to_owned();
            #[allow(clippy::cast_possible_truncation)]
            let (score, max_score) = (outcome.correct_count as u32, outcome.total as u32);
            self.record_completion(
                &user_id,
                item_id,
                item_title,
                folder_name,
                Some(score),
                Some(max_score),
            );
        }
        Ok(outcome)
    }

    // ── statistics & reports ───────────────────────────────────────────────

    #[must_use]
    pub fn folder_stats(&self, folder_id: &FolderId) -> Option<CompletionStats> {
        self.folder(folder_id)
            .map(|f| CompletionStats::for_folder(f, &self.progress))
    }

    #[must_use]
    pub fn global_stats(&self) -> CompletionStats {
        CompletionStats::across(&self.folders, &self.progress)
    }

    #[must_use]
    pub fn reports(&self) -> &ReportBook {
        &self.reports
    }

    #[must_use]
    pub fn report_for(&self, user_id: &UserId) -> Option<&UserReport> {
        self.reports.get(user_id)
    }

    /// Reports whose user name or email contains `query` (case-insensitive),
    /// in first-observed order.
    #[must_use]
    pub fn search_reports(&self, query: &str) -> Vec<&UserReport> {
        self.reports.search(query)
    }

    // ── internals ──────────────────────────────────────────────────────────

    fn session_user_id(&self) -> Result<UserId, AppError> {
        self.user
            .as_ref()
            .map(|u| u.id().clone())
            .ok_or(AppError::NotLoggedIn)
    }

    /// Marks the item completed and reconciles the user's report in the same
    /// step, then saves both documents.
    fn record_completion(
        &mut self,
        user_id: &UserId,
        item_id: &ItemId,
        item_title: String,
        folder_name: String,
        score: Option<u32>,
        max_score: Option<u32>,
    ) {
        self.progress.mark_completed(item_id.clone());

        let entry = ItemCompletion::new(
            item_id.clone(),
            item_title,
            folder_name,
            score,
            max_score,
            self.clock.completion_stamp(),
        );
        if !self.reports.record(user_id, entry) {
            warn!(user = %user_id, "completion recorded for a user the report book never saw");
        }

        self.persist_progress();
        self.persist_reports();
    }

    fn persist_folders(&self) {
        if let Err(err) = self.documents.save_folders(&self.folders) {
            warn!(%err, "failed to persist folder catalog");
        }
    }

    fn persist_progress(&self) {
        if let Err(err) = self.documents.save_progress(&self.progress) {
            warn!(%err, "failed to persist session progress");
        }
    }

    fn persist_reports(&self) {
        if let Err(err) = self.documents.save_reports(&self.reports) {
            warn!(%err, "failed to persist reports");
        }
    }
}

/// The catalog a fresh install starts with: one folder holding a welcome
/// video with a single-question quiz.
#[must_use]
pub fn starter_catalog() -> Vec<Folder> {
    let quiz = QuizQuestion::new(
        QuestionId::new("q1"),
        "What should you do after watching each video?",
        vec![
            "Skip ahead".into(),
            "Take the quiz".into(),
            "Close the app".into(),
            "Watch it again".into(),
        ],
        1,
    )
    .expect("starter quiz is well-formed");

    let welcome = ContentItem::new(
        ItemId::new("v1"),
        "Welcome",
        ContentKind::Video,
        Some("https://www.w3schools.com/html/mov_bbb.mp4".into()),
        Some("A short introduction.".into()),
        vec![quiz],
    )
    .expect("starter item is well-formed");

    vec![
        Folder::new(
            FolderId::new("1"),
            "Getting Started",
            "What this space is and how to use it.",
            vec![welcome],
        )
        .expect("starter folder is well-formed"),
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
