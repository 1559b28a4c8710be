use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::{FolderId, ItemId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("quiz question text cannot be empty")]
    EmptyQuestion,

    #[error("quiz question needs at least 2 options, got {0}")]
    TooFewOptions(usize),

    #[error("correct answer index {index} is out of range for {options} options")]
    AnswerOutOfRange { index: usize, options: usize },

    #[error("content title cannot be empty")]
    EmptyTitle,

    #[error("video items require a url")]
    MissingVideoUrl,

    #[error("invalid video url: {0}")]
    InvalidVideoUrl(String),

    #[error("folder name cannot be empty")]
    EmptyFolderName,
}

//
// ─── QUIZ QUESTION ─────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Deserialization runs through [`QuizQuestion::new`], so a stored document
/// with a broken answer key is rejected as malformed instead of admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuizQuestionDoc")]
pub struct QuizQuestion {
    id: QuestionId,
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizQuestionDoc {
    id: QuestionId,
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl TryFrom<QuizQuestionDoc> for QuizQuestion {
    type Error = ContentError;

    fn try_from(doc: QuizQuestionDoc) -> Result<Self, Self::Error> {
        Self::new(doc.id, doc.question, doc.options, doc.correct_answer)
    }
}

impl QuizQuestion {
    /// Creates a question, enforcing that the answer key points into `options`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the text is empty, fewer than two options are
    /// given, or `correct_answer` is not a valid option index.
    pub fn new(
        id: QuestionId,
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, ContentError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(ContentError::EmptyQuestion);
        }
        if options.len() < 2 {
            return Err(ContentError::TooFewOptions(options.len()));
        }
        if correct_answer >= options.len() {
            return Err(ContentError::AnswerOutOfRange {
                index: correct_answer,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            question: question.trim().to_owned(),
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Zero-based index of the correct option.
    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }
}

//
// ─── CONTENT ITEM ──────────────────────────────────────────────────────────────
//

/// The kind of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Exercise,
}

/// A video or exercise inside a folder, optionally paired with a quiz.
///
/// Items are created by administrator authoring and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ContentItemDoc")]
pub struct ContentItem {
    id: ItemId,
    title: String,
    #[serde(rename = "type")]
    kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    quiz: Vec<QuizQuestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentItemDoc {
    id: ItemId,
    title: String,
    #[serde(rename = "type")]
    kind: ContentKind,
    url: Option<String>,
    description: Option<String>,
    #[serde(default)]
    quiz: Vec<QuizQuestion>,
}

impl TryFrom<ContentItemDoc> for ContentItem {
    type Error = ContentError;

    fn try_from(doc: ContentItemDoc) -> Result<Self, Self::Error> {
        Self::new(
            doc.id,
            doc.title,
            doc.kind,
            doc.url,
            doc.description,
            doc.quiz,
        )
    }
}

impl ContentItem {
    /// Creates a content item.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the title is empty, or the item is a video
    /// without a parseable url.
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        kind: ContentKind,
        url: Option<String>,
        description: Option<String>,
        quiz: Vec<QuizQuestion>,
    ) -> Result<Self, ContentError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ContentError::EmptyTitle);
        }

        let url = match (kind, url) {
            (ContentKind::Video, None) => return Err(ContentError::MissingVideoUrl),
            (ContentKind::Video, Some(raw)) => {
                Url::parse(&raw).map_err(|_| ContentError::InvalidVideoUrl(raw.clone()))?;
                Some(raw)
            }
            (ContentKind::Exercise, url) => url,
        };

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            kind,
            url,
            description,
            quiz,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The attached quiz, in authored order. Empty means no quiz.
    #[must_use]
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.quiz.is_empty()
    }
}

//
// ─── FOLDER ────────────────────────────────────────────────────────────────────
//

/// A named grouping of content items; the unit of curriculum organization.
///
/// Item order is display order, not priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FolderDoc")]
pub struct Folder {
    id: FolderId,
    name: String,
    description: String,
    items: Vec<ContentItem>,
}

#[derive(Deserialize)]
struct FolderDoc {
    id: FolderId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    items: Vec<ContentItem>,
}

impl TryFrom<FolderDoc> for Folder {
    type Error = ContentError;

    fn try_from(doc: FolderDoc) -> Result<Self, Self::Error> {
        Self::new(doc.id, doc.name, doc.description, doc.items)
    }
}

impl Folder {
    /// Creates a folder.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::EmptyFolderName` if the name is empty.
    pub fn new(
        id: FolderId,
        name: impl Into<String>,
        description: impl Into<String>,
        items: Vec<ContentItem>,
    ) -> Result<Self, ContentError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ContentError::EmptyFolderName);
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            description: description.into().trim().to_owned(),
            items,
        })
    }

    #[must_use]
    pub fn id(&self) -> &FolderId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains_item(&self, id: &ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Appends an item at the end of the display order.
    pub fn push_item(&mut self, item: ContentItem) {
        self.items.push(item);
    }

    #[must_use]
    pub fn video_count(&self) -> usize {
        self.count_of(ContentKind::Video)
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.count_of(ContentKind::Exercise)
    }

    fn count_of(&self, kind: ContentKind) -> usize {
        self.items.iter().filter(|i| i.kind() == kind).count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
