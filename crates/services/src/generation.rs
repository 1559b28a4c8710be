use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use campus_core::model::{QuestionId, QuizQuestion};

use crate::error::QuizGenError;

/// Generated questions carry 2 to 4 options.
const MAX_OPTIONS: usize = 4;

#[derive(Clone, Debug)]
pub struct QuizGenConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl QuizGenConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("CAMPUS_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("CAMPUS_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("CAMPUS_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Client for the quiz-generation collaborator.
///
/// Consumed only by the authoring flow: given a title and description it
/// returns a short multiple-choice quiz. Failure never blocks authoring;
/// the item is simply created without a quiz.
#[derive(Clone)]
pub struct QuizGenService {
    client: Client,
    config: Option<QuizGenConfig>,
}

impl QuizGenService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(QuizGenConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<QuizGenConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Generates a quiz for a content item.
    ///
    /// # Errors
    ///
    /// Returns `QuizGenError` when the service is disabled, the request
    /// fails, or the response is not a usable quiz.
    pub async fn generate(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Vec<QuizQuestion>, QuizGenError> {
        let config = self.config.as_ref().ok_or(QuizGenError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let prompt = format!(
            "Write a 3-question multiple-choice quiz for an educational item \
             titled \"{title}\" described as \"{description}\". Respond with a \
             JSON array only; each element has \"question\", \"options\" (2 to \
             4 strings) and \"correctAnswer\" (zero-based index)."
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuizGenError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(QuizGenError::EmptyResponse)?;

        parse_questions(&content)
    }

    /// Generation with silent degradation: any failure is logged and comes
    /// back as `None`, leaving the new item quiz-less.
    pub async fn generate_or_none(
        &self,
        title: &str,
        description: &str,
    ) -> Option<Vec<QuizQuestion>> {
        match self.generate(title, description).await {
            Ok(questions) => Some(questions),
            Err(err) => {
                warn!(title, %err, "quiz generation failed, creating item without quiz");
                None
            }
        }
    }
}

/// Validates a raw JSON array of generated questions into domain questions,
/// minting fresh question ids.
///
/// # Errors
///
/// Returns `QuizGenError::Malformed` when the payload is not a non-empty
/// array of well-formed questions (2–4 options, in-range answer index).
pub fn parse_questions(raw: &str) -> Result<Vec<QuizQuestion>, QuizGenError> {
    let drafts: Vec<GeneratedQuestion> =
        serde_json::from_str(raw.trim()).map_err(|e| QuizGenError::Malformed(e.to_string()))?;
    if drafts.is_empty() {
        return Err(QuizGenError::Malformed("empty question list".into()));
    }

    drafts
        .into_iter()
        .map(|draft| {
            if draft.options.len() > MAX_OPTIONS {
                return Err(QuizGenError::Malformed(format!(
                    "too many options: {}",
                    draft.options.len()
                )));
            }
            QuizQuestion::new(
                QuestionId::generate(),
                draft.question,
                draft.options,
                draft.correct_answer,
            )
            .map_err(|e| QuizGenError::Malformed(e.to_string()))
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// Wire shape of one generated question.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_payload() {
        let raw = r#"[
            {"question": "Largest planet?", "options": ["Mars", "Jupiter", "Venus"], "correctAnswer": 1},
            {"question": "2 + 2?", "options": ["3", "4"], "correctAnswer": 1}
        ]"#;
        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question(), "Largest planet?");
        assert_eq!(questions[0].correct_answer(), 1);
        assert_eq!(questions[1].options().len(), 2);
    }

    #[test]
    fn rejects_out_of_range_answer_index() {
        let raw = r#"[{"question": "Q?", "options": ["A", "B"], "correctAnswer": 5}]"#;
        assert!(matches!(
            parse_questions(raw).unwrap_err(),
            QuizGenError::Malformed(_)
        ));
    }

    #[test]
    fn rejects_too_many_or_too_few_options() {
        let five = r#"[{"question": "Q?", "options": ["A","B","C","D","E"], "correctAnswer": 0}]"#;
        assert!(matches!(
            parse_questions(five).unwrap_err(),
            QuizGenError::Malformed(_)
        ));

        let one = r#"[{"question": "Q?", "options": ["A"], "correctAnswer": 0}]"#;
        assert!(matches!(
            parse_questions(one).unwrap_err(),
            QuizGenError::Malformed(_)
        ));
    }

    #[test]
    fn rejects_non_array_and_empty_payloads() {
        assert!(matches!(
            parse_questions("{\"oops\": true}").unwrap_err(),
            QuizGenError::Malformed(_)
        ));
        assert!(matches!(
            parse_questions("[]").unwrap_err(),
            QuizGenError::Malformed(_)
        ));
    }

    #[tokio::test]
    async fn disabled_service_degrades_to_none() {
        let service = QuizGenService::new(None);
        assert!(!service.enabled());
        assert!(matches!(
            service.generate("Title", "Desc").await.unwrap_err(),
            QuizGenError::Disabled
        ));
        assert_eq!(service.generate_or_none("Title", "Desc").await, None);
    }
}
