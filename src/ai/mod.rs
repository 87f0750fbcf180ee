//! Quiz generation through an OpenAI-compatible chat-completions API.
//!
//! The model is treated as a black box that returns a JSON list of questions;
//! everything it returns is validated before a quiz is stored.

mod error;
pub use error::{AiError, AiResult};

use serde::{Deserialize, Serialize};

use crate::config;
use crate::model::entity::{Difficulty, QuizQuestion};

/// Cap on how much note content is sent to the model.
const MAX_PROMPT_CONTENT_LEN: usize = 4000;

#[derive(Debug, Clone)]
pub struct QuizGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// The shape we ask the model to produce. Lenient on purpose; it is mapped
/// into [`QuizQuestion`] with defaults filled in.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: Option<String>,
    #[serde(alias = "question")]
    question_text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_index: usize,
    difficulty: Option<Difficulty>,
}

impl QuizGenerator {
    pub fn new(cfg: &config::Ai) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: cfg.base_url().trim_end_matches('/').to_string(),
            api_key: cfg.api_key().to_string(),
            model: cfg.model().to_string(),
        }
    }

    #[tracing::instrument(skip(self, content))]
    pub async fn generate_from_notes(
        &self,
        title: &str,
        content: &str,
    ) -> AiResult<Vec<QuizQuestion>> {
        let content = truncated(content, MAX_PROMPT_CONTENT_LEN);
        let prompt = build_prompt(title, content);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are an expert quiz generator. \
                              Return only a valid JSON array of quiz questions.",
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AiError::EmptyCompletion)?;

        parse_questions(&content)
    }
}

fn build_prompt(title: &str, content: &str) -> String {
    format!(
        "Generate 5-10 multiple choice questions from the notes below. \
         Each question has exactly 4 options, exactly one correct answer \
         (correct_index 0-3), and a difficulty of easy, medium or hard.\n\
         Respond with ONLY a JSON array of objects with keys: id, \
         question_text, options, correct_index, difficulty.\n\n\
         Notes title: {title}\n\nNotes content:\n{content}"
    )
}

fn truncated(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Parses the model output into validated questions. Accepts either a bare
/// array or an object wrapping it under "questions".
fn parse_questions(content: &str) -> AiResult<Vec<QuizQuestion>> {
    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| AiError::MalformedCompletion(e.to_string()))?;

    let raw = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => map
            .remove("questions")
            .ok_or_else(|| AiError::MalformedCompletion("no questions array".into()))?,
        _ => return Err(AiError::MalformedCompletion("expected a JSON array".into())),
    };

    let raw: Vec<RawQuestion> = serde_json::from_value(raw)
        .map_err(|e| AiError::MalformedCompletion(e.to_string()))?;

    let questions: Vec<QuizQuestion> = raw
        .into_iter()
        .enumerate()
        .map(|(i, q)| QuizQuestion {
            id: q.id.unwrap_or_else(|| format!("q{}", i + 1)),
            question_text: q.question_text,
            options: q.options,
            correct_index: q.correct_index,
            difficulty: q.difficulty.unwrap_or(Difficulty::Medium),
        })
        .collect();

    if questions.is_empty() {
        return Err(AiError::EmptyCompletion);
    }
    for q in &questions {
        if q.options.is_empty() || q.correct_index >= q.options.len() {
            return Err(AiError::MalformedCompletion(format!(
                "question {} has correct_index {} for {} options",
                q.id,
                q.correct_index,
                q.options.len()
            )));
        }
    }

    Ok(questions)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let content = r#"[
            {"id":"q1","question_text":"2+2?","options":["3","4"],"correct_index":1,"difficulty":"easy"}
        ]"#;
        let questions = parse_questions(content).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index, 1);
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn parses_wrapped_object_and_fills_defaults() {
        let content = r#"{"questions":[
            {"question":"pick a","options":["a","b","c","d"],"correct_index":0}
        ]}"#;
        let questions = parse_questions(content).unwrap();
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].question_text, "pick a");
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let content = r#"[
            {"id":"q1","question_text":"?","options":["a","b"],"correct_index":5,"difficulty":"hard"}
        ]"#;
        assert!(matches!(
            parse_questions(content),
            Err(AiError::MalformedCompletion(_))
        ));
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_questions("Sure! Here are your questions:").is_err());
    }
}
