//! HTTP client for the task-refinement endpoint.
//!
//! Talks to an OpenAI-compatible chat-completions API: one POST per
//! refinement batch, no retries, no caching. The response content is
//! expected to be (or contain) a JSON array of refined tasks aligned
//! with the input order.

use serde::{Deserialize, Serialize};

use crate::model::config::ApiConfig;
use crate::refine::{Refined, RefineError};

/// Client for one-shot refinement calls.
pub struct RefineClient {
    client: reqwest::blocking::Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl RefineClient {
    /// Create a client with an explicit key and endpoint settings.
    pub fn new(api_key: String, api: &ApiConfig) -> Self {
        RefineClient {
            client: reqwest::blocking::Client::new(),
            api_key,
            api_url: api.url.clone(),
            model: api.model.clone(),
            temperature: api.temperature,
            max_tokens: api.max_tokens,
        }
    }

    /// Create a client from the `BB2_API_KEY` environment variable.
    pub fn from_env(api: &ApiConfig) -> Result<Self, RefineError> {
        match std::env::var("BB2_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key, api)),
            _ => Err(RefineError::MissingApiKey),
        }
    }

    /// Refine and prioritize a batch of task texts.
    ///
    /// Sends all tasks in a single request and returns one `Refined` per
    /// input, in input order. Fails with `Service` on a non-success
    /// status, `Parse` if the response content is not a JSON array, and
    /// `LengthMismatch` if the array is not aligned with the input.
    pub fn refine_tasks(&self, tasks: &[String]) -> Result<Vec<Refined>, RefineError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: "You are a helpful assistant.".into(),
                },
                Message {
                    role: "user".into(),
                    content: build_prompt(tasks),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefineError::Service {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let completion: ChatResponse =
            serde_json::from_str(&body).map_err(|_| RefineError::Parse { raw: body.clone() })?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(RefineError::Parse { raw: body })?;

        parse_refinements(&content, tasks.len())
    }
}

/// Build the single user prompt enumerating all tasks.
fn build_prompt(tasks: &[String]) -> String {
    let listing = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert productivity coach.\n\n\
         Given this list of tasks:\n{listing}\n\n\
         For each task, do ALL of the following:\n\
         - Assign a priority from 1 (highest) to 10 (lowest) based on urgency and importance.\n\
         - Rewrite the task in present tense, first person, as if the goal is already accomplished.\n\
         - Rewrite the original task in past tense.\n\n\
         Return a JSON array of objects, each with:\n\
         - 'text': the goal statement\n\
         - 'priority': the assigned priority (1-10)\n\
         - 'original': the original task, rewritten in past tense.\n\n\
         The array must have exactly {n} entries, in the same order as the input.\n\
         Example output:\n\
         [{{\"text\": \"I have confidently achieved...\", \"priority\": 2, \"original\": \"Completed the report.\"}}]",
        n = tasks.len()
    )
}

/// Parse the response content as a JSON array of refinements, falling
/// back to the first bracketed substring when the model wrapped the
/// array in prose. Enforces length alignment with the input.
fn parse_refinements(content: &str, expected: usize) -> Result<Vec<Refined>, RefineError> {
    let refined: Vec<Refined> = match serde_json::from_str(content) {
        Ok(refined) => refined,
        Err(_) => {
            let candidate = extract_json_array(content).ok_or_else(|| RefineError::Parse {
                raw: content.to_string(),
            })?;
            serde_json::from_str(candidate).map_err(|_| RefineError::Parse {
                raw: content.to_string(),
            })?
        }
    };

    if refined.len() != expected {
        return Err(RefineError::LengthMismatch {
            expected,
            got: refined.len(),
        });
    }
    Ok(refined)
}

/// Extract the first `[` .. last `]` substring (handles surrounding text).
fn extract_json_array(response: &str) -> Option<&str> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

// Chat-completions wire format
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}
