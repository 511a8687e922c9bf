//! OpenAI-compatible chat-completion generator.
//!
//! Defaults target Groq's endpoint. Each generation task sends one
//! system + user message pair and reads back the first choice.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use warden_contracts::{
    action::{DocumentChanges, GeneratedContent},
    error::{WardenError, WardenResult},
};
use warden_core::traits::ContentGenerator;

use crate::task::{unknown_action_result, GenerationTask};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub(crate) static TITLE_LINE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$|^Title:\s*(.+)$"));

/// A `ContentGenerator` backed by a `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl ChatCompletionGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Read the API key from `GROQ_API_KEY`.
    pub fn from_env() -> WardenResult<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(WardenError::ConfigError {
                reason: format!("{API_KEY_ENV} environment variable not set"),
            }),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> WardenResult<String> {
        debug!(model = %self.model, prompt_len = user_prompt.len(), "requesting chat completion");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "model": &self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens,
            }))
            .send()
            .await
            .map_err(|e| failed(format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "chat completion rejected");
            return Err(failed(format!("API error {}: {}", status, body)));
        }

        #[derive(Deserialize)]
        struct Message {
            content: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| failed(format!("failed to parse API response: {}", e)))?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "No response generated".to_string()))
    }
}

fn failed(reason: String) -> WardenError {
    WardenError::GenerationFailed { reason }
}

/// The (system, user) prompt pair for a task.
pub fn prompts(task: GenerationTask, title: &str, content: &str) -> (&'static str, String) {
    match task {
        GenerationTask::Summarize => (
            "You are an AI assistant that specializes in summarizing documents clearly and concisely.",
            format!(
                "Please provide a concise summary of the following document:\n\n\
                 Title: {title}\n\n\
                 Content:\n{content}\n\n\
                 Your summary should capture the main points and key information in the document."
            ),
        ),
        GenerationTask::Analyze => (
            "You are an AI assistant that specializes in document analysis and content evaluation.",
            format!(
                "Please analyze the following document:\n\n\
                 Title: {title}\n\n\
                 Content:\n{content}\n\n\
                 Provide an analysis that includes:\n\
                 1. Document type and purpose\n\
                 2. Key topics and themes\n\
                 3. Tone and style assessment\n\
                 4. Structure evaluation\n\
                 5. Recommendations for improvement"
            ),
        ),
        GenerationTask::Improve => (
            "You are an AI assistant that specializes in improving document quality and readability.",
            format!(
                "Please improve the following document:\n\n\
                 Title: {title}\n\n\
                 Content:\n{content}\n\n\
                 Provide an improved version with:\n\
                 1. Better clarity and readability\n\
                 2. Enhanced structure\n\
                 3. More professional tone (if appropriate)\n\
                 4. Corrected grammar and style issues\n\
                 5. Expanded content where needed\n\n\
                 Return ONLY the improved title and content without any explanations or additional text."
            ),
        ),
    }
}

/// Split a model response into a title and body.
///
/// The first `# Heading` or `Title: ...` line becomes the title and is
/// removed from the body. Without one, `original_title` is kept and the
/// whole response is the body.
pub fn parse_improvement(original_title: &str, response: &str) -> WardenResult<DocumentChanges> {
    let title_line = TITLE_LINE
        .as_ref()
        .map_err(|e| failed(format!("invalid title pattern: {}", e)))?;

    let title = title_line.captures(response).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim().to_string())
    });

    Ok(match title {
        Some(title) => DocumentChanges {
            title,
            content: title_line.replacen(response, 1, "").trim().to_string(),
        },
        None => DocumentChanges {
            title: original_title.to_string(),
            content: response.to_string(),
        },
    })
}

#[async_trait]
impl ContentGenerator for ChatCompletionGenerator {
    async fn generate(
        &self,
        action_type: &str,
        title: &str,
        content: &str,
    ) -> WardenResult<GeneratedContent> {
        let Some(task) = GenerationTask::for_action(action_type) else {
            return Ok(GeneratedContent {
                result: unknown_action_result(action_type),
                changes: None,
            });
        };

        let (system_prompt, user_prompt) = prompts(task, title, content);
        let response = self.complete(system_prompt, &user_prompt).await?;

        match task {
            GenerationTask::Improve => {
                let changes = parse_improvement(title, &response)?;
                Ok(GeneratedContent {
                    result: "Document improvement suggestions generated".to_string(),
                    changes: Some(changes),
                })
            }
            GenerationTask::Summarize | GenerationTask::Analyze => Ok(GeneratedContent {
                result: response,
                changes: None,
            }),
        }
    }
}
