//! OpenAI-compatible text-completion client.
//!
//! Talks to `POST {api_base}/v1/completions`. Every request carries the
//! sampling parameters from [`CompletionConfig`].

use crate::config::CompletionConfig;
use crate::error::{ComposerError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request body for a text completion.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    n: u32,
    stop: Option<&'a [String]>,
    temperature: f32,
}

/// Response from a text completion.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    error_type: Option<String>,
}

/// One generated choice.
#[derive(Debug, Clone)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    pub finish_reason: Option<String>,
}

/// Response from a completion call including metadata.
#[derive(Debug)]
pub struct Completion {
    /// Generated choices, in the order the API returned them. Never empty.
    pub choices: Vec<CompletionChoice>,
    /// Token usage (if available).
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// Text of the first choice with surrounding whitespace removed.
    pub fn first_text(&self) -> &str {
        self.choices.first().map(|c| c.text.trim()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI-compatible completion client.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Create a new client; the API key travels inside `config`.
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Get the API endpoint URL.
    fn endpoint(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/v1/completions", base)
    }

    /// Send a completion request for `prompt`.
    pub async fn complete(&self, prompt: &str) -> Result<Completion> {
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_tokens,
            n: self.config.n,
            stop: self.config.stop.as_deref(),
            temperature: self.config.temperature,
        };

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "completion request rejected");
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(ComposerError::Api(format!(
                    "API error ({}): {}",
                    status, api_error.error.message
                )));
            }
            return Err(ComposerError::Api(format!(
                "Request failed ({}): {}",
                status, body
            )));
        }

        let completion: CompletionResponse = serde_json::from_str(&body)?;

        if completion.choices.is_empty() {
            return Err(ComposerError::EmptyResponse);
        }

        Ok(Completion {
            choices: completion
                .choices
                .into_iter()
                .map(|c| CompletionChoice {
                    text: c.text,
                    index: c.index,
                    finish_reason: c.finish_reason,
                })
                .collect(),
            usage: completion.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }

    /// Test connectivity to the API.
    pub async fn test_connection(&self) -> Result<()> {
        let completion = self.complete("Say 'hello' and nothing else.").await?;

        if completion.first_text().to_lowercase().contains("hello") {
            Ok(())
        } else {
            Err(ComposerError::Api(format!(
                "Unexpected response: {}",
                completion.first_text()
            )))
        }
    }
}
