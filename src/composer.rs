//! Prompt composition and the running transcript.
//!
//! A [`PromptComposer`] owns a transcript of prior exchanges and the current
//! prompt fragment. `compose` turns them into request text according to the
//! strategy chosen at construction; `submit` sends text to the completion
//! endpoint and records both sides of the exchange.

use crate::error::Result;
use crate::llm::CompletionClient;
use crate::strategy::Strategy;
use tracing::{debug, info};

/// Transcript tag for the user side of an exchange.
pub const USER_TAG: &str = "[User]";
/// Transcript tag for the model side of an exchange.
pub const SYSTEM_TAG: &str = "[System]";

pub struct PromptComposer {
    strategy: Option<Strategy>,
    client: CompletionClient,
    transcript: Vec<String>,
    prompt: String,
}

impl PromptComposer {
    /// Create a composer with an empty transcript.
    ///
    /// Passing `None` (e.g. from [`Strategy::from_id`] with an unknown id)
    /// builds a composer whose `compose` never produces a prompt.
    pub fn new(strategy: impl Into<Option<Strategy>>, client: CompletionClient) -> Self {
        Self::with_history(strategy, client, Vec::new())
    }

    /// Create a composer seeded with prior transcript lines.
    pub fn with_history(
        strategy: impl Into<Option<Strategy>>,
        client: CompletionClient,
        history: Vec<String>,
    ) -> Self {
        Self {
            strategy: strategy.into(),
            client,
            transcript: history,
            prompt: String::new(),
        }
    }

    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the current prompt fragment.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Builder form of [`set_prompt`](Self::set_prompt).
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.set_prompt(prompt);
        self
    }

    /// Format the current prompt with the configured strategy.
    ///
    /// Returns `None` when no strategy is mapped.
    pub fn compose(&self) -> Option<String> {
        let strategy = self.strategy?;
        let text = strategy.format(&self.transcript, &self.prompt);
        debug!(%strategy, chars = text.len(), "composed prompt");
        Some(text)
    }

    /// Send `prompt` to the completion endpoint and record the exchange.
    ///
    /// On success the transcript gains a user line and a system line, in
    /// that order. Errors from the client are returned unchanged and leave
    /// the transcript as it was.
    pub async fn submit(&mut self, prompt: &str) -> Result<String> {
        let completion = self.client.complete(prompt).await?;
        let response = completion.first_text().to_string();

        self.record_exchange(prompt, &response);
        info!(
            transcript_len = self.transcript.len(),
            response_chars = response.len(),
            "completion received"
        );

        Ok(response)
    }

    /// Set the current fragment, compose it and submit the result.
    ///
    /// Returns `Ok(None)` without contacting the endpoint when no prompt
    /// could be composed.
    pub async fn ask(&mut self, fragment: impl Into<String>) -> Result<Option<String>> {
        self.set_prompt(fragment);
        match self.compose() {
            Some(text) => self.submit(&text).await.map(Some),
            None => Ok(None),
        }
    }

    fn record_exchange(&mut self, prompt: &str, response: &str) {
        self.transcript.push(format!("{}: {}", USER_TAG, prompt));
        self.transcript.push(format!("{}: {}", SYSTEM_TAG, response));
    }
}
