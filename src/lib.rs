//! Prompt Composer - strategy-based prompt assembly for completion endpoints.
//!
//! A [`PromptComposer`] keeps a transcript of prior exchanges and weaves the
//! current prompt fragment into request text using one of three strategies:
//!
//! 1. **In-context**: transcript lines followed by the fragment
//! 2. **Chain-of-thought**: the fragment plus "Let's think step by step."
//! 3. **Tree-of-thought**: the fragment plus a multi-expert reasoning template
//!
//! # Quick Start
//!
//! ```no_run
//! use prompt_composer::{Config, CompletionClient, PromptComposer, Strategy};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!
//!     let client = CompletionClient::new(config.llm);
//!     let mut composer =
//!         PromptComposer::new(Strategy::ChainOfThought, client).with_prompt("Is 7 prime?");
//!
//!     if let Some(prompt) = composer.compose() {
//!         let answer = composer.submit(&prompt).await?;
//!         println!("{}", answer);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod composer;
pub mod config;
pub mod error;
pub mod llm;
pub mod strategy;

// Re-export commonly used types
pub use composer::PromptComposer;
pub use config::{CompletionConfig, Config};
pub use error::{ComposerError, Result};
pub use llm::CompletionClient;
pub use strategy::Strategy;
