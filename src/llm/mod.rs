//! Completion endpoint integration.
//!
//! Provides an OpenAI-compatible client for the text-completion API.

mod client;

pub use client::{Completion, CompletionChoice, CompletionClient, TokenUsage};
