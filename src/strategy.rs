//! Prompt engineering strategies and their fixed templates.
//!
//! - Chain-of-thought: <https://www.promptingguide.ai/techniques/cot>
//! - Tree-of-thought: <https://github.com/dave1010/tree-of-thought-prompting>

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-shot chain-of-thought suffix.
pub const CHAIN_OF_THOUGHT_SUFFIX: &str = "Let's think step by step.";

/// Tree-of-thought suffix. Ends on an open "The question is: " line.
pub const TREE_OF_THOUGHT_SUFFIX: &str = "Imagine three different experts are answering this question.\n\
All experts will write down one step of their thinking,\n\
then share it with the group.\n\
After that, all experts will proceed to the next step, and so on.\n\
If any expert realizes they're wrong at any point, they will leave.\n\
The question is: ";

/// How a prompt is assembled from the transcript and the current fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    InContext,
    ChainOfThought,
    TreeOfThought,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::InContext,
        Strategy::ChainOfThought,
        Strategy::TreeOfThought,
    ];

    /// Numeric identifier (1-based).
    pub fn id(&self) -> u8 {
        match self {
            Strategy::InContext => 1,
            Strategy::ChainOfThought => 2,
            Strategy::TreeOfThought => 3,
        }
    }

    /// Look up a strategy by numeric identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Look up a strategy by name (case-insensitive, `-` or `_` separated).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "in-context" | "icl" => Some(Strategy::InContext),
            "chain-of-thought" | "cot" => Some(Strategy::ChainOfThought),
            "tree-of-thought" | "tot" => Some(Strategy::TreeOfThought),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::InContext => "in-context",
            Strategy::ChainOfThought => "chain-of-thought",
            Strategy::TreeOfThought => "tree-of-thought",
        }
    }

    /// Assemble a prompt from prior transcript lines and the current fragment.
    ///
    /// Only the in-context strategy reads the transcript.
    pub fn format(&self, transcript: &[String], prompt: &str) -> String {
        match self {
            Strategy::InContext => {
                let mut lines: Vec<&str> = transcript.iter().map(String::as_str).collect();
                lines.push(prompt);
                lines.join("\n")
            }
            Strategy::ChainOfThought => [prompt, CHAIN_OF_THOUGHT_SUFFIX].join("\n"),
            Strategy::TreeOfThought => [prompt, TREE_OF_THOUGHT_SUFFIX].join("\n"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
