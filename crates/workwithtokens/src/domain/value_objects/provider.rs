//! ChatProvider - LLM providers a prompt can be sent to

use serde::{Deserialize, Serialize};

/// LLM Provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    Claude,
    OpenAi,
}

impl ChatProvider {
    /// Human readable name used in messages ("No JSON found in Claude response")
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatProvider::Claude => "Claude",
            ChatProvider::OpenAi => "OpenAI",
        }
    }
}

impl std::fmt::Display for ChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatProvider::Claude => write!(f, "claude"),
            ChatProvider::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for ChatProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(ChatProvider::Claude),
            "openai" => Ok(ChatProvider::OpenAi),
            _ => Err("Provider must be either \"openai\" or \"claude\"".to_string()),
        }
    }
}
