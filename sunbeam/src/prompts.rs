//! Canned prompts and message helpers.

use clap::ValueEnum;
use sprovider::Message;

pub const WEATHER_SYSTEM_PROMPT: &str =
    "You are a helpful weather assistant. Provide weather information when asked.";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
pub const WEATHER_IN_TOKYO_QUERY: &str = "What's the weather in Tokyo?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemPrompt {
    Weather,
    Default,
}

impl SystemPrompt {
    pub fn text(self) -> &'static str {
        match self {
            Self::Weather => WEATHER_SYSTEM_PROMPT,
            Self::Default => DEFAULT_SYSTEM_PROMPT,
        }
    }
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::user(content)
}

pub fn system_message(content: impl Into<String>) -> Message {
    Message::system(content)
}
