//! OpenAI-compatible chat-completions wire protocol shared by gateway providers.

mod serde_api;
mod tests;
mod transport;
mod types;

pub use transport::{OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAssistantMessage, OpenAiAuth, OpenAiFinishReason, OpenAiMessage, OpenAiRequest,
    OpenAiResponse, OpenAiRole, OpenAiTool, OpenAiToolCall, OpenAiUsage,
};
