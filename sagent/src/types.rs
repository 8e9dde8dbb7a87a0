//! Invocation request and transcript result types.

use std::fmt::{Display, Formatter};

use scommon::{MetadataMap, SessionId};
use sprovider::{Message, StopReason, TokenUsage, ToolExchange, ToolResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRequest {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
    pub metadata: MetadataMap,
}

impl AgentRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            session_id: SessionId::default(),
            messages,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResult {
    pub session_id: SessionId,
    /// Conversation as sent to the model, including any injected system prompt.
    pub conversation: Vec<Message>,
    pub tool_exchanges: Vec<ToolExchange>,
    pub final_message: String,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
    pub model_calls: u32,
    pub tool_round_limit_reached: bool,
}

impl AgentResult {
    pub fn tool_outputs(&self) -> impl Iterator<Item = &ToolResult> {
        self.tool_exchanges
            .iter()
            .flat_map(|exchange| exchange.results.iter())
    }
}

impl Display for AgentResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut lines = self
            .conversation
            .iter()
            .map(|message| format!("[{}] {}", message.role, message.content))
            .collect::<Vec<_>>();

        for exchange in &self.tool_exchanges {
            if !exchange.assistant_content.is_empty() {
                lines.push(format!("[assistant] {}", exchange.assistant_content));
            }
            for call in &exchange.calls {
                lines.push(format!(
                    "[tool call] {}({}) id={}",
                    call.name, call.arguments, call.id
                ));
                if let Some(result) = exchange.result_for(&call.id) {
                    lines.push(format!("[tool] {}", result.output));
                }
            }
        }

        if !self.final_message.is_empty() {
            lines.push(format!("[assistant] {}", self.final_message));
        }
        if self.tool_round_limit_reached {
            lines.push("(stopped: tool round limit reached)".to_string());
        }

        f.write_str(&lines.join("\n"))
    }
}
