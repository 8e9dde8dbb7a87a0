//! OpenAI-compatible adapter types and provider-agnostic conversion logic.

use std::fmt::Formatter;

use serde_json::Value;

use crate::{
    Message, ModelRequest, ModelResponse, OutputItem, Role, SecretString, StopReason, TokenUsage,
    ToolCall, ToolDefinition, ToolResult,
};

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    pub tools: Vec<OpenAiTool>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl OpenAiRequest {
    /// Flattens a [`ModelRequest`] into chat-completions order: the conversation
    /// first, then for every tool exchange one assistant message carrying the
    /// calls followed by one tool message per result.
    pub fn from_model_request(request: ModelRequest, fallback_model: &str) -> Self {
        let model = if request.model.trim().is_empty() {
            fallback_model.to_string()
        } else {
            request.model
        };

        let mut messages = request
            .messages
            .into_iter()
            .map(OpenAiMessage::from)
            .collect::<Vec<_>>();

        for exchange in request.tool_exchanges {
            messages.push(OpenAiMessage::assistant_tool_calls(
                exchange.assistant_content,
                exchange.calls,
            ));
            messages.extend(exchange.results.into_iter().map(OpenAiMessage::tool_result));
        }

        Self {
            model,
            messages,
            tools: request.tools.into_iter().map(OpenAiTool::from).collect(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiMessage {
    pub role: OpenAiRole,
    pub content: String,
    pub tool_calls: Vec<OpenAiToolCall>,
    pub tool_call_id: Option<String>,
}

impl OpenAiMessage {
    pub(crate) fn assistant_tool_calls(content: String, calls: Vec<ToolCall>) -> Self {
        Self {
            role: OpenAiRole::Assistant,
            content,
            tool_calls: calls.into_iter().map(OpenAiToolCall::from).collect(),
            tool_call_id: None,
        }
    }

    pub(crate) fn tool_result(tool_result: ToolResult) -> Self {
        Self {
            role: OpenAiRole::Tool,
            content: tool_result.output,
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_result.tool_call_id),
        }
    }
}

impl From<Message> for OpenAiMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiRole {
    System,
    User,
    Assistant,
    Tool,
}

impl OpenAiRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl From<Role> for OpenAiRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => Self::System,
            Role::User => Self::User,
            Role::Assistant => Self::Assistant,
            Role::Tool => Self::Tool,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiTool {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<ToolDefinition> for OpenAiTool {
    fn from(value: ToolDefinition) -> Self {
        Self {
            name: value.name,
            description: value.description,
            parameters: value.input_schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiResponse {
    pub model: String,
    pub message: OpenAiAssistantMessage,
    pub finish_reason: OpenAiFinishReason,
    pub usage: OpenAiUsage,
}

impl OpenAiResponse {
    pub fn into_model_response(self) -> ModelResponse {
        let mut output = Vec::new();
        if !self.message.content.is_empty() {
            output.push(OutputItem::Message(Message::assistant(self.message.content)));
        }

        output.extend(
            self.message
                .tool_calls
                .into_iter()
                .map(|tool_call| OutputItem::ToolCall(tool_call.into())),
        );

        ModelResponse {
            model: self.model,
            output,
            stop_reason: self.finish_reason.into(),
            usage: self.usage.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenAiAssistantMessage {
    pub content: String,
    pub tool_calls: Vec<OpenAiToolCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl From<OpenAiToolCall> for ToolCall {
    fn from(value: OpenAiToolCall) -> Self {
        Self {
            id: value.id,
            name: value.name,
            arguments: value.arguments,
        }
    }
}

impl From<ToolCall> for OpenAiToolCall {
    fn from(value: ToolCall) -> Self {
        Self {
            id: value.id,
            name: value.name,
            arguments: value.arguments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiFinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Other,
}

impl From<OpenAiFinishReason> for StopReason {
    fn from(value: OpenAiFinishReason) -> Self {
        match value {
            OpenAiFinishReason::Stop => Self::EndTurn,
            OpenAiFinishReason::Length => Self::MaxTokens,
            OpenAiFinishReason::ToolCalls => Self::ToolUse,
            OpenAiFinishReason::ContentFilter => Self::ContentFilter,
            OpenAiFinishReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<OpenAiUsage> for TokenUsage {
    fn from(value: OpenAiUsage) -> Self {
        Self {
            input_tokens: value.prompt_tokens,
            output_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
        }
    }
}

/// Bearer credential attached to every chat-completions call.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiAuth {
    api_key: SecretString,
}

impl OpenAiAuth {
    pub fn api_key(api_key: SecretString) -> Self {
        Self { api_key }
    }

    pub fn bearer_token(&self) -> &str {
        self.api_key.expose()
    }
}

impl std::fmt::Debug for OpenAiAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenAiAuth([REDACTED])")
    }
}
