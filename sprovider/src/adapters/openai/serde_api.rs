//! Chat-completions wire bodies.
//!
//! Outgoing bodies borrow from [`OpenAiRequest`] so a request is serialized
//! without cloning the conversation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

use super::types::{
    OpenAiAssistantMessage, OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse,
    OpenAiRole, OpenAiTool, OpenAiToolCall, OpenAiUsage,
};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Checks the request against what gateways accept and borrows it into a body.
pub(crate) fn build_api_request(
    request: &OpenAiRequest,
) -> Result<ChatCompletionBody<'_>, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "chat completion requires at least one message",
        ));
    }

    Ok(ChatCompletionBody {
        model: &request.model,
        messages: request
            .messages
            .iter()
            .map(WireMessage::borrow_from)
            .collect::<Result<Vec<_>, _>>()?,
        tools: request
            .tools
            .iter()
            .map(WireTool::borrow_from)
            .collect::<Result<Vec<_>, _>>()?,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    })
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    /// `null` only for assistant turns that carry nothing but tool calls.
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

impl<'a> WireMessage<'a> {
    fn borrow_from(message: &'a OpenAiMessage) -> Result<Self, ProviderError> {
        let blank = message.content.trim().is_empty();

        match message.role {
            OpenAiRole::System | OpenAiRole::User if blank => {
                return Err(ProviderError::invalid_request(format!(
                    "{} message content must not be empty",
                    message.role.as_str()
                )));
            }
            OpenAiRole::Tool if message.tool_call_id.is_none() => {
                return Err(ProviderError::invalid_request(
                    "tool message requires a tool_call_id",
                ));
            }
            _ => {}
        }

        let content =
            (!blank || message.tool_calls.is_empty()).then_some(message.content.as_str());

        Ok(Self {
            role: message.role.as_str(),
            content,
            tool_calls: message.tool_calls.iter().map(WireToolCall::from).collect(),
            tool_call_id: message.tool_call_id.as_deref(),
        })
    }
}

#[derive(Debug, Serialize)]
struct WireToolCall<'a> {
    id: &'a str,
    r#type: &'static str,
    function: WireCallFunction<'a>,
}

#[derive(Debug, Serialize)]
struct WireCallFunction<'a> {
    name: &'a str,
    arguments: &'a str,
}

impl<'a> From<&'a OpenAiToolCall> for WireToolCall<'a> {
    fn from(call: &'a OpenAiToolCall) -> Self {
        Self {
            id: &call.id,
            r#type: "function",
            function: WireCallFunction {
                name: &call.name,
                arguments: &call.arguments,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    r#type: &'static str,
    function: WireToolSpec<'a>,
}

#[derive(Debug, Serialize)]
struct WireToolSpec<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

impl<'a> WireTool<'a> {
    fn borrow_from(tool: &'a OpenAiTool) -> Result<Self, ProviderError> {
        if !tool.parameters.is_object() {
            return Err(ProviderError::invalid_request(format!(
                "tool '{}' parameters must be a JSON object schema",
                tool.name
            )));
        }

        Ok(Self {
            r#type: "function",
            function: WireToolSpec {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.parameters,
            },
        })
    }
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> OpenAiFinishReason {
    match value {
        Some("stop") => OpenAiFinishReason::Stop,
        Some("length") => OpenAiFinishReason::Length,
        Some("tool_calls" | "function_call") => OpenAiFinishReason::ToolCalls,
        Some("content_filter") => OpenAiFinishReason::ContentFilter,
        _ => OpenAiFinishReason::Other,
    }
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GatewayError,
}

/// Message from a `{"error": {"message": ...}}` body, if the body has that shape.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletion {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: WireUsage,
    /// Gateways may report upstream failures inside a 200 body.
    error: Option<GatewayError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ChoiceToolCall>,
}

#[derive(Debug, Deserialize)]
struct ChoiceToolCall {
    id: String,
    function: ChoiceFunction,
}

#[derive(Debug, Deserialize)]
struct ChoiceFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl TryFrom<ChatCompletion> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(completion: ChatCompletion) -> Result<Self, Self::Error> {
        if let Some(error) = completion.error {
            return Err(ProviderError::unavailable(error.message));
        }

        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(ProviderError::transport(
                "chat completion did not include choices",
            ));
        };

        let tool_calls = choice
            .message
            .tool_calls
            .into_iter()
            .map(|call| OpenAiToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(Self {
            model: completion.model,
            message: OpenAiAssistantMessage {
                content: choice.message.content.unwrap_or_default(),
                tool_calls,
            },
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage: OpenAiUsage {
                prompt_tokens: completion.usage.prompt_tokens,
                completion_tokens: completion.usage.completion_tokens,
                total_tokens: completion.usage.total_tokens,
            },
        })
    }
}

/// Decodes a successful response body.
pub(crate) fn parse_completion(body: &str) -> Result<OpenAiResponse, ProviderError> {
    let completion = serde_json::from_str::<ChatCompletion>(body).map_err(|err| {
        ProviderError::transport(format!("malformed chat completion body: {err}"))
    })?;
    OpenAiResponse::try_from(completion)
}
