//! Focused unit tests for OpenAI-compatible adapter internals.

#![cfg(test)]

use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::{
    Message, ModelRequest, ProviderErrorKind, StopReason, ToolCall, ToolDefinition, ToolExchange,
    ToolResult,
};

use super::serde_api::{
    build_api_request, extract_error_message, parse_completion, parse_finish_reason,
};
use super::transport::{OpenAiHttpTransport, status_error};
use super::types::{OpenAiFinishReason, OpenAiRequest, OpenAiRole};

fn tokyo_exchange() -> ToolExchange {
    ToolExchange::new(
        "",
        vec![ToolCall {
            id: "call_1".to_string(),
            name: "get_weather".to_string(),
            arguments: "{\"city\":\"Tokyo\"}".to_string(),
        }],
    )
    .with_result(ToolResult {
        tool_call_id: "call_1".to_string(),
        output: "It's always sunny in Tokyo!".to_string(),
    })
}

fn weather_tool() -> ToolDefinition {
    ToolDefinition {
        name: "get_weather".to_string(),
        description: "Get the weather for a given city".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": { "city": { "type": "string" } },
            "required": ["city"]
        }),
    }
}

#[test]
fn exchanges_flatten_into_assistant_then_tool_messages() {
    let request = ModelRequest::new(
        "anthropic/claude-sonnet-4.5",
        vec![
            Message::system("You are a helpful weather assistant."),
            Message::user("What's the weather in Tokyo?"),
        ],
    )
    .with_tool_exchanges(vec![tokyo_exchange()]);

    let built = OpenAiRequest::from_model_request(request, "unused");
    let roles = built
        .messages
        .iter()
        .map(|message| message.role)
        .collect::<Vec<_>>();
    assert_eq!(
        roles,
        vec![
            OpenAiRole::System,
            OpenAiRole::User,
            OpenAiRole::Assistant,
            OpenAiRole::Tool
        ]
    );
    assert_eq!(built.messages[2].tool_calls[0].id, "call_1");
    assert_eq!(built.messages[3].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(built.messages[3].content, "It's always sunny in Tokyo!");
}

#[test]
fn blank_model_falls_back() {
    let request = ModelRequest::new("  ", vec![Message::user("hi")]);
    let built = OpenAiRequest::from_model_request(request, "anthropic/claude-sonnet-4.5");
    assert_eq!(built.model, "anthropic/claude-sonnet-4.5");
}

#[test]
fn api_request_serializes_tool_calls_and_omits_empty_fields() {
    let request = ModelRequest::new("m", vec![Message::user("What's the weather in Tokyo?")])
        .with_tool_exchanges(vec![tokyo_exchange()]);
    let built = OpenAiRequest::from_model_request(request, "m");
    let api = build_api_request(&built).expect("request should build");
    let body = serde_json::to_value(&api).expect("request should serialize");

    assert!(body.get("tools").is_none());
    assert!(body.get("temperature").is_none());

    let assistant = &body["messages"][1];
    assert_eq!(assistant["role"], "assistant");
    assert!(assistant["content"].is_null());
    assert_eq!(assistant["tool_calls"][0]["type"], "function");
    assert_eq!(assistant["tool_calls"][0]["function"]["name"], "get_weather");
    assert_eq!(
        assistant["tool_calls"][0]["function"]["arguments"],
        "{\"city\":\"Tokyo\"}"
    );

    let tool = &body["messages"][2];
    assert_eq!(tool["role"], "tool");
    assert_eq!(tool["tool_call_id"], "call_1");
}

#[test]
fn api_request_advertises_tools_as_functions() {
    let request =
        ModelRequest::new("m", vec![Message::user("hi")]).with_tools(vec![weather_tool()]);
    let built = OpenAiRequest::from_model_request(request, "m");
    let api = build_api_request(&built).expect("request should build");
    let body = serde_json::to_value(&api).expect("request should serialize");

    assert_eq!(body["tools"][0]["type"], "function");
    assert_eq!(body["tools"][0]["function"]["name"], "get_weather");
    assert_eq!(
        body["tools"][0]["function"]["parameters"]["required"],
        json!(["city"])
    );
}

#[test]
fn api_request_rejects_blank_user_content_and_non_object_schema() {
    let request = ModelRequest::new("m", vec![Message::user("   ")]);
    let built = OpenAiRequest::from_model_request(request, "m");
    let err = build_api_request(&built).expect_err("blank user message must fail");
    assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

    let mut tool = weather_tool();
    tool.input_schema = json!("not a schema");
    let request = ModelRequest::new("m", vec![Message::user("hi")]).with_tools(vec![tool]);
    let built = OpenAiRequest::from_model_request(request, "m");
    let err = build_api_request(&built).expect_err("non-object schema must fail");
    assert!(err.message.contains("get_weather"));
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("stop")), OpenAiFinishReason::Stop);
    assert_eq!(parse_finish_reason(Some("length")), OpenAiFinishReason::Length);
    assert_eq!(
        parse_finish_reason(Some("tool_calls")),
        OpenAiFinishReason::ToolCalls
    );
    assert_eq!(
        parse_finish_reason(Some("content_filter")),
        OpenAiFinishReason::ContentFilter
    );
    assert_eq!(parse_finish_reason(Some("unknown")), OpenAiFinishReason::Other);
    assert_eq!(parse_finish_reason(None), OpenAiFinishReason::Other);
}

#[test]
fn tool_call_response_parses_into_model_response() {
    let raw = json!({
        "model": "anthropic/claude-sonnet-4.5",
        "choices": [{
            "message": {
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "get_weather", "arguments": "{\"city\":\"Tokyo\"}" }
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": { "prompt_tokens": 40, "completion_tokens": 12, "total_tokens": 52 }
    });

    let response = parse_completion(&raw.to_string())
        .expect("response should parse")
        .into_model_response();

    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.usage.total_tokens, 52);
    assert_eq!(response.output.len(), 1);
    match &response.output[0] {
        crate::OutputItem::ToolCall(call) => {
            assert_eq!(call.name, "get_weather");
            assert_eq!(call.arguments, "{\"city\":\"Tokyo\"}");
        }
        other => panic!("expected tool call, got {other:?}"),
    }
}

#[test]
fn error_inside_success_body_is_surfaced() {
    let raw = json!({ "error": { "message": "upstream provider overloaded", "code": 502 } });
    let err = parse_completion(&raw.to_string()).expect_err("embedded error must fail");
    assert_eq!(err.kind, ProviderErrorKind::Unavailable);
    assert!(err.message.contains("overloaded"));
}

#[test]
fn missing_choices_is_a_transport_error() {
    let err = parse_completion(r#"{"model":"m","choices":[]}"#).expect_err("no choices must fail");
    assert_eq!(err.kind, ProviderErrorKind::Transport);

    let err = parse_completion("<html>").expect_err("non-json body must fail");
    assert!(err.message.contains("malformed"));
}

#[test]
fn error_envelope_message_is_extracted() {
    let body = r#"{"error":{"message":"Insufficient credits","code":402}}"#;
    assert_eq!(
        extract_error_message(body).as_deref(),
        Some("Insufficient credits")
    );
    assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
}

#[test]
fn http_status_maps_to_error_kind() {
    let cases = [
        (StatusCode::UNAUTHORIZED, ProviderErrorKind::Authentication),
        (StatusCode::PAYMENT_REQUIRED, ProviderErrorKind::InsufficientCredits),
        (StatusCode::TOO_MANY_REQUESTS, ProviderErrorKind::RateLimited),
        (StatusCode::GATEWAY_TIMEOUT, ProviderErrorKind::Timeout),
        (StatusCode::BAD_REQUEST, ProviderErrorKind::InvalidRequest),
        (StatusCode::SERVICE_UNAVAILABLE, ProviderErrorKind::Unavailable),
        (StatusCode::INTERNAL_SERVER_ERROR, ProviderErrorKind::Transport),
    ];

    for (status, kind) in cases {
        let err = status_error(status, "boom".to_string());
        assert_eq!(err.kind, kind, "status {status}");
        assert_eq!(err.status, Some(status.as_u16()));
    }
}

#[test]
fn endpoint_joins_without_double_slash() {
    let transport = OpenAiHttpTransport::new(Client::new()).with_base_url("https://example.test/v1/");
    assert_eq!(
        transport.endpoint("chat/completions"),
        "https://example.test/v1/chat/completions"
    );
}
