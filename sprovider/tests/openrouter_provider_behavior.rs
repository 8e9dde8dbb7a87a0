#![cfg(feature = "provider-openrouter")]

use std::sync::{Arc, Mutex};

use sprovider::adapters::openai::{
    OpenAiAssistantMessage, OpenAiAuth, OpenAiFinishReason, OpenAiRequest, OpenAiResponse,
    OpenAiRole, OpenAiToolCall, OpenAiTransport, OpenAiUsage,
};
use sprovider::adapters::openrouter::{
    OPENROUTER_DEFAULT_MODEL, OPENROUTER_PROVIDER_NAME, OpenRouterProvider,
};
use sprovider::{
    CredentialStore, Message, ModelProvider, ModelRequest, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, StopReason, ToolCall, ToolExchange, ToolResult,
};

#[derive(Debug, Default)]
struct FakeTransport {
    captured_auth: Mutex<Option<String>>,
    captured_request: Mutex<Option<OpenAiRequest>>,
}

impl OpenAiTransport for FakeTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            *self.captured_request.lock().expect("request lock") = Some(request);
            *self.captured_auth.lock().expect("auth lock") = Some(auth.bearer_token().to_string());

            Ok(OpenAiResponse {
                model: OPENROUTER_DEFAULT_MODEL.to_string(),
                message: OpenAiAssistantMessage {
                    content: String::new(),
                    tool_calls: vec![OpenAiToolCall {
                        id: "call_1".to_string(),
                        name: "get_weather".to_string(),
                        arguments: "{\"city\":\"Tokyo\"}".to_string(),
                    }],
                },
                finish_reason: OpenAiFinishReason::ToolCalls,
                usage: OpenAiUsage {
                    prompt_tokens: 30,
                    completion_tokens: 8,
                    total_tokens: 38,
                },
            })
        })
    }
}

fn provider_with_key(transport: Arc<FakeTransport>) -> OpenRouterProvider {
    let credentials = Arc::new(CredentialStore::new());
    credentials
        .set_api_key(OPENROUTER_PROVIDER_NAME, "sk-or-v1-test")
        .expect("key should store");
    OpenRouterProvider::new(credentials, transport)
}

#[tokio::test]
async fn complete_sends_bearer_key_and_maps_tool_calls() {
    let transport = Arc::new(FakeTransport::default());
    let provider = provider_with_key(Arc::clone(&transport));

    let response = provider
        .complete(ModelRequest::new(
            "openai/gpt-4o-mini",
            vec![Message::user("What's the weather in Tokyo?")],
        ))
        .await
        .expect("completion should succeed");

    assert_eq!(provider.name(), "openrouter");
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.usage.input_tokens, 30);
    assert!(matches!(
        &response.output[..],
        [OutputItem::ToolCall(call)] if call.name == "get_weather"
    ));

    let auth = transport.captured_auth.lock().expect("auth lock").clone();
    assert_eq!(auth.as_deref(), Some("sk-or-v1-test"));

    let request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request captured");
    assert_eq!(request.model, "openai/gpt-4o-mini");
}

#[tokio::test]
async fn blank_model_uses_fallback() {
    let transport = Arc::new(FakeTransport::default());
    let provider = provider_with_key(Arc::clone(&transport)).with_fallback_model("meta/llama-3");

    provider
        .complete(ModelRequest::new("", vec![Message::user("hi")]))
        .await
        .expect("completion should succeed");

    let request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request captured");
    assert_eq!(request.model, "meta/llama-3");
}

#[tokio::test]
async fn missing_key_is_an_authentication_error() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenRouterProvider::new(Arc::new(CredentialStore::new()), transport.clone());

    let err = provider
        .complete(ModelRequest::new(
            OPENROUTER_DEFAULT_MODEL,
            vec![Message::user("hi")],
        ))
        .await
        .expect_err("missing key must fail");

    assert_eq!(err.kind, ProviderErrorKind::Authentication);
    assert!(err.message.contains("OPENROUTER_API_KEY"));
    assert!(transport.captured_request.lock().expect("request lock").is_none());
}

#[tokio::test]
async fn invalid_request_never_reaches_transport() {
    let transport = Arc::new(FakeTransport::default());
    let provider = provider_with_key(Arc::clone(&transport));

    let err = provider
        .complete(ModelRequest::new(OPENROUTER_DEFAULT_MODEL, Vec::new()))
        .await
        .expect_err("empty conversation must fail");

    assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
    assert!(transport.captured_request.lock().expect("request lock").is_none());
}

#[tokio::test]
async fn tool_exchanges_follow_the_conversation() {
    let transport = Arc::new(FakeTransport::default());
    let provider = provider_with_key(Arc::clone(&transport));

    let exchange = ToolExchange::new(
        "Let me check.",
        vec![ToolCall {
            id: "call_1".to_string(),
            name: "get_weather".to_string(),
            arguments: "{\"city\":\"Tokyo\"}".to_string(),
        }],
    )
    .with_result(ToolResult {
        tool_call_id: "call_1".to_string(),
        output: "It's always sunny in Tokyo!".to_string(),
    });

    provider
        .complete(
            ModelRequest::new(
                OPENROUTER_DEFAULT_MODEL,
                vec![
                    Message::system("You are a helpful weather assistant."),
                    Message::user("What's the weather in Tokyo?"),
                ],
            )
            .with_tool_exchanges(vec![exchange]),
        )
        .await
        .expect("completion should succeed");

    let request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request captured");

    assert_eq!(request.messages.len(), 4);
    assert_eq!(request.messages[2].role, OpenAiRole::Assistant);
    assert_eq!(request.messages[2].content, "Let me check.");
    assert_eq!(request.messages[2].tool_calls.len(), 1);
    assert_eq!(request.messages[3].role, OpenAiRole::Tool);
    assert_eq!(request.messages[3].content, "It's always sunny in Tokyo!");
}
