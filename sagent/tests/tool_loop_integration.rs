use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use sagent::prelude::*;
use schemars::JsonSchema;
use serde::Deserialize;
use sprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, StopReason, TokenUsage, ToolCall,
};

#[derive(Deserialize, JsonSchema)]
struct EchoArgs {
    text: String,
}

/// Replays canned responses and records every request it receives.
#[derive(Default)]
struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<ModelResponse, ProviderError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<ModelResponse, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl ModelProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            self.responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::other("script exhausted")))
        })
    }
}

fn tool_call_response(id: &str, arguments: &str) -> Result<ModelResponse, ProviderError> {
    Ok(ModelResponse {
        model: "m".to_string(),
        output: vec![OutputItem::ToolCall(ToolCall {
            id: id.to_string(),
            name: "echo".to_string(),
            arguments: arguments.to_string(),
        })],
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage {
            input_tokens: 5,
            output_tokens: 2,
            total_tokens: 7,
        },
    })
}

fn text_response(text: &str) -> Result<ModelResponse, ProviderError> {
    Ok(ModelResponse {
        model: "m".to_string(),
        output: vec![OutputItem::Message(Message::assistant(text))],
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage {
            input_tokens: 6,
            output_tokens: 2,
            total_tokens: 8,
        },
    })
}

fn echo_runtime() -> Arc<DefaultToolRuntime> {
    let mut registry = ToolRegistry::new();
    registry
        .register_sync_fn("echo", "Echoes text", |args: EchoArgs| args.text)
        .expect("echo should register");
    Arc::new(DefaultToolRuntime::new(Arc::new(registry)))
}

fn go() -> AgentRequest {
    AgentRequest::new(vec![Message::user("go")]).with_session_id("int-s1")
}

#[tokio::test]
async fn tool_loop_executes_registered_tool_and_completes() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response("call_1", "{\"text\":\"hello\"}"),
        text_response("done"),
    ]));
    let agent = Agent::builder(provider.clone())
        .tool_runtime(echo_runtime())
        .policy(AgentPolicy::new("m").with_max_tool_round_trips(2))
        .build();

    let result = agent.invoke(go()).await.expect("invoke should succeed");

    assert_eq!(result.final_message, "done");
    assert_eq!(result.model_calls, 2);
    assert_eq!(result.usage.total_tokens, 15);
    assert!(!result.tool_round_limit_reached);
    assert_eq!(
        result
            .tool_outputs()
            .map(|output| output.output.as_str())
            .collect::<Vec<_>>(),
        vec!["hello"]
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools.len(), 1);
    assert!(requests[0].tool_exchanges.is_empty());
    assert_eq!(requests[1].tool_exchanges.len(), 1);
    assert_eq!(requests[1].tool_exchanges[0].results[0].tool_call_id, "call_1");
    assert_eq!(requests[1].tool_exchanges[0].results[0].output, "hello");
}

#[tokio::test]
async fn tool_errors_are_reported_to_the_model_by_default() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response("call_1", "{\"wrong\":true}"),
        text_response("recovered"),
    ]));
    let agent = Agent::builder(provider.clone())
        .tool_runtime(echo_runtime())
        .model("m")
        .build();

    let result = agent.invoke(go()).await.expect("invoke should succeed");
    assert_eq!(result.final_message, "recovered");

    let requests = provider.requests();
    let output = &requests[1].tool_exchanges[0].results[0].output;
    assert!(output.starts_with("Error: InvalidArguments"), "got {output}");
}

#[tokio::test]
async fn fail_turn_policy_aborts_on_tool_error() {
    let provider = Arc::new(ScriptedProvider::new(vec![tool_call_response(
        "call_1",
        "not json",
    )]));
    let agent = Agent::builder(provider.clone())
        .tool_runtime(echo_runtime())
        .policy(AgentPolicy::new("m").with_tool_errors(ToolErrorPolicy::FailTurn))
        .build();

    let error = agent.invoke(go()).await.expect_err("invoke should fail");
    assert_eq!(error.kind, AgentErrorKind::Tooling);
    assert!(error.message.contains("echo"));
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn round_limit_stops_the_loop() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response("call_1", "{\"text\":\"a\"}"),
        tool_call_response("call_2", "{\"text\":\"b\"}"),
        text_response("never reached"),
    ]));
    let agent = Agent::builder(provider.clone())
        .tool_runtime(echo_runtime())
        .model("m")
        .max_tool_round_trips(1)
        .build();

    let result = agent.invoke(go()).await.expect("invoke should succeed");
    assert!(result.tool_round_limit_reached);
    assert_eq!(result.tool_exchanges.len(), 1);
    assert_eq!(result.model_calls, 2);
    assert_eq!(result.stop_reason, StopReason::ToolUse);
}

#[tokio::test]
async fn tool_calls_without_runtime_are_a_tooling_error() {
    let provider = Arc::new(ScriptedProvider::new(vec![tool_call_response(
        "call_1",
        "{\"text\":\"a\"}",
    )]));
    let agent = Agent::builder(provider).model("m").build();

    let error = agent.invoke(go()).await.expect_err("invoke should fail");
    assert_eq!(error.kind, AgentErrorKind::Tooling);
}

#[tokio::test]
async fn provider_failures_propagate() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(
        ProviderError::authentication("no OpenRouter API key configured"),
    )]));
    let agent = Agent::builder(provider).model("m").build();

    let error = agent.invoke(go()).await.expect_err("invoke should fail");
    assert_eq!(error.kind, AgentErrorKind::Provider);
    assert_eq!(error.provider_kind, Some(ProviderErrorKind::Authentication));
}
