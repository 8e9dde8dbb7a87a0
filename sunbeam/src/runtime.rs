//! Agent wiring for the weather tool set.

use std::sync::Arc;

use sagent::{Agent, AgentPolicy, AgentRequest};
use sprovider::ModelProvider;
use stooling::{DefaultToolRuntime, ToolError};

use crate::observe::TracingToolHooks;
use crate::prompts::user_message;
use crate::tools::tool_registry;

pub fn build_weather_agent(
    provider: Arc<dyn ModelProvider>,
    policy: AgentPolicy,
) -> Result<Agent, ToolError> {
    let runtime = DefaultToolRuntime::new(Arc::new(tool_registry()?))
        .with_hooks(Arc::new(TracingToolHooks));

    Ok(Agent::builder(provider)
        .tool_runtime(Arc::new(runtime))
        .policy(policy)
        .build())
}

/// Single-turn conversation holding `query` as the user message.
pub fn weather_request(query: impl Into<String>) -> AgentRequest {
    AgentRequest::new(vec![user_message(query)])
}
