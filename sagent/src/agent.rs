//! Agent builder, policy and the bounded tool loop.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sagent::{Agent, AgentPolicy, AgentRequest};
//! use sprovider::{Message, ModelProvider};
//! use stooling::{DefaultToolRuntime, ToolRegistry};
//!
//! async fn ask(provider: Arc<dyn ModelProvider>) -> Result<String, sagent::AgentError> {
//!     let runtime = Arc::new(DefaultToolRuntime::new(Arc::new(ToolRegistry::new())));
//!     let agent = Agent::builder(provider)
//!         .tool_runtime(runtime)
//!         .policy(AgentPolicy::new("anthropic/claude-sonnet-4.5").with_max_tool_round_trips(3))
//!         .build();
//!
//!     let result = agent
//!         .invoke(AgentRequest::new(vec![Message::user("What's the weather in Tokyo?")]))
//!         .await?;
//!     Ok(result.final_message)
//! }
//! ```

use std::sync::Arc;

use scommon::GenerationOptions;
use sprovider::{
    Message, ModelProvider, ModelRequest, OutputItem, Role, TokenUsage, ToolCall, ToolExchange,
    ToolResult,
};
use stooling::{ToolExecutionContext, ToolRuntime};

use crate::{AgentError, AgentRequest, AgentResult};

pub const DEFAULT_MAX_TOOL_ROUND_TRIPS: u32 = 10;

/// What happens when a requested tool fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolErrorPolicy {
    /// Send `Error: <tool error>` back as that call's output and let the model recover.
    #[default]
    ReportToModel,
    /// Abort the invocation with a tooling error.
    FailTurn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentPolicy {
    pub model: String,
    pub system_prompt: Option<String>,
    pub options: GenerationOptions,
    pub max_tool_round_trips: u32,
    pub tool_errors: ToolErrorPolicy,
}

impl AgentPolicy {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            options: GenerationOptions::default(),
            max_tool_round_trips: DEFAULT_MAX_TOOL_ROUND_TRIPS,
            tool_errors: ToolErrorPolicy::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_tool_round_trips(mut self, max_tool_round_trips: u32) -> Self {
        self.max_tool_round_trips = max_tool_round_trips;
        self
    }

    pub fn with_tool_errors(mut self, tool_errors: ToolErrorPolicy) -> Self {
        self.tool_errors = tool_errors;
        self
    }
}

#[derive(Clone)]
pub struct Agent {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: AgentPolicy,
}

impl Agent {
    pub fn builder(provider: Arc<dyn ModelProvider>) -> AgentBuilder {
        AgentBuilder::new(provider)
    }

    pub async fn invoke(&self, request: AgentRequest) -> Result<AgentResult, AgentError> {
        if request.messages.is_empty() {
            return Err(AgentError::invalid_request(
                "conversation must contain at least one message",
            ));
        }

        let AgentRequest {
            session_id,
            messages,
            metadata,
        } = request;

        let conversation = self.prepare_conversation(messages);
        let tools = self
            .tool_runtime
            .as_ref()
            .map(|runtime| runtime.definitions())
            .unwrap_or_default();
        let context = ToolExecutionContext {
            session_id: session_id.clone(),
            metadata: metadata.clone(),
        };

        let mut exchanges = Vec::<ToolExchange>::new();
        let mut usage = TokenUsage::default();
        let mut model_calls = 0_u32;

        loop {
            let builder = ModelRequest::builder(self.policy.model.clone())
                .messages(conversation.clone())
                .options(self.policy.options)
                .tools(tools.clone())
                .tool_exchanges(exchanges.clone());
            let model_request = metadata
                .iter()
                .fold(builder, |builder, (key, value)| {
                    builder.metadata(key.clone(), value.clone())
                })
                .metadata("session_id", session_id.as_str())
                .build()?;
            let response = self.provider.complete(model_request).await?;
            model_calls += 1;
            usage.accumulate(response.usage);

            let (text, tool_calls) = collect_output(response.output);
            tracing::info!(
                phase = "agent",
                event = "model_response",
                provider = self.provider.name(),
                session_id = %session_id,
                model_calls,
                tool_calls = tool_calls.len(),
                stop_reason = ?response.stop_reason
            );

            if tool_calls.is_empty() {
                return Ok(AgentResult {
                    session_id,
                    conversation,
                    tool_exchanges: exchanges,
                    final_message: text,
                    stop_reason: response.stop_reason,
                    usage,
                    model_calls,
                    tool_round_limit_reached: false,
                });
            }

            let rounds = u32::try_from(exchanges.len()).unwrap_or(u32::MAX);
            if rounds >= self.policy.max_tool_round_trips {
                tracing::warn!(
                    phase = "agent",
                    event = "tool_round_limit_reached",
                    session_id = %session_id,
                    max_tool_round_trips = self.policy.max_tool_round_trips,
                    pending_tool_calls = tool_calls.len()
                );
                return Ok(AgentResult {
                    session_id,
                    conversation,
                    tool_exchanges: exchanges,
                    final_message: text,
                    stop_reason: response.stop_reason,
                    usage,
                    model_calls,
                    tool_round_limit_reached: true,
                });
            }

            let exchange = self.run_tools(text, tool_calls, &context).await?;
            exchanges.push(exchange);
        }
    }

    fn prepare_conversation(&self, messages: Vec<Message>) -> Vec<Message> {
        let starts_with_system = messages
            .first()
            .is_some_and(|message| message.role == Role::System);

        match &self.policy.system_prompt {
            Some(prompt) if !starts_with_system => {
                let mut conversation = Vec::with_capacity(messages.len() + 1);
                conversation.push(Message::system(prompt.clone()));
                conversation.extend(messages);
                conversation
            }
            _ => messages,
        }
    }

    /// Executes the calls of one model turn sequentially, in model order.
    async fn run_tools(
        &self,
        assistant_content: String,
        tool_calls: Vec<ToolCall>,
        context: &ToolExecutionContext,
    ) -> Result<ToolExchange, AgentError> {
        let runtime = self.tool_runtime.as_ref().ok_or_else(|| {
            AgentError::tooling("model requested tools but no tool runtime is configured")
        })?;

        let mut exchange = ToolExchange::new(assistant_content, tool_calls.clone());
        for call in tool_calls {
            let tool_call_id = call.id.clone();
            let result = match runtime.execute(call, context.clone()).await {
                Ok(result) => result.into_tool_result(),
                Err(error) => match self.policy.tool_errors {
                    ToolErrorPolicy::ReportToModel => ToolResult {
                        tool_call_id,
                        output: format!("Error: {error}"),
                    },
                    ToolErrorPolicy::FailTurn => return Err(error.into()),
                },
            };

            exchange = exchange.with_result(result);
        }

        Ok(exchange)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("provider", &self.provider.name())
            .field("has_tool_runtime", &self.tool_runtime.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}

pub struct AgentBuilder {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: AgentPolicy,
}

impl AgentBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            tool_runtime: None,
            policy: AgentPolicy::new(""),
        }
    }

    pub fn tool_runtime(mut self, tool_runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tool_runtime = Some(tool_runtime);
        self
    }

    pub fn policy(mut self, policy: AgentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.policy.model = model.into();
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.policy.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn max_tool_round_trips(mut self, max_tool_round_trips: u32) -> Self {
        self.policy.max_tool_round_trips = max_tool_round_trips;
        self
    }

    pub fn build(self) -> Agent {
        Agent {
            provider: self.provider,
            tool_runtime: self.tool_runtime,
            policy: self.policy,
        }
    }
}

fn collect_output(items: Vec<OutputItem>) -> (String, Vec<ToolCall>) {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for item in items {
        match item {
            OutputItem::Message(message) => {
                if message.role == Role::Assistant {
                    text.push_str(&message.content);
                }
            }
            OutputItem::ToolCall(call) => tool_calls.push(call),
        }
    }

    (text, tool_calls)
}
