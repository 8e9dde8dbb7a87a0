//! Command-line surface of the `sunbeam` binary.

use std::time::Duration;

use clap::Parser;
use sagent::{AgentPolicy, AgentRequest, DEFAULT_MAX_TOOL_ROUND_TRIPS};
use sprovider::adapters::openrouter::{OPENROUTER_BASE_URL, OPENROUTER_DEFAULT_MODEL};

use crate::config::{DEFAULT_TIMEOUT, GatewayConfig};
use crate::prompts::{SystemPrompt, WEATHER_IN_TOKYO_QUERY};
use crate::runtime::weather_request;

#[derive(Parser, Debug)]
#[command(name = "sunbeam")]
#[command(version)]
#[command(about = "Ask an OpenRouter-hosted model about the weather")]
pub struct Cli {
    /// User query sent to the agent.
    #[arg(long, default_value = WEATHER_IN_TOKYO_QUERY)]
    query: String,

    /// Gateway model identifier.
    #[arg(long, default_value = OPENROUTER_DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible gateway base URL.
    #[arg(long, default_value = OPENROUTER_BASE_URL)]
    base_url: String,

    /// Optional system prompt preset.
    #[arg(long, value_enum)]
    system_prompt: Option<SystemPrompt>,

    /// Maximum number of tool round trips before the agent stops.
    #[arg(long, default_value_t = DEFAULT_MAX_TOOL_ROUND_TRIPS)]
    max_tool_round_trips: u32,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// App URL reported to OpenRouter as HTTP-Referer.
    #[arg(long)]
    app_url: Option<String>,

    /// App name reported to OpenRouter as X-Title.
    #[arg(long)]
    app_title: Option<String>,

    /// Log level (debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Splits the parsed flags into gateway config, agent policy and the request to run.
    pub fn into_parts(self) -> (GatewayConfig, AgentPolicy, AgentRequest) {
        let config = GatewayConfig::default()
            .with_base_url(self.base_url)
            .with_model(self.model)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_attribution(self.app_url, self.app_title);

        let mut policy = AgentPolicy::new(config.model.clone())
            .with_max_tool_round_trips(self.max_tool_round_trips);
        if let Some(preset) = self.system_prompt {
            policy = policy.with_system_prompt(preset.text());
        }

        (config, policy, weather_request(self.query))
    }
}
