//! Weather agent: one OpenRouter-hosted model, one `get_weather` tool.
//!
//! ```rust
//! use sunbeam::tools::weather::{GET_WEATHER_TOOL_NAME, weather_report};
//!
//! assert_eq!(GET_WEATHER_TOOL_NAME, "get_weather");
//! assert_eq!(weather_report("Tokyo"), "It's always sunny in Tokyo!");
//! ```

pub mod cli;
pub mod config;
pub mod observe;
pub mod prompts;
pub mod runtime;
pub mod tools;

pub mod prelude {
    pub use crate::config::{GatewayConfig, build_provider, build_provider_with_credentials};
    pub use crate::observe::TracingToolHooks;
    pub use crate::prompts::{SystemPrompt, WEATHER_IN_TOKYO_QUERY, system_message, user_message};
    pub use crate::runtime::{build_weather_agent, weather_request};
    pub use crate::tools::tool_registry;
    pub use crate::tools::weather::{GET_WEATHER_TOOL_NAME, WeatherArgs, get_weather_tool};
    pub use sagent::{Agent, AgentPolicy, AgentRequest, AgentResult};
}
