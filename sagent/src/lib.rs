//! Agent orchestration: alternate model turns and tool execution until the
//! model answers without requesting tools.

mod agent;
mod error;
mod types;

pub mod prelude {
    pub use crate::{
        Agent, AgentBuilder, AgentError, AgentErrorKind, AgentPolicy, AgentRequest, AgentResult,
        ToolErrorPolicy,
    };
    pub use stooling::{DefaultToolRuntime, ToolError, ToolRegistry, ToolRuntime};
}

pub use agent::{Agent, AgentBuilder, AgentPolicy, DEFAULT_MAX_TOOL_ROUND_TRIPS, ToolErrorPolicy};
pub use error::{AgentError, AgentErrorKind};
pub use types::{AgentRequest, AgentResult};
