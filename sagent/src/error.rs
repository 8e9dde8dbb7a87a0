//! Agent-layer errors and conversions from provider and tool failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

use sprovider::{ProviderError, ProviderErrorKind};
use stooling::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    InvalidRequest,
    Provider,
    Tooling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentError {
    pub kind: AgentErrorKind,
    pub message: String,
    /// Set when the failure came from the model provider.
    pub provider_kind: Option<ProviderErrorKind>,
}

impl AgentError {
    pub fn new(kind: AgentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Provider, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Tooling, message)
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for AgentError {}

impl From<ProviderError> for AgentError {
    fn from(value: ProviderError) -> Self {
        let mut error = if value.kind == ProviderErrorKind::InvalidRequest {
            AgentError::invalid_request(value.to_string())
        } else {
            AgentError::provider(value.to_string())
        };
        error.provider_kind = Some(value.kind);
        error
    }
}

impl From<ToolError> for AgentError {
    fn from(value: ToolError) -> Self {
        AgentError::tooling(value.to_string())
    }
}
