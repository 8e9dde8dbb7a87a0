//! Provider-agnostic model types and the OpenAI-compatible gateway adapter.
//!
//! The only shipped provider is [`adapters::openrouter::OpenRouterProvider`],
//! which speaks chat completions through the OpenRouter gateway.

mod credentials;
mod error;
mod model;
mod provider;

pub mod adapters;

pub use credentials::{CredentialStore, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem, Role, StopReason,
    TokenUsage, ToolCall, ToolDefinition, ToolExchange, ToolResult,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use scommon::{GenerationOptions, MetadataMap};
