//! OpenRouter provider implemented via the OpenAI-compatible transport.

use std::sync::Arc;

use reqwest::Client;

use crate::adapters::openai::{OpenAiAuth, OpenAiHttpTransport, OpenAiRequest, OpenAiTransport};
use crate::{
    CredentialStore, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
};

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENROUTER_DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4.5";
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const OPENROUTER_PROVIDER_NAME: &str = "openrouter";

#[derive(Clone)]
pub struct OpenRouterProvider {
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn OpenAiTransport>,
    fallback_model: String,
}

impl OpenRouterProvider {
    pub fn new(credentials: Arc<CredentialStore>, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            credentials,
            transport,
            fallback_model: OPENROUTER_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client).with_base_url(OPENROUTER_BASE_URL)
    }

    fn resolve_auth(&self) -> Result<OpenAiAuth, ProviderError> {
        self.credentials
            .api_key(OPENROUTER_PROVIDER_NAME)?
            .map(OpenAiAuth::api_key)
            .ok_or_else(|| {
                ProviderError::authentication(format!(
                    "no OpenRouter API key configured; set {OPENROUTER_API_KEY_ENV}"
                ))
            })
    }
}

impl std::fmt::Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("transport", &self.transport)
            .field("fallback_model", &self.fallback_model)
            .finish_non_exhaustive()
    }
}

impl ModelProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        OPENROUTER_PROVIDER_NAME
    }

    fn complete<'a>(
        &'a self,
        mut request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            if request.model.trim().is_empty() {
                request.model = self.fallback_model.clone();
            }
            request.validate()?;

            let auth = self.resolve_auth()?;
            let request = OpenAiRequest::from_model_request(request, &self.fallback_model);
            let response = self.transport.complete(request, auth).await?;
            Ok(response.into_model_response())
        })
    }
}
