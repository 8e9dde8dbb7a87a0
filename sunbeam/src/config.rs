//! Gateway configuration and provider construction.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sprovider::adapters::openrouter::{
    OPENROUTER_API_KEY_ENV, OPENROUTER_BASE_URL, OPENROUTER_DEFAULT_MODEL,
    OPENROUTER_PROVIDER_NAME, OpenRouterProvider,
};
use sprovider::{CredentialStore, ModelProvider, ProviderError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the gateway API key.
    pub api_key_env: String,
    pub timeout: Duration,
    pub extra_headers: Vec<(String, String)>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: OPENROUTER_BASE_URL.to_string(),
            model: OPENROUTER_DEFAULT_MODEL.to_string(),
            api_key_env: OPENROUTER_API_KEY_ENV.to_string(),
            timeout: DEFAULT_TIMEOUT,
            extra_headers: Vec::new(),
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// OpenRouter app attribution, sent as `HTTP-Referer` and `X-Title`.
    pub fn with_attribution(self, app_url: Option<String>, app_title: Option<String>) -> Self {
        let config = match app_url {
            Some(url) => self.with_header("HTTP-Referer", url),
            None => self,
        };
        match app_title {
            Some(title) => config.with_header("X-Title", title),
            None => config,
        }
    }
}

/// Builds the gateway provider, reading the API key from `config.api_key_env`.
///
/// An unset key is not an error here; the provider reports it on first call.
pub fn build_provider(config: &GatewayConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let credentials = Arc::new(CredentialStore::new());
    let loaded =
        credentials.load_api_key_from_env(OPENROUTER_PROVIDER_NAME, &config.api_key_env)?;
    if !loaded {
        tracing::warn!(
            phase = "config",
            event = "api_key_missing",
            api_key_env = %config.api_key_env
        );
    }

    build_provider_with_credentials(config, credentials)
}

pub fn build_provider_with_credentials(
    config: &GatewayConfig,
    credentials: Arc<CredentialStore>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let transport = config.extra_headers.iter().fold(
        OpenRouterProvider::default_http_transport(http).with_base_url(config.base_url.clone()),
        |transport, (name, value)| transport.with_header(name.clone(), value.clone()),
    );

    tracing::debug!(
        phase = "config",
        event = "provider_built",
        base_url = %config.base_url,
        model = %config.model,
        timeout_ms = config.timeout.as_millis() as u64
    );

    let provider = OpenRouterProvider::new(credentials, Arc::new(transport))
        .with_fallback_model(config.model.clone());
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use sprovider::{Message, ModelRequest, ProviderErrorKind};

    use super::*;

    #[test]
    fn defaults_point_at_openrouter() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "anthropic/claude-sonnet-4.5");
        assert_eq!(config.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert!(config.extra_headers.is_empty());
    }

    #[test]
    fn attribution_adds_only_provided_headers() {
        let config = GatewayConfig::default()
            .with_attribution(Some("https://example.test".to_string()), None);
        assert_eq!(
            config.extra_headers,
            vec![("HTTP-Referer".to_string(), "https://example.test".to_string())]
        );

        let config = GatewayConfig::default()
            .with_attribution(None, Some("sunbeam".to_string()));
        assert_eq!(
            config.extra_headers,
            vec![("X-Title".to_string(), "sunbeam".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_key_surfaces_on_first_call() {
        let config =
            GatewayConfig::default().with_api_key_env("SUNBEAM_TEST_UNSET_GATEWAY_KEY");
        let provider = build_provider(&config).expect("provider should build without a key");
        assert_eq!(provider.name(), "openrouter");

        let error = provider
            .complete(ModelRequest::new(
                config.model.clone(),
                vec![Message::user("What's the weather in Tokyo?")],
            ))
            .await
            .expect_err("call without a key must fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }
}
