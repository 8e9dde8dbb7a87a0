use scommon::BoxFuture;

use crate::{ModelRequest, ModelResponse, ProviderError};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

pub trait ModelProvider: Send + Sync {
    /// Stable identifier used in logs, e.g. `"openrouter"`.
    fn name(&self) -> &str;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;
}
