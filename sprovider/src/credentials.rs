//! In-memory API key storage keyed by provider name.
//!
//! ```rust
//! use sprovider::CredentialStore;
//!
//! let store = CredentialStore::new();
//! store.set_api_key("openrouter", "sk-or-v1-example").expect("key should store");
//!
//! let length = store
//!     .with_api_key("openrouter", |key| key.len())
//!     .expect("store should be readable");
//! assert_eq!(length, Some(16));
//! assert_eq!(format!("{:?}", store), "CredentialStore { providers: [\"openrouter\"] }");
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::ProviderError;

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes keep the buffer valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[derive(Default)]
pub struct CredentialStore {
    api_keys: Mutex<HashMap<String, SecretString>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(
        &self,
        provider: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key.into().trim());
        if api_key.is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        self.api_keys()?.insert(provider.into(), api_key);
        Ok(())
    }

    /// Copies the key held in `var` into the store.
    ///
    /// Returns `Ok(false)` when the variable is unset or blank; callers learn
    /// about the missing key from the provider on first use.
    pub fn load_api_key_from_env(
        &self,
        provider: impl Into<String>,
        var: &str,
    ) -> Result<bool, ProviderError> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => {
                self.set_api_key(provider, value)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn has_api_key(&self, provider: &str) -> Result<bool, ProviderError> {
        Ok(self.api_keys()?.contains_key(provider))
    }

    pub fn api_key(&self, provider: &str) -> Result<Option<SecretString>, ProviderError> {
        Ok(self.api_keys()?.get(provider).cloned())
    }

    pub fn with_api_key<R>(
        &self,
        provider: &str,
        f: impl FnOnce(&str) -> R,
    ) -> Result<Option<R>, ProviderError> {
        let api_keys = self.api_keys()?;
        Ok(api_keys.get(provider).map(|secret| f(secret.expose())))
    }

    pub fn clear(&self, provider: &str) -> Result<bool, ProviderError> {
        Ok(self.api_keys()?.remove(provider).is_some())
    }

    fn api_keys(&self) -> Result<MutexGuard<'_, HashMap<String, SecretString>>, ProviderError> {
        self.api_keys
            .lock()
            .map_err(|_| ProviderError::other("credential store lock poisoned"))
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers = match self.api_keys.lock() {
            Ok(api_keys) => api_keys.keys().cloned().collect::<Vec<_>>(),
            Err(_) => Vec::new(),
        };
        providers.sort();

        f.debug_struct("CredentialStore")
            .field("providers", &providers)
            .finish()
    }
}
