//! Shared primitives for the sunbeam workspace crates.
//!
//! ```rust
//! use scommon::{GenerationOptions, MetadataMap, SessionId};
//!
//! let session = SessionId::from("weather-1");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("origin".to_string(), "cli".to_string());
//!
//! let options = GenerationOptions::default().with_max_tokens(256);
//! assert_eq!(session.as_str(), "weather-1");
//! assert_eq!(options.max_tokens, Some(256));
//! ```

pub mod future {
    //! Boxed future alias used at every async trait seam.
    //!
    //! ```rust
    //! use scommon::BoxFuture;
    //!
    //! fn shout<'a>(value: &'a str) -> BoxFuture<'a, String> {
    //!     Box::pin(async move { value.to_uppercase() })
    //! }
    //!
    //! let _future = shout("sunny");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Invocation identifiers and free-form metadata.

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    /// Opaque per-invocation identifier, used only to correlate log lines.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Default for SessionId {
        fn default() -> Self {
            Self::new("default")
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    impl PartialEq<str> for SessionId {
        fn eq(&self, other: &str) -> bool {
            self.0 == other
        }
    }

    impl PartialEq<&str> for SessionId {
        fn eq(&self, other: &&str) -> bool {
            self.0 == *other
        }
    }
}

pub mod model {
    //! Sampling settings forwarded to the model provider.
    //!
    //! ```rust
    //! use scommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_tokens(128);
    //!
    //! assert_eq!(options.temperature, Some(0.2));
    //! assert_eq!(options.max_tokens, Some(128));
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }
    }
}

pub mod registry {
    //! Keyed map wrapper backing the tool registry.
    //!
    //! ```rust
    //! use scommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! assert!(registry.try_insert("get_weather".to_string(), 1_u32).is_ok());
    //! assert_eq!(registry.try_insert("get_weather".to_string(), 2), Err(2));
    //! assert_eq!(registry.get("get_weather"), Some(&1));
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::collections::hash_map::Entry;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts only when `key` is free; hands the value back otherwise.
        pub fn try_insert(&mut self, key: K, value: V) -> Result<(), V> {
            match self.items.entry(key) {
                Entry::Occupied(_) => Err(value),
                Entry::Vacant(slot) => {
                    slot.insert(value);
                    Ok(())
                }
            }
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.remove(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.items.keys()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.items.values()
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub use context::{MetadataMap, SessionId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use registry::Registry;
