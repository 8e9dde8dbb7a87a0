#[cfg(feature = "provider-openrouter")]
pub mod openai;

#[cfg(feature = "provider-openrouter")]
pub mod openrouter;
