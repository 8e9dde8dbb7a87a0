//! Typed argument parsing and JSON Schema derivation for tools.
//!
//! ```rust
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use stooling::{args_schema, parse_args};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct LookupArgs {
//!     /// Search phrase
//!     query: String,
//! }
//!
//! let args: LookupArgs = parse_args(r#"{"query":"rust"}"#).expect("args should parse");
//! assert_eq!(args.query, "rust");
//!
//! let schema = args_schema::<LookupArgs>();
//! assert_eq!(schema["properties"]["query"]["description"], "Search phrase");
//! ```

use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ToolError;

/// Deserializes raw model-produced argument text into `T`.
///
/// Blank input is read as `{}` since some models omit arguments for
/// parameterless calls.
pub fn parse_args<T>(args_json: &str) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    let args_json = if args_json.trim().is_empty() {
        "{}"
    } else {
        args_json
    };

    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid arguments: {err}")))
}

/// Root JSON Schema for `T` with subschemas inlined and no `$schema` marker.
pub fn args_schema<T>() -> Value
where
    T: JsonSchema,
{
    let settings = SchemaSettings::default().with(|settings| {
        settings.inline_subschemas = true;
    });
    let mut schema = settings
        .into_generator()
        .into_root_schema_for::<T>()
        .to_value();

    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
    }
    schema
}
