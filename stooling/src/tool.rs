//! Tool trait contract and closure-backed tool implementations.
//!
//! ```rust
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use stooling::{FunctionTool, Tool};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct EchoArgs {
//!     /// Text to repeat
//!     text: String,
//! }
//!
//! let tool = FunctionTool::typed_sync("echo", "Repeats the input", |args: EchoArgs| args.text);
//! assert_eq!(tool.definition().name, "echo");
//! assert_eq!(tool.definition().input_schema["required"][0], "text");
//! ```

use std::future::Future;
use std::sync::Arc;

use schemars::JsonSchema;
use scommon::BoxFuture;
use serde::de::DeserializeOwned;
use sprovider::ToolDefinition;

use crate::{ToolError, ToolExecutionContext, args_schema, parse_args};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}

type ToolHandler = dyn Fn(String, ToolExecutionContext) -> ToolFuture<'static, Result<String, ToolError>>
    + Send
    + Sync;

pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    /// Wraps a raw handler that receives the unparsed argument text.
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(String, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |args_json, context| Box::pin(handler(args_json, context)));

        Self {
            definition,
            handler,
        }
    }

    /// Declares a tool whose input schema is derived from `A` and whose
    /// arguments are validated into `A` before `handler` runs.
    pub fn typed<A, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let definition = ToolDefinition {
            name: name.into(),
            description: description.into(),
            input_schema: args_schema::<A>(),
        };
        let handler = Arc::new(handler);

        Self::new(definition, move |args_json, context| {
            let handler = Arc::clone(&handler);
            async move {
                let args = parse_args::<A>(&args_json)?;
                (handler.as_ref())(args, context).await
            }
        })
    }

    /// Typed variant for handlers that are synchronous and cannot fail.
    pub fn typed_sync<A, F>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A) -> String + Send + Sync + 'static,
    {
        Self::typed(name, description, move |args: A, _context| {
            let output = handler(args);
            async move { Ok::<_, ToolError>(output) }
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        let args_json = args_json.to_string();
        let context = context.clone();
        (self.handler)(args_json, context)
    }
}
