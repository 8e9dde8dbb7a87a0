//! Lifecycle hooks around tool execution.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use sprovider::ToolCall;
//! use stooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};
//!
//! struct CountFailures(std::sync::atomic::AtomicUsize);
//!
//! impl ToolRuntimeHooks for CountFailures {
//!     fn on_execution_finish(
//!         &self,
//!         _tool_call: &ToolCall,
//!         _context: &ToolExecutionContext,
//!         outcome: Result<&ToolExecutionResult, &ToolError>,
//!         _elapsed: Duration,
//!     ) {
//!         if outcome.is_err() {
//!             self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use sprovider::ToolCall;

use crate::{ToolError, ToolExecutionContext, ToolExecutionResult};

pub trait ToolRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {}

    /// Called once per call after the tool returns; errors arrive already tagged
    /// with the tool name and call id.
    fn on_execution_finish(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _outcome: Result<&ToolExecutionResult, &ToolError>,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolRuntimeHooks;

impl ToolRuntimeHooks for NoopToolRuntimeHooks {}
