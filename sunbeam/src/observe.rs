//! Tracing-backed lifecycle hooks for tool execution.

use std::time::Duration;

use sprovider::ToolCall;
use stooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingToolHooks;

impl ToolRuntimeHooks for TracingToolHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = %tool_call.name,
            tool_call_id = %tool_call.id,
            session_id = %context.session_id
        );
    }

    fn on_execution_finish(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        outcome: Result<&ToolExecutionResult, &ToolError>,
        elapsed: Duration,
    ) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match outcome {
            Ok(result) => tracing::info!(
                phase = "tool",
                event = "execution_success",
                tool_name = %tool_call.name,
                tool_call_id = %tool_call.id,
                session_id = %context.session_id,
                output_len = result.output.len(),
                elapsed_ms
            ),
            Err(error) => tracing::warn!(
                phase = "tool",
                event = "execution_failure",
                tool_name = %tool_call.name,
                tool_call_id = %tool_call.id,
                session_id = %context.session_id,
                error_kind = ?error.kind,
                user_error = error.is_user_error(),
                error = %error,
                elapsed_ms
            ),
        }
    }
}
