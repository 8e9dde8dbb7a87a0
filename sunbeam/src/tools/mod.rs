//! Tools exposed to the weather agent.

pub mod weather;

use stooling::{ToolError, ToolRegistry};

/// Registry holding every tool the agent may call.
pub fn tool_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(weather::get_weather_tool())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_only_get_weather() {
        let registry = tool_registry().expect("registry should build");
        assert_eq!(registry.names(), vec![weather::GET_WEATHER_TOOL_NAME]);
    }
}
