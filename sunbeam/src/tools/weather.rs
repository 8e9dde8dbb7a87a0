//! The `get_weather` tool. Its answer is fixed; no weather service is queried.

use schemars::JsonSchema;
use serde::Deserialize;
use stooling::FunctionTool;

pub const GET_WEATHER_TOOL_NAME: &str = "get_weather";
pub const GET_WEATHER_DESCRIPTION: &str = "Get the weather for a given city";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct WeatherArgs {
    /// The name of the city to get weather for
    pub city: String,
}

/// Total over every string: the city is inserted verbatim.
pub fn weather_report(city: &str) -> String {
    format!("It's always sunny in {city}!")
}

pub fn get_weather_tool() -> FunctionTool {
    FunctionTool::typed_sync(
        GET_WEATHER_TOOL_NAME,
        GET_WEATHER_DESCRIPTION,
        |args: WeatherArgs| weather_report(&args.city),
    )
}
