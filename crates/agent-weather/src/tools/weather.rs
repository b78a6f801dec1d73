//! Tool exposing the weather resolver to an agent runtime

use agent_tools::{Result as ToolResult, Tool, ToolError, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::resolver::LocationWeatherResolver;

/// Name the model calls the tool by
pub const TOOL_NAME: &str = "get_live_weather_forecast";

/// Tool that reports current weather for a free-text location
///
/// Lookup failures come back as a `{"status": "error"}` payload for the model
/// to relay; only malformed parameters are returned as `Err`.
pub struct LiveWeatherForecastTool {
    resolver: Arc<LocationWeatherResolver>,
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    location: String,
}

impl LiveWeatherForecastTool {
    pub fn new(resolver: Arc<LocationWeatherResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Tool for LiveWeatherForecastTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: WeatherParams = serde_json::from_value(params)
            .map_err(|e| ToolError::invalid_parameters(TOOL_NAME, e))?;

        let result = self.resolver.resolve(&params.location).await;
        Ok(serde_json::to_value(result)?)
    }

    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn description(&self) -> &'static str {
        "Gets the current weather forecast for a location. Covers cities in Germany \
         (Munich, Bavaria), Brazil (Rio de Janeiro) and a few United States locations. \
         Use this before recommending outdoor activities."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "location": schema::string(
                    "The city or place name, e.g. \"Munich\", \"Rio de Janeiro\", \
                     \"Bavaria\", or \"San Francisco\""
                )
            }),
            &["location"],
        )
    }
}
