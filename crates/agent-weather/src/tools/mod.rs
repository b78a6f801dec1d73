//! Agent-facing tools

pub mod weather;

pub use weather::{LiveWeatherForecastTool, TOOL_NAME as WEATHER_TOOL_NAME};
