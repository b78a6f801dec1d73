//! Location-aware weather lookup for LLM agents
//!
//! Resolves a free-text location ("Rio de Janeiro", "near Munich") to current
//! weather. Known locations live in an ordered [`LocationTable`]; each is either
//! served from a fixed demo forecast or, for United States coordinates, looked
//! up live through the National Weather Service two-step API.
//!
//! - [`LocationWeatherResolver`] does the lookup and always returns a
//!   [`WeatherResult`] envelope, never an error
//! - [`tools::LiveWeatherForecastTool`] exposes it as `get_live_weather_forecast`
//! - [`api::ForecastApi`] is the seam to the live provider
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_weather::{LocationTable, LocationWeatherResolver, WeatherConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> agent_weather::Result<()> {
//! let config = WeatherConfig::from_env()?;
//! let table = Arc::new(LocationTable::builtin());
//! let resolver = LocationWeatherResolver::from_config(&config, table)?;
//!
//! let result = resolver.resolve("Rio de Janeiro").await;
//! println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod location;
pub mod resolver;
pub mod table;
pub mod tools;

pub use config::WeatherConfig;
pub use error::{ErrorKind, Result, WeatherError};
pub use location::{Coordinates, LocationRecord, LocationSource, MockForecast, TemperatureUnit};
pub use resolver::{LocationWeatherResolver, WeatherReport, WeatherResult};
pub use table::LocationTable;
pub use tools::LiveWeatherForecastTool;

use agent_tools::ToolRegistry;
use agent_tools::builtin::{self, TodoSandbox};
use std::sync::Arc;

/// Build a registry holding the weather tool, wired from `config`, next to
/// the built-in tools with file access confined to `sandbox`
pub fn tool_registry(
    config: &WeatherConfig,
    table: Arc<LocationTable>,
    sandbox: &TodoSandbox,
) -> Result<ToolRegistry> {
    let resolver = Arc::new(LocationWeatherResolver::from_config(config, table)?);
    let registry = ToolRegistry::new();
    registry.register(Arc::new(LiveWeatherForecastTool::new(resolver)));
    builtin::register_builtin_tools(&registry, sandbox);
    Ok(registry)
}
