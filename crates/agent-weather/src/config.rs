//! Configuration for weather lookups

use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// National Weather Service API base URL
pub const DEFAULT_API_BASE: &str = "https://api.weather.gov";
/// Client identifier sent as `User-Agent`; the NWS API rejects anonymous clients
pub const DEFAULT_USER_AGENT: &str = "ADK Workshop Agent";
/// Note attached to every answer served from the demo table
pub const DEFAULT_DEMO_NOTE: &str = "Demo weather data for workshop";

pub const ENV_API_BASE: &str = "WEATHER_API_BASE";
pub const ENV_USER_AGENT: &str = "WEATHER_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "WEATHER_TIMEOUT_SECS";
pub const ENV_CACHE_TTL_SECS: &str = "WEATHER_CACHE_TTL_SECS";

/// Configuration for weather lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the forecast provider
    pub api_base: String,

    /// Value of the `User-Agent` header on every upstream request
    pub user_agent: String,

    /// Timeout applied to each upstream HTTP call
    pub request_timeout: Duration,

    /// How long a live forecast is reused; `None` disables caching
    pub live_cache_ttl: Option<Duration>,

    /// Disclaimer attached to mocked answers
    pub demo_note: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            live_cache_ttl: Some(Duration::from_secs(300)), // 5 minutes
            demo_note: DEFAULT_DEMO_NOTE.to_string(),
        }
    }
}

impl WeatherConfig {
    /// Create a new configuration builder
    pub fn builder() -> WeatherConfigBuilder {
        WeatherConfigBuilder::default()
    }

    /// Load overrides from the `WEATHER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder()
            .with_env_lookup(|name| std::env::var(name).ok())?
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base).map_err(|e| {
            WeatherError::ConfigError(format!("invalid api_base '{}': {e}", self.api_base))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WeatherError::ConfigError(format!(
                "api_base must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(WeatherError::ConfigError(
                "user_agent must not be empty".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(WeatherError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// `api_base` without a trailing slash
    pub fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

/// Builder for WeatherConfig
#[derive(Debug, Default)]
pub struct WeatherConfigBuilder {
    api_base: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    live_cache_ttl: Option<Option<Duration>>,
    demo_note: Option<String>,
}

impl WeatherConfigBuilder {
    /// Set the forecast provider base URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the `User-Agent` header value
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set how long live forecasts are cached
    pub fn live_cache_ttl(mut self, duration: Duration) -> Self {
        self.live_cache_ttl = Some(Some(duration));
        self
    }

    /// Never cache live forecasts
    pub fn disable_cache(mut self) -> Self {
        self.live_cache_ttl = Some(None);
        self
    }

    /// Set the demo-data disclaimer
    pub fn demo_note(mut self, note: impl Into<String>) -> Self {
        self.demo_note = Some(note.into());
        self
    }

    /// Apply `WEATHER_*` overrides read through `lookup`
    ///
    /// `WEATHER_CACHE_TTL_SECS=0` disables the cache.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api_base = Some(base);
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = Some(agent);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout = Some(Duration::from_secs(parse_secs(ENV_TIMEOUT_SECS, &raw)?));
        }
        if let Some(raw) = lookup(ENV_CACHE_TTL_SECS) {
            let secs = parse_secs(ENV_CACHE_TTL_SECS, &raw)?;
            self.live_cache_ttl = Some((secs > 0).then(|| Duration::from_secs(secs)));
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<WeatherConfig> {
        let defaults = WeatherConfig::default();

        let config = WeatherConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            live_cache_ttl: self.live_cache_ttl.unwrap_or(defaults.live_cache_ttl),
            demo_note: self.demo_note.unwrap_or(defaults.demo_note),
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        WeatherError::ConfigError(format!(
            "{name} must be a whole number of seconds, got '{raw}'"
        ))
    })
}
