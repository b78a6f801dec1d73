//! Resolve a free-text location to its current weather

use crate::api::{ForecastApi, NwsClient};
use crate::cache::ForecastCache;
use crate::config::{DEFAULT_DEMO_NOTE, WeatherConfig};
use crate::error::{ErrorKind, Result, WeatherError};
use crate::location::{Coordinates, LocationSource};
use crate::table::LocationTable;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Successful weather answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// `"<value>°<unit>"`
    pub temperature: String,
    pub forecast: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Envelope handed back to the calling agent
///
/// Serializes as `{"status": "success", "temperature": .., "forecast": ..}` or
/// `{"status": "error", "message": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WeatherResult {
    Success(WeatherReport),
    Error { message: String },
}

impl WeatherResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Looks up weather for free-text locations
///
/// Holds no mutable state apart from the optional live-forecast cache, so one
/// resolver can serve concurrent callers.
pub struct LocationWeatherResolver {
    table: Arc<LocationTable>,
    api: Arc<dyn ForecastApi>,
    cache: Option<ForecastCache>,
    demo_note: String,
}

impl LocationWeatherResolver {
    /// Create a resolver over an injected table and forecast API, without caching
    pub fn new(table: Arc<LocationTable>, api: Arc<dyn ForecastApi>) -> Self {
        Self {
            table,
            api,
            cache: None,
            demo_note: DEFAULT_DEMO_NOTE.to_string(),
        }
    }

    /// Create a resolver backed by the NWS client described by `config`
    pub fn from_config(config: &WeatherConfig, table: Arc<LocationTable>) -> Result<Self> {
        config.validate()?;
        let api = Arc::new(NwsClient::new(config)?);

        let mut resolver = Self::new(table, api).with_demo_note(config.demo_note.clone());
        if let Some(ttl) = config.live_cache_ttl {
            resolver = resolver.with_cache(ForecastCache::new(ttl));
        }
        Ok(resolver)
    }

    /// Cache successful live forecasts
    pub fn with_cache(mut self, cache: ForecastCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the disclaimer attached to mocked answers
    pub fn with_demo_note(mut self, note: impl Into<String>) -> Self {
        self.demo_note = note.into();
        self
    }

    pub fn table(&self) -> &LocationTable {
        &self.table
    }

    /// Resolve a location query into the result envelope
    ///
    /// Never fails: every error is folded into [`WeatherResult::Error`] after
    /// being logged according to its kind.
    #[instrument(name = "get_live_weather_forecast", skip_all, fields(location = %location_query))]
    pub async fn resolve(&self, location_query: &str) -> WeatherResult {
        info!("Weather tool called");

        match self.lookup(location_query).await {
            Ok(report) => WeatherResult::Success(report),
            Err(err) => {
                match err.kind() {
                    ErrorKind::UnknownLocation => warn!("No known location in query"),
                    ErrorKind::DataInconsistency => {
                        error!(error = %err, "Location table is missing a demo forecast");
                    }
                    ErrorKind::UpstreamFailure => {
                        warn!(error = %err, "Live forecast lookup failed");
                    }
                    ErrorKind::Configuration => {
                        error!(error = %err, "Weather lookup misconfigured");
                    }
                }
                WeatherResult::error(err.to_string())
            }
        }
    }

    /// Resolve a location query, returning the typed error on failure
    pub async fn lookup(&self, location_query: &str) -> Result<WeatherReport> {
        let record = self.table.find(location_query).ok_or_else(|| {
            WeatherError::UnknownLocation {
                query: location_query.to_string(),
                suggestions: self.table.suggestions().to_string(),
            }
        })?;

        match &record.source {
            LocationSource::Mocked { forecast, .. } => Ok(WeatherReport {
                temperature: forecast.formatted_temperature(),
                forecast: forecast.forecast.clone(),
                note: Some(self.demo_note.clone()),
            }),
            LocationSource::Unavailable { .. } => Err(WeatherError::DataInconsistency {
                key: record.key.clone(),
                query: location_query.to_string(),
            }),
            LocationSource::Live(coordinates) => self.live_report(&record.key, coordinates).await,
        }
    }

    async fn live_report(&self, key: &str, coordinates: &Coordinates) -> Result<WeatherReport> {
        let fetch = move || async move {
            let forecast_url = self.api.forecast_url(coordinates).await?;
            let period = self.api.current_period(&forecast_url).await?;
            Ok::<_, WeatherError>(period)
        };

        let period = match &self.cache {
            Some(cache) => cache.get_or_fetch(key, fetch).await?,
            None => fetch().await?,
        };

        Ok(WeatherReport {
            temperature: period.formatted_temperature(),
            forecast: period.detailed_forecast,
            note: None,
        })
    }
}
