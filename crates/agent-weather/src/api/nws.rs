//! National Weather Service (api.weather.gov) client
//!
//! A forecast takes two requests: `/points/{lat},{lon}` returns the grid
//! metadata for a coordinate, including the URL of its forecast, and that URL
//! returns a list of forecast periods, the first being the current one.
//!
//! The API requires a `User-Agent` identifying the client and only covers
//! the United States.

use crate::config::WeatherConfig;
use crate::error::{Result, WeatherError};
use crate::location::{Coordinates, format_temperature};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two calls of the live forecast flow
///
/// Split so the second call can be skipped (and verified skipped) when the
/// first one fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Look up the forecast URL for a coordinate
    async fn forecast_url(&self, coordinates: &Coordinates) -> Result<String>;

    /// Fetch a forecast URL and return its first period
    async fn current_period(&self, forecast_url: &str) -> Result<ForecastPeriod>;
}

/// One time-bucketed entry of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    /// Period label such as "Tonight" (informational)
    #[serde(default)]
    pub name: Option<String>,
    pub temperature: serde_json::Number,
    pub temperature_unit: String,
    pub detailed_forecast: String,
}

impl ForecastPeriod {
    /// `"<value>°<unit>"`
    pub fn formatted_temperature(&self) -> String {
        format_temperature(&self.temperature, &self.temperature_unit)
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

/// NWS API client
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl NwsClient {
    /// Create a client from the weather configuration
    ///
    /// Every request inherits `config.request_timeout`.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WeatherError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_trimmed().to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// URL of the points endpoint for a coordinate
    pub fn points_url(&self, coordinates: &Coordinates) -> String {
        format!("{}/points/{}", self.base_url, coordinates.path_segment())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, step: &str) -> Result<T> {
        debug!(step, url, "Requesting NWS");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/geo+json")
            .send()
            .await
            .map_err(|e| WeatherError::Upstream(format!("{step} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "{step} request returned {status} for url ({url})"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(format!("failed to parse {step} response: {e}")))
    }
}

#[async_trait]
impl ForecastApi for NwsClient {
    async fn forecast_url(&self, coordinates: &Coordinates) -> Result<String> {
        let url = self.points_url(coordinates);
        let points: PointsResponse = self.get_json(&url, "points").await?;

        points.properties.forecast.ok_or_else(|| {
            WeatherError::Upstream(format!("points response for {coordinates} has no forecast URL"))
        })
    }

    async fn current_period(&self, forecast_url: &str) -> Result<ForecastPeriod> {
        let forecast: ForecastResponse = self.get_json(forecast_url, "forecast").await?;

        forecast
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Upstream("forecast response has no periods".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NwsClient {
        let config = WeatherConfig::builder()
            .api_base(server.uri())
            .request_timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        NwsClient::new(&config).unwrap()
    }

    fn sunnyvale() -> Coordinates {
        "37.3688,-122.0363".parse().unwrap()
    }

    #[test]
    fn test_points_url() {
        let config = WeatherConfig::builder()
            .api_base("https://api.weather.gov/")
            .build()
            .unwrap();
        let client = NwsClient::new(&config).unwrap();
        assert_eq!(
            client.points_url(&sunnyvale()),
            "https://api.weather.gov/points/37.3688,-122.0363"
        );
    }

    #[test]
    fn test_period_temperature_format() {
        let period: ForecastPeriod = serde_json::from_value(json!({
            "name": "Tonight",
            "temperature": 54,
            "temperatureUnit": "F",
            "detailedForecast": "Mostly clear."
        }))
        .unwrap();
        assert_eq!(period.formatted_temperature(), "54°F");
    }

    #[tokio::test]
    async fn test_forecast_url_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/points/37.3688,-122.0363"))
            .and(header("User-Agent", "ADK Workshop Agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "forecast": "https://api.weather.gov/gridpoints/MTR/97,85/forecast"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = client_for(&server).forecast_url(&sunnyvale()).await.unwrap();
        assert_eq!(url, "https://api.weather.gov/gridpoints/MTR/97,85/forecast");
    }

    #[tokio::test]
    async fn test_forecast_url_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).forecast_url(&sunnyvale()).await.unwrap_err();
        assert!(matches!(&err, WeatherError::Upstream(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_forecast_url_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "properties": {} })))
            .mount(&server)
            .await;

        let err = client_for(&server).forecast_url(&sunnyvale()).await.unwrap_err();
        assert!(err.to_string().contains("no forecast URL"));
    }

    #[tokio::test]
    async fn test_current_period_takes_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/MTR/97,85/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": { "periods": [
                    { "name": "Today", "temperature": 68, "temperatureUnit": "F",
                      "detailedForecast": "Sunny, with a high near 68." },
                    { "name": "Tonight", "temperature": 50, "temperatureUnit": "F",
                      "detailedForecast": "Clear." }
                ]}
            })))
            .mount(&server)
            .await;

        let url = format!("{}/gridpoints/MTR/97,85/forecast", server.uri());
        let period = client_for(&server).current_period(&url).await.unwrap();
        assert_eq!(period.name.as_deref(), Some("Today"));
        assert_eq!(period.formatted_temperature(), "68°F");
        assert_eq!(period.detailed_forecast, "Sunny, with a high near 68.");
    }

    #[tokio::test]
    async fn test_current_period_empty_or_malformed() {
        let server = MockServer::start().await;
        Mock::given(path("/empty"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "properties": { "periods": [] } })),
            )
            .mount(&server)
            .await;
        Mock::given(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let err = client
            .current_period(&format!("{}/empty", server.uri()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no periods"));

        let err = client
            .current_period(&format!("{}/garbage", server.uri()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse forecast response"));
    }

    #[tokio::test]
    async fn test_timeout_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let err = client_for(&server).forecast_url(&sunnyvale()).await.unwrap_err();
        assert!(
            matches!(err, WeatherError::Upstream(msg) if msg.starts_with("points request failed"))
        );
    }
}
