//! Location records and the demo forecasts attached to them

use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on Earth
///
/// Keeps the `"lat,lon"` text it was parsed from, so a location table's
/// `coords` string reaches the points endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    segment: String,
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Self::with_segment(latitude, longitude, format!("{latitude},{longitude}"))
    }

    /// Coordinates known to be in range, such as the built-in table's
    pub(crate) fn known(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            segment: format!("{latitude},{longitude}"),
        }
    }

    fn with_segment(latitude: f64, longitude: f64, segment: String) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::ConfigError(format!(
                "coordinates out of range: {latitude},{longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            segment,
        })
    }

    /// `"lat,lon"`, the form the points endpoint takes as a path segment
    pub fn path_segment(&self) -> &str {
        &self.segment
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segment)
    }
}

impl FromStr for Coordinates {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            WeatherError::ConfigError(format!("invalid coordinates '{s}', expected \"lat,lon\""))
        };

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let (lat, lon) = (lat.trim(), lon.trim());
        let latitude = lat.parse().map_err(|_| invalid())?;
        let longitude = lon.parse().map_err(|_| invalid())?;
        Self::with_segment(latitude, longitude, format!("{lat},{lon}"))
    }
}

impl TryFrom<String> for Coordinates {
    type Error = WeatherError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        coordinates.segment
    }
}

/// Unit of a demo temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fixed forecast served for a mocked location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockForecast {
    #[serde(rename = "temp")]
    pub temperature: i32,
    pub unit: TemperatureUnit,
    pub forecast: String,
}

impl MockForecast {
    pub fn new(temperature: i32, unit: TemperatureUnit, forecast: impl Into<String>) -> Self {
        Self {
            temperature,
            unit,
            forecast: forecast.into(),
        }
    }

    /// `"<value>°<unit>"`
    pub fn formatted_temperature(&self) -> String {
        format_temperature(self.temperature, self.unit)
    }
}

/// Where a location's weather comes from
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    /// Answered from the demo table
    Mocked {
        coordinates: Coordinates,
        forecast: MockForecast,
    },
    /// Answered by the live forecast API
    Live(Coordinates),
    /// Flagged as mocked, but no demo forecast was loaded for it
    Unavailable { coordinates: Coordinates },
}

/// One entry of the location table
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    /// Canonical lowercase name matched against queries
    pub key: String,
    pub source: LocationSource,
}

impl LocationRecord {
    pub fn mocked(
        key: impl Into<String>,
        coordinates: Coordinates,
        forecast: MockForecast,
    ) -> Self {
        Self {
            key: key.into(),
            source: LocationSource::Mocked {
                coordinates,
                forecast,
            },
        }
    }

    pub fn live(key: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            key: key.into(),
            source: LocationSource::Live(coordinates),
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        match &self.source {
            LocationSource::Mocked { coordinates, .. }
            | LocationSource::Live(coordinates)
            | LocationSource::Unavailable { coordinates } => coordinates,
        }
    }

    pub fn is_mocked(&self) -> bool {
        !matches!(self.source, LocationSource::Live(_))
    }
}

/// Render a temperature the way every answer reports it, e.g. `"28°C"`
pub fn format_temperature(value: impl fmt::Display, unit: impl fmt::Display) -> String {
    format!("{value}°{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_round_trip_path_segment() {
        let coords: Coordinates = "37.3688,-122.0363".parse().unwrap();
        assert_eq!(coords.latitude, 37.3688);
        assert_eq!(coords.longitude, -122.0363);
        assert_eq!(coords.path_segment(), "37.3688,-122.0363");
    }

    #[test]
    fn test_coordinates_parse_errors() {
        assert!("37.3688".parse::<Coordinates>().is_err());
        assert!("north,west".parse::<Coordinates>().is_err());
        assert!("91.0,0.0".parse::<Coordinates>().is_err());
        assert!("0.0,-181".parse::<Coordinates>().is_err());
        assert!(" 39.0968 , -120.0324 ".parse::<Coordinates>().is_ok());
    }

    #[test]
    fn test_coordinates_keep_original_spelling() {
        let coords: Coordinates = "37.30,-122.0".parse().unwrap();
        assert_eq!(coords.latitude, 37.3);
        assert_eq!(coords.longitude, -122.0);
        assert_eq!(coords.path_segment(), "37.30,-122.0");
        assert_eq!(coords.to_string(), "37.30,-122.0");

        let coords: Coordinates = " 39.0968 , -120.0324 ".parse().unwrap();
        assert_eq!(coords.path_segment(), "39.0968,-120.0324");
    }

    #[test]
    fn test_coordinates_serde_as_string() {
        let coords: Coordinates = serde_json::from_str(r#""37.30,-122.0""#).unwrap();
        assert_eq!(serde_json::to_string(&coords).unwrap(), r#""37.30,-122.0""#);
        assert!(serde_json::from_str::<Coordinates>(r#""north,west""#).is_err());
    }

    #[test]
    fn test_mock_forecast_temperature() {
        let forecast = MockForecast::new(28, TemperatureUnit::Celsius, "Sunny");
        assert_eq!(forecast.formatted_temperature(), "28°C");

        let forecast = MockForecast::new(-4, TemperatureUnit::Fahrenheit, "Snow");
        assert_eq!(forecast.formatted_temperature(), "-4°F");
    }

    #[test]
    fn test_mock_forecast_deserializes_workshop_shape() {
        let forecast: MockForecast = serde_json::from_str(
            r#"{"temp": 18, "unit": "C", "forecast": "Partly cloudy"}"#,
        )
        .unwrap();
        assert_eq!(forecast.temperature, 18);
        assert_eq!(forecast.unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn test_record_coordinates_and_source() {
        let coords = Coordinates::new(48.1351, 11.5820).unwrap();
        let record = LocationRecord::mocked(
            "munich",
            coords.clone(),
            MockForecast::new(18, TemperatureUnit::Celsius, "Cloudy"),
        );
        assert!(record.is_mocked());
        assert_eq!(record.coordinates(), &coords);

        let record = LocationRecord::live("sunnyvale", coords);
        assert!(!record.is_mocked());
    }
}
