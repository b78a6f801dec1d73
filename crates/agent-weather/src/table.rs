//! The ordered location table queries are matched against
//!
//! Matching is "first key wins": keys are scanned in table order and the first
//! one contained in the lowercased query is selected, even when a longer key
//! would also match. The built-in table lists `"rio de janeiro"` before
//! `"rio"`, so both resolve to the same forecast either way.

use crate::error::{Result, WeatherError};
use crate::location::{
    Coordinates, LocationRecord, LocationSource, MockForecast, TemperatureUnit,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Suggestion text used in "unknown location" answers for the built-in table
pub const BUILTIN_SUGGESTIONS: &str = "Munich, Bavaria, Rio de Janeiro, or US cities";

/// Immutable, ordered set of known locations
#[derive(Debug, Clone)]
pub struct LocationTable {
    records: Vec<LocationRecord>,
    suggestions: String,
}

/// On-disk form: the location list and the demo forecasts as two tables
#[derive(Debug, Deserialize)]
pub struct RawLocationTables {
    #[serde(default)]
    pub suggestions: Option<String>,
    pub locations: Vec<RawLocation>,
    #[serde(default)]
    pub mock_weather: HashMap<String, MockForecast>,
}

/// A location as written in a table file
///
/// Mocked entries usually carry `lat`/`lon`, live entries a `coords` string.
#[derive(Debug, Deserialize)]
pub struct RawLocation {
    pub key: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub coords: Option<String>,
    #[serde(default)]
    pub mock: bool,
}

impl RawLocation {
    fn coordinates(&self) -> Result<Coordinates> {
        match (&self.coords, self.lat, self.lon) {
            (Some(coords), _, _) => coords.parse(),
            (None, Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => Err(WeatherError::ConfigError(format!(
                "location '{}' needs either \"coords\" or both \"lat\" and \"lon\"",
                self.key
            ))),
        }
    }
}

impl LocationTable {
    /// Build a table from records, keeping their order
    pub fn new(records: Vec<LocationRecord>, suggestions: impl Into<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if record.key.trim().is_empty() {
                return Err(WeatherError::ConfigError("location key must not be empty".to_string()));
            }
            if record.key != record.key.to_lowercase() {
                return Err(WeatherError::ConfigError(format!(
                    "location key '{}' must be lowercase",
                    record.key
                )));
            }
            if !seen.insert(record.key.as_str()) {
                return Err(WeatherError::ConfigError(format!(
                    "duplicate location key '{}'",
                    record.key
                )));
            }
        }

        Ok(Self {
            records,
            suggestions: suggestions.into(),
        })
    }

    /// Assemble a table from the two-table file form
    ///
    /// A location flagged `mock` without a matching `mock_weather` entry is kept
    /// as [`LocationSource::Unavailable`] so lookups can report it.
    pub fn from_raw(raw: RawLocationTables) -> Result<Self> {
        let RawLocationTables {
            suggestions,
            locations,
            mut mock_weather,
        } = raw;

        let mut records = Vec::with_capacity(locations.len());
        for location in locations {
            let coordinates = location.coordinates()?;
            let source = if location.mock {
                match mock_weather.remove(&location.key) {
                    Some(forecast) => LocationSource::Mocked {
                        coordinates,
                        forecast,
                    },
                    None => {
                        tracing::warn!(key = %location.key, "Mocked location has no demo forecast");
                        LocationSource::Unavailable { coordinates }
                    }
                }
            } else {
                LocationSource::Live(coordinates)
            };
            records.push(LocationRecord {
                key: location.key,
                source,
            });
        }

        for key in mock_weather.keys() {
            tracing::debug!(key = %key, "Demo forecast has no matching location");
        }

        let suggestions = suggestions.unwrap_or_else(|| {
            records
                .iter()
                .take(3)
                .map(|r| r.key.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        });

        Self::new(records, suggestions)
    }

    /// Parse a table from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawLocationTables = serde_json::from_str(json)
            .map_err(|e| WeatherError::ConfigError(format!("invalid location table: {e}")))?;
        Self::from_raw(raw)
    }

    /// Load a table from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            WeatherError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// The workshop locations: Bavaria and Rio (mocked) and three US spots (live)
    pub fn builtin() -> Self {
        fn mocked(key: &str, lat: f64, lon: f64, temp: i32, forecast: &str) -> LocationRecord {
            LocationRecord::mocked(
                key,
                Coordinates::known(lat, lon),
                MockForecast::new(temp, TemperatureUnit::Celsius, forecast),
            )
        }

        fn live(key: &str, lat: f64, lon: f64) -> LocationRecord {
            LocationRecord::live(key, Coordinates::known(lat, lon))
        }

        const MUNICH: &str = "Partly cloudy with a chance of afternoon showers. \
                              Perfect weather for exploring the city's beer gardens!";
        const BAVARIA: &str = "Clear skies and mild temperatures. \
                               Excellent conditions for mountain hiking in the Alps.";
        const KONIGSEE: &str =
            "Cool and clear. Ideal for boat tours on the lake with stunning mountain views.";
        const NEUSCHWANSTEIN: &str =
            "Crisp mountain air with excellent visibility for castle tours.";
        const BERLIN: &str =
            "Mild and breezy. Great weather for exploring museums and outdoor attractions.";
        const NUREMBERG: &str = "Pleasant conditions for walking the historic old town.";
        const RIO: &str = "Sunny and hot with occasional sea breeze. Perfect beach weather!";
        const COPACABANA: &str = "Hot and sunny. Ideal for beach activities and swimming.";
        const IPANEMA: &str = "Beautiful beach weather with light ocean breeze.";

        let records = vec![
            // Germany
            mocked("munich", 48.1351, 11.5820, 18, MUNICH),
            mocked("bavaria", 48.7904, 11.4979, 16, BAVARIA),
            mocked("königsee", 47.5947, 12.9755, 14, KONIGSEE),
            mocked("konigsee", 47.5947, 12.9755, 14, KONIGSEE),
            mocked("neuschwanstein", 47.5576, 10.7498, 12, NEUSCHWANSTEIN),
            mocked("berlin", 52.5200, 13.4050, 17, BERLIN),
            mocked("nuremberg", 49.4521, 11.0767, 16, NUREMBERG),
            // Brazil
            mocked("rio de janeiro", -22.9068, -43.1729, 28, RIO),
            mocked("rio", -22.9068, -43.1729, 28, RIO),
            mocked("copacabana", -22.9711, -43.1822, 29, COPACABANA),
            mocked("ipanema", -22.9838, -43.2096, 28, IPANEMA),
            // United States (NWS coverage)
            live("sunnyvale", 37.3688, -122.0363),
            live("san francisco", 37.7749, -122.4194),
            live("lake tahoe", 39.0968, -120.0324),
        ];

        Self {
            records,
            suggestions: BUILTIN_SUGGESTIONS.to_string(),
        }
    }

    /// First record whose key occurs in the lowercased query
    pub fn find(&self, query: &str) -> Option<&LocationRecord> {
        let normalized = query.to_lowercase();
        self.records
            .iter()
            .find(|record| normalized.contains(record.key.as_str()))
    }

    /// Keys in match order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Example locations listed when a query matches nothing
    pub fn suggestions(&self) -> &str {
        &self.suggestions
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for LocationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_is_pinned() {
        let table = LocationTable::builtin();
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(
            keys,
            vec![
                "munich",
                "bavaria",
                "königsee",
                "konigsee",
                "neuschwanstein",
                "berlin",
                "nuremberg",
                "rio de janeiro",
                "rio",
                "copacabana",
                "ipanema",
                "sunnyvale",
                "san francisco",
                "lake tahoe",
            ]
        );
    }

    #[test]
    fn test_builtin_is_valid_and_consistent() {
        let table = LocationTable::builtin();
        // Re-run validation on the built-in records
        let validated = LocationTable::new(table.records().to_vec(), table.suggestions()).unwrap();
        assert_eq!(validated.len(), 14);

        assert!(
            table
                .records()
                .iter()
                .all(|r| !matches!(r.source, LocationSource::Unavailable { .. }))
        );
        assert_eq!(table.records().iter().filter(|r| !r.is_mocked()).count(), 3);
    }

    #[test]
    fn test_find_first_match_wins() {
        let table = LocationTable::builtin();

        let record = table.find("I love rio de janeiro beaches").unwrap();
        assert_eq!(record.key, "rio de janeiro");

        // "munich" precedes "bavaria" in table order
        let record = table.find("Bavaria, near Munich").unwrap();
        assert_eq!(record.key, "munich");

        // Substring matching also fires inside unrelated words
        let record = table.find("Superior").unwrap();
        assert_eq!(record.key, "rio");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let table = LocationTable::builtin();
        assert_eq!(table.find("KÖNIGSEE").unwrap().key, "königsee");
        assert_eq!(table.find("San Francisco, CA").unwrap().key, "san francisco");
        assert!(table.find("randomnonsenseplace").is_none());
    }

    #[test]
    fn test_new_rejects_invalid_keys() {
        let coords = Coordinates::new(0.0, 0.0).unwrap();

        let dup = vec![
            LocationRecord::live("a", coords.clone()),
            LocationRecord::live("a", coords.clone()),
        ];
        assert!(LocationTable::new(dup, "a").is_err());

        let upper = vec![LocationRecord::live("Paris", coords.clone())];
        assert!(LocationTable::new(upper, "Paris").is_err());

        let empty = vec![LocationRecord::live("", coords)];
        assert!(LocationTable::new(empty, "").is_err());
    }

    #[test]
    fn test_from_json_two_tables() {
        let table = LocationTable::from_json_str(
            r#"{
                "locations": [
                    {"key": "munich", "lat": 48.1351, "lon": 11.5820, "mock": true},
                    {"key": "berlin", "lat": 52.52, "lon": 13.405, "mock": true},
                    {"key": "sunnyvale", "coords": "37.3688,-122.0363", "mock": false}
                ],
                "mock_weather": {
                    "munich": {"temp": 18, "unit": "C", "forecast": "Partly cloudy"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.suggestions(), "munich, berlin, sunnyvale");
        assert!(matches!(table.records()[0].source, LocationSource::Mocked { .. }));
        assert!(matches!(table.records()[1].source, LocationSource::Unavailable { .. }));
        assert_eq!(
            table.records()[2].source,
            LocationSource::Live(Coordinates::new(37.3688, -122.0363).unwrap())
        );
    }

    #[test]
    fn test_from_json_keeps_coords_spelling() {
        let table = LocationTable::from_json_str(
            r#"{"locations": [{"key": "cupertino", "coords": "37.30,-122.0", "mock": false}]}"#,
        )
        .unwrap();

        assert_eq!(table.records()[0].coordinates().path_segment(), "37.30,-122.0");
    }

    #[test]
    fn test_builtin_live_segments() {
        let table = LocationTable::builtin();
        let segments: Vec<_> = table
            .records()
            .iter()
            .filter(|r| !r.is_mocked())
            .map(|r| r.coordinates().path_segment().to_string())
            .collect();
        assert_eq!(
            segments,
            vec!["37.3688,-122.0363", "37.7749,-122.4194", "39.0968,-120.0324"]
        );
    }

    #[test]
    fn test_from_json_missing_coordinates() {
        let result = LocationTable::from_json_str(
            r#"{"locations": [{"key": "atlantis", "lat": 1.0, "mock": false}]}"#,
        );
        assert!(matches!(result, Err(WeatherError::ConfigError(msg)) if msg.contains("atlantis")));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = LocationTable::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(WeatherError::ConfigError(_))));
    }
}
