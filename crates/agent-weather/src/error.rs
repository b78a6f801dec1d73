//! Error types for weather lookups

use thiserror::Error;

/// Weather lookup errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The query matched no key in the location table
    #[error("I don't have weather data for {query}. Try: {suggestions}.")]
    UnknownLocation {
        query: String,
        suggestions: String,
    },

    /// A mocked location has no demo forecast loaded
    #[error("No weather data available for {query}")]
    DataInconsistency {
        key: String,
        query: String,
    },

    /// Either forecast API call failed (transport, status, or body shape)
    #[error("API request failed: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Coarse classification used for logging and by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User-correctable: the location is not in the table
    UnknownLocation,
    /// Internal defect in the location tables
    DataInconsistency,
    /// The live forecast provider could not be reached or understood
    UpstreamFailure,
    /// Invalid configuration or location file
    Configuration,
}

impl WeatherError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownLocation { .. } => ErrorKind::UnknownLocation,
            Self::DataInconsistency { .. } => ErrorKind::DataInconsistency,
            Self::Upstream(_) => ErrorKind::UpstreamFailure,
            Self::ConfigError(_) => ErrorKind::Configuration,
        }
    }
}

/// Result type alias for weather operations
pub type Result<T> = std::result::Result<T, WeatherError>;
