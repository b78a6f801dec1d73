//! Application-level configuration

use crate::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable selecting the deployment environment
pub const ENV_ENVIRONMENT: &str = "AGENT_ENV";
/// Environment variable selecting the log output format
pub const ENV_LOG_FORMAT: &str = "AGENT_LOG_FORMAT";
/// Environment variable pointing the file tools at their directory
pub const ENV_TODO_DIR: &str = "AGENT_TODO_DIR";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, etc.)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Directory the file tools may read and write
    pub todo_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "weather-agent".to_string(),
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            todo_dir: PathBuf::from("todos"),
        }
    }
}

impl AppConfig {
    /// Create a configuration for the named application
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    /// Override fields from `AGENT_ENV`, `AGENT_LOG_FORMAT` and `AGENT_TODO_DIR`
    ///
    /// An unparsable log format is reported and otherwise ignored.
    pub fn with_env(mut self) -> Self {
        self.apply_overrides(|name| std::env::var(name).ok());
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(env) = present(ENV_ENVIRONMENT) {
            self.environment = env;
        }
        if let Some(dir) = present(ENV_TODO_DIR) {
            self.todo_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            match raw.parse() {
                Ok(format) => self.log_format = format,
                Err(e) => eprintln!("Ignoring {ENV_LOG_FORMAT}: {e}"),
            }
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.app_name, "weather-agent");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            (ENV_ENVIRONMENT, "production"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_TODO_DIR, "/srv/todos"),
        ]);
        let mut config = AppConfig::new("weather-cli");
        config.apply_overrides(|name| vars.get(name).map(ToString::to_string));

        assert_eq!(config.app_name, "weather-cli");
        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.todo_dir, PathBuf::from("/srv/todos"));
    }

    #[test]
    fn test_invalid_log_format_keeps_default() {
        let vars = HashMap::from([
            (ENV_ENVIRONMENT, ""),
            (ENV_LOG_FORMAT, "yaml"),
            (ENV_TODO_DIR, "  "),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(ToString::to_string));

        assert_eq!(config.environment, "development");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.todo_dir, PathBuf::from("todos"));
    }
}
