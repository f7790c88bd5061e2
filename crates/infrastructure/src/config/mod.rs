//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `AEROWEATHER__`-prefixed environment variables.

use std::{path::Path, time::Duration};

use domain::{DomainError, StationSet};
use integration_aviationweather::AviationWeatherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "AEROWEATHER";

/// Separator for both the prefix and nested keys
pub const ENV_SEPARATOR: &str = "__";

/// Default polling interval in seconds
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 600;

const MIN_SCAN_INTERVAL_SECS: u64 = 60;
const MAX_SCAN_INTERVAL_SECS: u64 = 86_400;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// A configured station identifier is malformed
    #[error("Invalid station list: {0}")]
    Station(#[from] DomainError),
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Station identifiers to poll, as entered by the user
    #[serde(default)]
    pub stations: Vec<String>,

    /// Polling interval in seconds (default: 600)
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,

    /// Prefix for sensor unique ids
    #[serde(default = "default_instance_id")]
    pub instance_id: String,

    /// Aviation weather service configuration
    #[serde(default)]
    pub aviation_weather: AviationWeatherConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

const fn default_scan_interval() -> u64 {
    DEFAULT_SCAN_INTERVAL_SECS
}

fn default_instance_id() -> String {
    "aeroweather".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stations: Vec::new(),
            scan_interval_secs: default_scan_interval(),
            instance_id: default_instance_id(),
            aviation_weather: AviationWeatherConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Environment source with the application's prefix and list handling
///
/// `AEROWEATHER__STATIONS=KLAX,KSFO` yields a two-element list.
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .list_separator(",")
        .with_list_parse_key("stations")
        .try_parsing(true)
}

impl AppConfig {
    /// Load configuration from the process environment and an optional file
    ///
    /// Without `path`, `config.toml` in the working directory is used when it
    /// exists. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    /// Load configuration with a custom environment source
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("scan_interval_secs", DEFAULT_SCAN_INTERVAL_SECS)?
            .set_default("instance_id", default_instance_id())?
            .add_source(file)
            .add_source(env);

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and station identifiers
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SCAN_INTERVAL_SECS..=MAX_SCAN_INTERVAL_SECS).contains(&self.scan_interval_secs) {
            return Err(ConfigError::Validation(format!(
                "scan_interval_secs must be between {MIN_SCAN_INTERVAL_SECS} and \
                 {MAX_SCAN_INTERVAL_SECS}, got {}",
                self.scan_interval_secs
            )));
        }

        if !(1..=MAX_TIMEOUT_SECS).contains(&self.aviation_weather.timeout_secs) {
            return Err(ConfigError::Validation(format!(
                "aviation_weather.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                self.aviation_weather.timeout_secs
            )));
        }

        let base_url = &self.aviation_weather.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "aviation_weather.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }

        if self.instance_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "instance_id must not be empty".to_string(),
            ));
        }

        self.station_set()?;
        Ok(())
    }

    /// Normalized station set
    pub fn station_set(&self) -> Result<StationSet, ConfigError> {
        Ok(StationSet::parse(&self.stations)?)
    }

    /// Polling interval
    pub const fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), (*value).to_string());
        }
        environment().source(Some(map))
    }

    fn write_toml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert!(config.stations.is_empty());
        assert_eq!(config.scan_interval_secs, 600);
        assert_eq!(config.instance_id, "aeroweather");
        assert_eq!(config.aviation_weather.timeout_secs, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let config = AppConfig::load_with_env(Some(&path), env_from(&[])).unwrap();
        assert!(config.stations.is_empty());
        assert_eq!(config.scan_interval(), Duration::from_secs(600));
        assert_eq!(
            config.aviation_weather.base_url,
            "https://aviationweather.gov/api/data"
        );
    }

    #[test]
    fn load_from_toml_file() {
        let file = write_toml(
            r#"
stations = ["klax", "ksfo"]
scan_interval_secs = 900
instance_id = "home"

[aviation_weather]
timeout_secs = 10

[telemetry]
json = true
"#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), env_from(&[])).unwrap();
        assert_eq!(config.stations, vec!["klax", "ksfo"]);
        assert_eq!(config.scan_interval_secs, 900);
        assert_eq!(config.instance_id, "home");
        assert_eq!(config.aviation_weather.timeout_secs, 10);
        assert!(config.telemetry.json);
        assert_eq!(config.station_set().unwrap().joined(), "KLAX,KSFO");
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_toml("stations = [\"EDDF\"]\nscan_interval_secs = 900\n");

        let env = env_from(&[
            ("AEROWEATHER__STATIONS", "KLAX,KSFO"),
            ("AEROWEATHER__SCAN_INTERVAL_SECS", "120"),
            ("AEROWEATHER__AVIATION_WEATHER__BASE_URL", "http://localhost:8080"),
        ]);
        let config = AppConfig::load_with_env(Some(file.path()), env).unwrap();

        assert_eq!(config.stations, vec!["KLAX", "KSFO"]);
        assert_eq!(config.scan_interval_secs, 120);
        assert_eq!(config.aviation_weather.base_url, "http://localhost:8080");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let result = AppConfig::load_with_env(Some(&path), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn scan_interval_out_of_range() {
        let config = AppConfig {
            scan_interval_secs: 30,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = AppConfig {
            scan_interval_secs: 86_401,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.aviation_weather.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_base_url_rejected() {
        let mut config = AppConfig::default();
        config.aviation_weather.base_url = "ftp://aviationweather.gov".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn malformed_station_rejected() {
        let config = AppConfig {
            stations: vec!["KLAX".to_string(), "K-LAX".to_string()],
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Station(_))));
    }

    #[test]
    fn blank_and_duplicate_stations_normalized() {
        let config = AppConfig {
            stations: vec![
                " klax ".to_string(),
                String::new(),
                "KLAX".to_string(),
                "ksmo".to_string(),
            ],
            ..AppConfig::default()
        };
        assert_eq!(config.station_set().unwrap().joined(), "KLAX,KSMO");
    }

    #[test]
    fn app_config_deserialization() {
        let json = r#"{"stations":["KLAX"],"aviation_weather":{"timeout_secs":5}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.scan_interval_secs, 600);
        assert_eq!(config.aviation_weather.timeout_secs, 5);
        assert_eq!(
            config.aviation_weather.base_url,
            "https://aviationweather.gov/api/data"
        );
    }
}
