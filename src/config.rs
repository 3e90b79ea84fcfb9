//! Configuration management for `SkyReport`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkyReportError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyReportConfig {
    /// Geocoding service settings
    pub geocoding: GeocodingConfig,
    /// Forecast service settings
    pub forecast: ForecastConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP API settings
    pub server: ServerConfig,
}

/// Geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Language for returned place names
    #[serde(default = "default_geocoding_language")]
    pub language: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u32,
}

/// Forecast service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL of the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u32,
    /// celsius or fahrenheit
    #[serde(default = "default_temperature_unit")]
    pub temperature_unit: String,
    /// kmh, ms, mph or kn
    #[serde(default = "default_wind_speed_unit")]
    pub wind_speed_unit: String,
    /// mm or inch
    #[serde(default = "default_precipitation_unit")]
    pub precipitation_unit: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Whole-request timeout in seconds
    #[serde(default = "default_server_request_timeout")]
    pub request_timeout_seconds: u32,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_geocoding_language() -> String {
    "en".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_request_timeout() -> u32 {
    10
}

fn default_temperature_unit() -> String {
    "celsius".to_string()
}

fn default_wind_speed_unit() -> String {
    "kmh".to_string()
}

fn default_precipitation_unit() -> String {
    "mm".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_server_request_timeout() -> u32 {
    45
}

const VALID_TEMPERATURE_UNITS: [&str; 2] = ["celsius", "fahrenheit"];
const VALID_WIND_SPEED_UNITS: [&str; 4] = ["kmh", "ms", "mph", "kn"];
const VALID_PRECIPITATION_UNITS: [&str; 2] = ["mm", "inch"];
const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const VALID_LOG_FORMATS: [&str; 2] = ["pretty", "json"];

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            language: default_geocoding_language(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            timeout_seconds: default_request_timeout(),
            temperature_unit: default_temperature_unit(),
            wind_speed_unit: default_wind_speed_unit(),
            precipitation_unit: default_precipitation_unit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            request_timeout_seconds: default_server_request_timeout(),
        }
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl ForecastConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl SkyReportConfig {
    /// Load configuration from file and environment variables.
    ///
    /// An explicit `config_path` must exist; without one the user config
    /// directory and then `./config.toml` are tried, and both may be absent.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = match config_path {
            Some(path) => {
                std::fs::metadata(&path)
                    .map_err(SkyReportError::from)
                    .with_context(|| format!("Config file {} not found", path.display()))?;
                path
            }
            None => Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml")),
        };

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYREPORT_FORECAST__TIMEOUT_SECONDS=5
        builder = builder.add_source(
            Environment::with_prefix("SKYREPORT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkyReportConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skyreport").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.language.is_empty() {
            self.geocoding.language = default_geocoding_language();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_request_timeout();
        }
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.forecast.timeout_seconds == 0 {
            self.forecast.timeout_seconds = default_request_timeout();
        }
        if self.forecast.temperature_unit.is_empty() {
            self.forecast.temperature_unit = default_temperature_unit();
        }
        if self.forecast.wind_speed_unit.is_empty() {
            self.forecast.wind_speed_unit = default_wind_speed_unit();
        }
        if self.forecast.precipitation_unit.is_empty() {
            self.forecast.precipitation_unit = default_precipitation_unit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_server_request_timeout();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds > 300 {
            return Err(
                SkyReportError::config("Geocoding timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.forecast.timeout_seconds > 300 {
            return Err(
                SkyReportError::config("Forecast timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(SkyReportError::config(
                "Server request timeout cannot exceed 300 seconds",
            )
            .into());
        }

        // Worst case per request: two geocoding attempts plus one forecast call
        let outbound_budget =
            2 * u64::from(self.geocoding.timeout_seconds) + u64::from(self.forecast.timeout_seconds);
        if u64::from(self.server.request_timeout_seconds) <= outbound_budget {
            return Err(SkyReportError::config(format!(
                "Server request timeout must exceed {outbound_budget} seconds \
                 (two geocoding attempts plus one forecast call)"
            ))
            .into());
        }

        if self.server.port == 0 {
            return Err(SkyReportError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        check_one_of("log level", &self.logging.level, &VALID_LOG_LEVELS)?;
        check_one_of("log format", &self.logging.format, &VALID_LOG_FORMATS)?;
        check_one_of(
            "temperature unit",
            &self.forecast.temperature_unit,
            &VALID_TEMPERATURE_UNITS,
        )?;
        check_one_of(
            "wind speed unit",
            &self.forecast.wind_speed_unit,
            &VALID_WIND_SPEED_UNITS,
        )?;
        check_one_of(
            "precipitation unit",
            &self.forecast.precipitation_unit,
            &VALID_PRECIPITATION_UNITS,
        )?;

        for (label, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Forecast", &self.forecast.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SkyReportError::config(format!(
                    "{label} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

fn check_one_of(label: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(SkyReportError::config(format!(
        "Invalid {label} '{value}'. Must be one of: {}",
        allowed.join(", ")
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SkyReportConfig::default();
        assert_eq!(
            config.geocoding.base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.forecast.timeout_seconds, 10);
        assert_eq!(config.geocoding.timeout(), Duration::from_secs(10));
        assert_eq!(config.forecast.temperature_unit, "celsius");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SkyReportConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = SkyReportConfig::default();
        config.forecast.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_server_timeout_must_cover_outbound_calls() {
        let mut config = SkyReportConfig::default();
        assert_eq!(config.server.request_timeout_seconds, 45);

        config.server.request_timeout_seconds = 30;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must exceed 30 seconds"));

        config.geocoding.timeout_seconds = 1;
        config.forecast.timeout_seconds = 1;
        config.server.request_timeout_seconds = 3;
        assert!(config.validate().is_err());
        config.server.request_timeout_seconds = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = SkyReportConfig::load_from_path(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
        assert!(matches!(
            err.downcast_ref::<SkyReportError>(),
            Some(SkyReportError::Io { .. })
        ));
    }

    #[test]
    fn test_config_validation_units() {
        let mut config = SkyReportConfig::default();
        config.forecast.wind_speed_unit = "furlongs".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("wind speed unit"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = SkyReportConfig::default();
        config.geocoding.base_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Geocoding API base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = SkyReportConfig::default();
        config.forecast.base_url.clear();
        config.geocoding.timeout_seconds = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.geocoding.timeout_seconds, 10);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file_merges_with_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[forecast]\ntemperature_unit = \"fahrenheit\"\ntimeout_seconds = 5\n\n[server]\nport = 9000"
        )
        .unwrap();

        let config = SkyReportConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.forecast.temperature_unit, "fahrenheit");
        assert_eq!(config.forecast.timeout_seconds, 5);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.geocoding.language, "en");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SkyReportConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("skyreport"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
