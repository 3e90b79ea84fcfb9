//! Error types and handling for `SkyReport`

use thiserror::Error;

/// Main error type for the `SkyReport` library
#[derive(Error, Debug)]
pub enum SkyReportError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The caller supplied an unusable place query
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Geocoding found nothing, even after the simplified retry
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// The forecast service could not be reached or answered with garbage
    #[error("Forecast unavailable: {message}")]
    ForecastUnavailable { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkyReportError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error for the query as the caller typed it
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new forecast-unavailable error
    pub fn forecast_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ForecastUnavailable {
            message: message.into(),
        }
    }

    /// Stable, machine-readable tag for tool and API payloads
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SkyReportError::Config { .. } => "config",
            SkyReportError::InvalidInput { .. } => "invalid_input",
            SkyReportError::LocationNotFound { .. } => "location_not_found",
            SkyReportError::ForecastUnavailable { .. } => "forecast_unavailable",
            SkyReportError::Io { .. } => "io",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkyReportError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SkyReportError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            SkyReportError::LocationNotFound { query } => {
                format!("Could not find a place called '{query}'. Try a more specific name.")
            }
            SkyReportError::ForecastUnavailable { .. } => {
                "The weather service is currently unavailable. Please try again later.".to_string()
            }
            SkyReportError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
