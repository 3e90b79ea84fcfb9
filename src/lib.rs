//! `SkyReport` - place-name to weather report resolution
//!
//! This library resolves a free-text place name to coordinates, fetches the
//! current conditions there and renders a fixed-layout report. The resolver
//! is also exposed as an agent tool and over HTTP.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod tools;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::SkyReportConfig;
pub use error::SkyReportError;
pub use geocoding::{Geocoder, OpenMeteoGeocoder};
pub use location_resolver::LocationWeatherResolver;
pub use models::{FormattedReport, GeoLocation, PlaceQuery, WeatherReport};
pub use tools::{ToolCall, ToolDefinition, ToolOutput, WeatherTool};
pub use weather::{ForecastProvider, OpenMeteoForecast};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkyReportError>;
