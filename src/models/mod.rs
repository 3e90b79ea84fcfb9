//! Data models for `SkyReport`
//!
//! This module contains the core domain models organized by concern:
//! - Location: place queries and resolved geographic locations
//! - Weather: normalized current conditions and the weather-code table
//! - Report: the rendered, human-readable report

pub mod location;
pub mod report;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{GeoLocation, PlaceQuery};
pub use report::FormattedReport;
pub use weather::{ReportUnits, UNKNOWN_CONDITIONS, WeatherReport, weather_code_to_description};
