//! Place queries and resolved locations

use serde::{Deserialize, Serialize};

use crate::{Result, SkyReportError};

/// Timezone assumed when the geocoder does not report one
pub const DEFAULT_TIMEZONE: &str = "GMT";

/// Free-text place name, trimmed and known to be non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Trim the raw input and reject it if nothing is left
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SkyReportError::invalid_input("Location cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the first comma, so "Springfield, Illinois, USA" becomes
    /// "Springfield". Falls back to the whole query when that prefix is blank.
    #[must_use]
    pub fn simplified(&self) -> &str {
        match self.0.split(',').next().map(str::trim) {
            Some(head) if !head.is_empty() => head,
            _ => &self.0,
        }
    }
}

/// A place resolved by the geocoding service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical place name as returned by the geocoder
    pub resolved_name: String,
    /// IANA timezone name, e.g. "America/Los_Angeles"
    pub timezone: String,
    /// Country name, when known
    pub country: Option<String>,
    /// First-level administrative region (state, canton, ...), when known
    pub admin1: Option<String>,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, resolved_name: String, timezone: String) -> Self {
        Self {
            latitude,
            longitude,
            resolved_name,
            timezone,
            country: None,
            admin1: None,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
