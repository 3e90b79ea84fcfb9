//! Place-name lookup
//!
//! The resolver only needs the single best match for a query, so the seam is
//! `query -> Option<GeoLocation>`. An empty result set is `Ok(None)`; transport
//! and decoding problems are errors.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::GeoLocation;

pub mod open_meteo;

pub use open_meteo::OpenMeteoGeocoder;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `query`, if the service knows the place
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>>;
}
