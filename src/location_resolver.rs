//! Location Weather Resolution
//!
//! Turns a free-text place name into a rendered weather report:
//! geocode (with one simplified retry) -> current conditions -> normalize -> format.
//! Each call is independent; the resolver holds no per-call state and can be
//! shared freely between tasks.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, error, info, instrument, warn};

use crate::config::SkyReportConfig;
use crate::geocoding::{Geocoder, OpenMeteoGeocoder};
use crate::models::{FormattedReport, GeoLocation, PlaceQuery, WeatherReport};
use crate::weather::{self, ForecastProvider, OpenMeteoForecast};
use crate::{Result, SkyReportError};

/// Resolves place names to formatted weather reports
#[derive(Clone)]
pub struct LocationWeatherResolver {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastProvider>,
}

impl LocationWeatherResolver {
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastProvider>) -> Self {
        Self { geocoder, forecast }
    }

    /// Resolver backed by the Open-Meteo services named in `config`
    pub fn from_config(config: &SkyReportConfig) -> anyhow::Result<Self> {
        let client = crate::client::build_client().context("Failed to set up weather services")?;
        Ok(Self::new(
            Arc::new(OpenMeteoGeocoder::new(client.clone(), &config.geocoding)),
            Arc::new(OpenMeteoForecast::new(client, &config.forecast)),
        ))
    }

    /// Resolve a place name into a formatted weather report
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_query: &str) -> Result<FormattedReport> {
        let query = PlaceQuery::parse(place_query)?;

        let location = self.resolve_location(&query).await?;
        let weather = self.fetch_weather(&location).await?;

        debug!(
            "Rendering report for {} ({})",
            location.resolved_name,
            weather.description
        );
        Ok(FormattedReport::render(location, weather))
    }

    /// Geocode the query, retrying exactly once with its simplified form
    async fn resolve_location(&self, query: &PlaceQuery) -> Result<GeoLocation> {
        if let Some(location) = self.try_geocode(query.as_str()).await {
            return Ok(location);
        }

        let simplified = query.simplified();
        info!(
            "No match for '{}', retrying with '{}'",
            query.as_str(),
            simplified
        );

        if let Some(location) = self.try_geocode(simplified).await {
            return Ok(location);
        }

        Err(SkyReportError::location_not_found(query.as_str()))
    }

    /// One geocoding attempt. Service faults count as a miss.
    async fn try_geocode(&self, query: &str) -> Option<GeoLocation> {
        match self.geocoder.geocode(query).await {
            Ok(Some(location)) => {
                debug!(
                    "Resolved '{}' to {} at ({})",
                    query,
                    location.resolved_name,
                    location.format_coordinates()
                );
                Some(location)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Geocoding attempt for '{}' failed: {:#}", query, e);
                None
            }
        }
    }

    /// Fetch and normalize current conditions. Never retried.
    async fn fetch_weather(&self, location: &GeoLocation) -> Result<WeatherReport> {
        let conditions = self
            .forecast
            .current_conditions(location)
            .await
            .map_err(|e| {
                error!(
                    "Forecast for {} unavailable: {:#}",
                    location.resolved_name, e
                );
                SkyReportError::forecast_unavailable(format!("{e:#}"))
            })?;

        weather::normalize(conditions).map_err(|e| {
            error!("Malformed forecast for {}: {:#}", location.resolved_name, e);
            SkyReportError::forecast_unavailable(format!("{e:#}"))
        })
    }
}
