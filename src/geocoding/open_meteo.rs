use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::Geocoder;
use crate::config::GeocodingConfig;
use crate::models::GeoLocation;
use crate::models::location::DEFAULT_TIMEZONE;

/// Open-Meteo geocoding API client (no API key required)
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    client: ClientWithMiddleware,
    base_url: String,
    language: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
    timezone: Option<String>,
}

impl From<GeocodingResult> for GeoLocation {
    fn from(result: GeocodingResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
            resolved_name: result.name,
            timezone: result
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            country: result.country,
            admin1: result.admin1,
        }
    }
}

impl OpenMeteoGeocoder {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &GeocodingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            timeout: config.timeout(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language={}&format=json",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.language)
        )
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let response = self
            .client
            .get(self.search_url(query))
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Geocoding request for '{query}' failed"))?
            .error_for_status()
            .with_context(|| format!("Geocoding service rejected '{query}'"))?;

        let body: GeocodingResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo geocoding response")?;

        let best = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(GeoLocation::from);

        match &best {
            Some(location) => debug!(
                "Found location: {} ({})",
                location.resolved_name,
                location.format_coordinates()
            ),
            None => info!("No geocoding results for '{}'", query),
        }

        Ok(best)
    }
}
