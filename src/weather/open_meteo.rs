//! `OpenMeteo` forecast API client and response structures

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{CurrentConditions, ForecastProvider};
use crate::config::ForecastConfig;
use crate::models::{GeoLocation, ReportUnits};

/// Variables requested in the `current` block, in response order
const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,precipitation,weather_code,is_day";

/// `OpenMeteo` current-conditions client
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    client: ClientWithMiddleware,
    base_url: String,
    timeout: Duration,
    temperature_unit: String,
    wind_speed_unit: String,
    precipitation_unit: String,
}

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
    current_units: Option<CurrentUnits>,
}

/// Current weather data from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct CurrentData {
    time: String,
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    apparent_temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    relative_humidity: f64,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: f64,
    precipitation: f64,
    weather_code: u16,
    is_day: u8,
}

/// Unit labels for the `current` block
#[derive(Debug, Deserialize)]
struct CurrentUnits {
    #[serde(rename = "temperature_2m")]
    temperature: String,
    #[serde(rename = "relative_humidity_2m")]
    relative_humidity: String,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: String,
    precipitation: String,
}

impl From<CurrentUnits> for ReportUnits {
    fn from(units: CurrentUnits) -> Self {
        Self {
            temperature: units.temperature,
            humidity: units.relative_humidity,
            wind_speed: units.wind_speed,
            precipitation: units.precipitation,
        }
    }
}

impl OpenMeteoForecast {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &ForecastConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            temperature_unit: config.temperature_unit.clone(),
            wind_speed_unit: config.wind_speed_unit.clone(),
            precipitation_unit: config.precipitation_unit.clone(),
        }
    }

    fn forecast_url(&self, location: &GeoLocation) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=GMT&temperature_unit={}&wind_speed_unit={}&precipitation_unit={}",
            self.base_url,
            location.latitude,
            location.longitude,
            CURRENT_FIELDS,
            self.temperature_unit,
            self.wind_speed_unit,
            self.precipitation_unit
        )
    }

    /// Labels matching the requested units, for responses that omit `current_units`
    fn requested_units(&self) -> ReportUnits {
        let temperature = match self.temperature_unit.as_str() {
            "fahrenheit" => "°F",
            _ => "°C",
        };
        let wind_speed = match self.wind_speed_unit.as_str() {
            "ms" => "m/s",
            "mph" => "mp/h",
            "kn" => "kn",
            _ => "km/h",
        };
        let precipitation = match self.precipitation_unit.as_str() {
            "inch" => "inch",
            _ => "mm",
        };

        ReportUnits {
            temperature: temperature.to_string(),
            humidity: "%".to_string(),
            wind_speed: wind_speed.to_string(),
            precipitation: precipitation.to_string(),
        }
    }

    fn conditions_from(&self, response: ForecastResponse) -> Result<CurrentConditions> {
        let current = response
            .current
            .ok_or_else(|| anyhow!("Forecast response has no current conditions"))?;
        let units = response
            .current_units
            .map_or_else(|| self.requested_units(), ReportUnits::from);

        Ok(CurrentConditions {
            time: current.time,
            temperature: current.temperature,
            apparent_temperature: current.apparent_temperature,
            relative_humidity: current.relative_humidity,
            wind_speed: current.wind_speed,
            precipitation: current.precipitation,
            weather_code: current.weather_code,
            is_day: current.is_day,
            units,
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoForecast {
    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn current_conditions(&self, location: &GeoLocation) -> Result<CurrentConditions> {
        let url = self.forecast_url(location);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| "Forecast request failed")?
            .error_for_status()
            .with_context(|| "Forecast service returned an error status")?;

        let body: ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;

        self.conditions_from(body)
    }
}
