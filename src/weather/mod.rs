use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::models::{GeoLocation, ReportUnits, WeatherReport, weather_code_to_description};

pub mod open_meteo;

pub use open_meteo::OpenMeteoForecast;

/// Observation time layout used by the forecast service
const OBSERVATION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Current conditions as delivered by a forecast service, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Observation time in GMT, `%Y-%m-%dT%H:%M`
    pub time: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub relative_humidity: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub weather_code: u16,
    /// 1 during daylight, 0 at night
    pub is_day: u8,
    pub units: ReportUnits,
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Current conditions at the given location
    async fn current_conditions(&self, location: &GeoLocation) -> Result<CurrentConditions>;
}

/// Map raw service values into a `WeatherReport`.
///
/// Values and unit labels pass through untouched. Unknown weather codes get a
/// fallback description; an unreadable observation time is an error.
pub fn normalize(conditions: CurrentConditions) -> Result<WeatherReport> {
    let observed_at = NaiveDateTime::parse_from_str(&conditions.time, OBSERVATION_TIME_FORMAT)
        .with_context(|| format!("Invalid observation time '{}'", conditions.time))?
        .and_utc();

    Ok(WeatherReport {
        temperature: conditions.temperature,
        apparent_temperature: conditions.apparent_temperature,
        humidity: conditions.relative_humidity,
        wind_speed: conditions.wind_speed,
        precipitation: conditions.precipitation,
        is_daytime: conditions.is_day != 0,
        observed_at,
        weather_code: conditions.weather_code,
        description: weather_code_to_description(conditions.weather_code).to_string(),
        units: conditions.units,
    })
}
