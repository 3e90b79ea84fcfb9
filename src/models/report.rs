//! Human-readable weather report

use std::fmt::Display;

use chrono_tz::Tz;
use serde::Serialize;

use super::{GeoLocation, WeatherReport};

/// A rendered report together with the data it was rendered from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedReport {
    location: GeoLocation,
    weather: WeatherReport,
    text: String,
}

impl FormattedReport {
    /// Render the fixed report template. The output depends only on the
    /// arguments, so identical inputs always give identical text.
    #[must_use]
    pub fn render(location: GeoLocation, weather: WeatherReport) -> Self {
        let lines = [
            format!("Weather for {}", location.resolved_name),
            format!("Conditions: {}", weather.description),
            format!("Temperature: {}", weather.format_temperature()),
            format!("Humidity: {}", weather.format_humidity()),
            format!("Wind speed: {}", weather.format_wind()),
            format!("Precipitation: {}", weather.format_precipitation()),
            format!("Time of day: {}", weather.day_or_night()),
            format!("Observed at: {}", format_observed_at(&location, &weather)),
        ];

        Self {
            text: lines.join("\n"),
            location,
            weather,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    #[must_use]
    pub fn weather(&self) -> &WeatherReport {
        &self.weather
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Display for FormattedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Observation time in the location's own timezone, or UTC when the name
/// is not a known IANA zone.
fn format_observed_at(location: &GeoLocation, weather: &WeatherReport) -> String {
    match location.timezone.parse::<Tz>() {
        Ok(tz) => format!(
            "{} ({})",
            weather.observed_at.with_timezone(&tz).format("%Y-%m-%d %H:%M"),
            location.timezone
        ),
        Err(_) => format!("{} (UTC)", weather.observed_at.format("%Y-%m-%d %H:%M")),
    }
}
