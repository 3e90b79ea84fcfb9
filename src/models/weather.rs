//! Normalized current conditions and the weather-code table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description used for codes missing from the table
pub const UNKNOWN_CONDITIONS: &str = "unknown conditions";

/// Unit labels exactly as the forecast service reported them
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportUnits {
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub precipitation: String,
}

impl Default for ReportUnits {
    fn default() -> Self {
        Self {
            temperature: "°C".to_string(),
            humidity: "%".to_string(),
            wind_speed: "km/h".to_string(),
            precipitation: "mm".to_string(),
        }
    }
}

/// Current weather at a resolved location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// Air temperature, in `units.temperature`
    pub temperature: f64,
    /// Perceived temperature, in `units.temperature`
    pub apparent_temperature: f64,
    /// Relative humidity, in `units.humidity`
    pub humidity: f64,
    /// Wind speed, in `units.wind_speed`
    pub wind_speed: f64,
    /// Precipitation amount, in `units.precipitation`
    pub precipitation: f64,
    /// Whether the sun is up at the location
    pub is_daytime: bool,
    /// When the service observed these conditions
    pub observed_at: DateTime<Utc>,
    /// Raw WMO weather code
    pub weather_code: u16,
    /// Short human-readable description of `weather_code`
    pub description: String,
    pub units: ReportUnits,
}

impl WeatherReport {
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!(
            "{:.1}{} (feels like {:.1}{})",
            self.temperature, self.units.temperature, self.apparent_temperature, self.units.temperature
        )
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{:.0}{}", self.humidity, self.units.humidity)
    }

    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} {}", self.wind_speed, self.units.wind_speed)
    }

    #[must_use]
    pub fn format_precipitation(&self) -> String {
        format!("{:.1} {}", self.precipitation, self.units.precipitation)
    }

    #[must_use]
    pub fn day_or_night(&self) -> &'static str {
        if self.is_daytime { "day" } else { "night" }
    }
}

/// Convert a WMO weather code to a short description
///
/// See <https://open-meteo.com/en/docs#weathervariables>.
#[must_use]
pub fn weather_code_to_description(code: u16) -> &'static str {
    match code {
        0 => "clear sky",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 => "fog",
        48 => "depositing rime fog",
        51 => "light drizzle",
        53 => "moderate drizzle",
        55 => "dense drizzle",
        56 => "light freezing drizzle",
        57 => "dense freezing drizzle",
        61 => "light rain",
        63 => "moderate rain",
        65 => "heavy rain",
        66 => "light freezing rain",
        67 => "heavy freezing rain",
        71 => "light snow fall",
        73 => "moderate snow fall",
        75 => "heavy snow fall",
        77 => "snow grains",
        80 => "light rain showers",
        81 => "moderate rain showers",
        82 => "violent rain showers",
        85 => "light snow showers",
        86 => "heavy snow showers",
        95 => "thunderstorm",
        96 => "thunderstorm with light hail",
        99 => "thunderstorm with heavy hail",
        _ => UNKNOWN_CONDITIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(0, "clear sky")]
    #[case(3, "overcast")]
    #[case(61, "light rain")]
    #[case(95, "thunderstorm")]
    #[case(4, UNKNOWN_CONDITIONS)]
    #[case(100, UNKNOWN_CONDITIONS)]
    #[case(9999, UNKNOWN_CONDITIONS)]
    fn test_weather_code_to_description(#[case] code: u16, #[case] expected: &str) {
        assert_eq!(weather_code_to_description(code), expected);
    }

    #[test]
    fn test_formatting_keeps_service_units() {
        let report = WeatherReport {
            temperature: 61.7,
            apparent_temperature: 59.04,
            humidity: 71.0,
            wind_speed: 7.2,
            precipitation: 0.0,
            is_daytime: false,
            observed_at: Utc.with_ymd_and_hms(2026, 10, 18, 6, 0, 0).unwrap(),
            weather_code: 2,
            description: "partly cloudy".to_string(),
            units: ReportUnits {
                temperature: "°F".to_string(),
                humidity: "%".to_string(),
                wind_speed: "mp/h".to_string(),
                precipitation: "inch".to_string(),
            },
        };

        assert_eq!(report.format_temperature(), "61.7°F (feels like 59.0°F)");
        assert_eq!(report.format_humidity(), "71%");
        assert_eq!(report.format_wind(), "7.2 mp/h");
        assert_eq!(report.format_precipitation(), "0.0 inch");
        assert_eq!(report.day_or_night(), "night");
    }
}
