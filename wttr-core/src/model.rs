use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum accepted city-name length, in bytes.
pub const MAX_CITY_LEN: usize = 127;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCity {
    #[error("City name cannot be empty.")]
    Empty,

    #[error("City name is too long: {len} bytes (maximum is {MAX_CITY_LEN}).")]
    TooLong { len: usize },

    #[error("City name must not contain control characters.")]
    ControlChar,
}

/// A validated city name: non-empty, at most [`MAX_CITY_LEN`] bytes,
/// free of control characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Validate a raw city string. A trailing line terminator is stripped
    /// first, since the interactive mode hands over a raw input line.
    pub fn new(raw: &str) -> Result<Self, InvalidCity> {
        let city = raw.strip_suffix('\n').unwrap_or(raw);
        let city = city.strip_suffix('\r').unwrap_or(city);

        if city.is_empty() {
            return Err(InvalidCity::Empty);
        }
        if city.len() > MAX_CITY_LEN {
            return Err(InvalidCity::TooLong { len: city.len() });
        }
        if city.chars().any(char::is_control) {
            return Err(InvalidCity::ControlChar);
        }

        Ok(Self(city.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions extracted from the service response.
///
/// Every field is independently optional; an absent field renders as `N/A`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub description: Option<String>,
    pub wind_direction: Option<String>,
    pub wind_speed_kmph: Option<String>,
    pub temperature_c: Option<String>,
}

impl WeatherReport {
    /// Render the fixed multi-line report, labelled with the queried city.
    pub fn render(&self, city: &CityQuery) -> String {
        let field = |value: &Option<String>| -> String {
            value.as_deref().unwrap_or("N/A").to_owned()
        };

        format!(
            "\nWeather in {city}:\n\
             \x20 Weather Description: {}\n\
             \x20 Wind Direction: {}\n\
             \x20 Wind Speed: {} km/h\n\
             \x20 Temperature: {}°C\n",
            field(&self.description),
            field(&self.wind_direction),
            field(&self.wind_speed_kmph),
            field(&self.temperature_c),
        )
    }
}
