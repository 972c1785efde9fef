//! Turns a raw response body into a rendered report or a diagnostic outcome.

use serde_json::Value;

use crate::model::{CityQuery, WeatherReport};

/// Result of interpreting a response body. Every variant is reportable to
/// the user; none of them is a process failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Body was absent or empty; no parse was attempted.
    NoData,

    /// Body was not valid JSON. `detail` carries the parser diagnostic
    /// when one is available.
    InvalidJson { detail: Option<String> },

    /// Top-level `current_condition` was missing or not an array.
    NoCurrentCondition,

    /// The `current_condition` array had no first element.
    EmptyConditions,

    Report(WeatherReport),
}

impl Outcome {
    pub fn is_report(&self) -> bool {
        matches!(self, Outcome::Report(_))
    }

    /// True for outcomes that belong on stderr rather than stdout.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Outcome::InvalidJson { detail: Some(_) })
    }

    pub fn render(&self, city: &CityQuery) -> String {
        match self {
            Outcome::NoData => {
                format!("No weather data available for {city}.\n")
            }
            Outcome::InvalidJson { detail: Some(detail) } => {
                format!("Error parsing JSON for {city}: {detail}\n")
            }
            Outcome::InvalidJson { detail: None } => {
                format!("Invalid JSON response for {city}.\n")
            }
            Outcome::NoCurrentCondition => {
                format!("No current weather data available for {city}.\n")
            }
            Outcome::EmptyConditions => {
                format!("Failed to retrieve current weather condition for {city}.\n")
            }
            Outcome::Report(report) => report.render(city),
        }
    }
}

/// Parse a response body and extract the current conditions.
///
/// Navigation stops at the first structural problem; field extraction does
/// not. Each of the four fields is looked up and type-checked on its own,
/// so one absent field never blocks the others.
pub fn report(body: Option<&str>) -> Outcome {
    let Some(body) = body else {
        return Outcome::NoData;
    };
    if body.is_empty() {
        return Outcome::NoData;
    }

    let root: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            return Outcome::InvalidJson { detail: Some(err.to_string()) };
        }
    };

    let Some(conditions) = root.get("current_condition").and_then(Value::as_array) else {
        return Outcome::NoCurrentCondition;
    };
    let Some(condition) = conditions.first() else {
        return Outcome::EmptyConditions;
    };

    Outcome::Report(WeatherReport {
        description: desc_text(condition.get("weatherDesc")),
        wind_direction: string_field(condition.get("winddir16Point")),
        wind_speed_kmph: string_field(condition.get("windspeedKmph")),
        temperature_c: string_field(condition.get("temp_C")),
    })
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

/// The live service ships `weatherDesc` as `[{"value": "..."}]`, while some
/// mirrors return a bare string. Accept both; anything else is absent.
fn desc_text(value: Option<&Value>) -> Option<String> {
    let value = value?;
    if let Some(text) = value.as_str() {
        return Some(text.to_owned());
    }
    value
        .as_array()?
        .first()?
        .get("value")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> CityQuery {
        CityQuery::new("London").unwrap()
    }

    #[test]
    fn full_body_renders_four_lines_in_order() {
        let body = r#"{
            "current_condition": [{
                "weatherDesc": "Sunny",
                "winddir16Point": "N",
                "windspeedKmph": "10",
                "temp_C": "20"
            }]
        }"#;

        let outcome = report(Some(body));
        assert!(outcome.is_report());

        let text = outcome.render(&city());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "Weather in London:",
                "  Weather Description: Sunny",
                "  Wind Direction: N",
                "  Wind Speed: 10 km/h",
                "  Temperature: 20°C",
            ]
        );
    }

    #[test]
    fn absent_or_empty_body_is_no_data() {
        assert_eq!(report(None), Outcome::NoData);
        assert_eq!(report(Some("")), Outcome::NoData);
        assert_eq!(
            Outcome::NoData.render(&city()),
            "No weather data available for London.\n"
        );
    }

    #[test]
    fn malformed_json_surfaces_parser_diagnostic() {
        let outcome = report(Some("{not json"));
        let Outcome::InvalidJson { detail: Some(detail) } = &outcome else {
            panic!("expected InvalidJson with detail, got {outcome:?}");
        };
        assert!(!detail.is_empty());

        let text = outcome.render(&city());
        assert!(text.starts_with("Error parsing JSON for London: "));
    }

    #[test]
    fn invalid_json_without_detail_has_generic_message() {
        let outcome = Outcome::InvalidJson { detail: None };
        assert_eq!(
            outcome.render(&city()),
            "Invalid JSON response for London.\n"
        );
    }

    #[test]
    fn missing_current_condition_is_reported() {
        assert_eq!(report(Some(r#"{"weather": []}"#)), Outcome::NoCurrentCondition);
        assert_eq!(
            report(Some(r#"{"current_condition": "nope"}"#)),
            Outcome::NoCurrentCondition
        );
        assert_eq!(
            Outcome::NoCurrentCondition.render(&city()),
            "No current weather data available for London.\n"
        );
    }

    #[test]
    fn empty_condition_array_is_reported() {
        assert_eq!(
            report(Some(r#"{"current_condition": []}"#)),
            Outcome::EmptyConditions
        );
        assert_eq!(
            Outcome::EmptyConditions.render(&city()),
            "Failed to retrieve current weather condition for London.\n"
        );
    }

    #[test]
    fn one_missing_field_does_not_block_the_others() {
        let body = r#"{
            "current_condition": [{
                "winddir16Point": "N",
                "windspeedKmph": "10",
                "temp_C": "20"
            }]
        }"#;

        let Outcome::Report(report) = report(Some(body)) else {
            panic!("expected a report");
        };
        assert_eq!(report.description, None);
        assert_eq!(report.wind_direction.as_deref(), Some("N"));
        assert_eq!(report.wind_speed_kmph.as_deref(), Some("10"));
        assert_eq!(report.temperature_c.as_deref(), Some("20"));
    }

    #[test]
    fn wrong_typed_field_renders_as_absent() {
        let body = r#"{
            "current_condition": [{
                "weatherDesc": "Sunny",
                "winddir16Point": 16,
                "windspeedKmph": "10",
                "temp_C": "20"
            }]
        }"#;

        let Outcome::Report(report) = report(Some(body)) else {
            panic!("expected a report");
        };
        assert_eq!(report.wind_direction, None);
        assert_eq!(report.description.as_deref(), Some("Sunny"));
    }

    #[test]
    fn weather_desc_accepts_live_service_shape() {
        let body = r#"{
            "current_condition": [{
                "weatherDesc": [{"value": "Partly cloudy"}],
                "winddir16Point": "SW",
                "windspeedKmph": "7",
                "temp_C": "14"
            }]
        }"#;

        let Outcome::Report(report) = report(Some(body)) else {
            panic!("expected a report");
        };
        assert_eq!(report.description.as_deref(), Some("Partly cloudy"));
    }

    #[test]
    fn weather_desc_unusable_shapes_render_as_absent() {
        for desc in [r#"42"#, r#"[]"#, r#"[{"text": "Sunny"}]"#, r#"{}"#] {
            let body = format!(r#"{{"current_condition": [{{"weatherDesc": {desc}}}]}}"#);
            let Outcome::Report(report) = report(Some(&body)) else {
                panic!("expected a report for {desc}");
            };
            assert_eq!(report.description, None, "shape: {desc}");
        }
    }

    #[test]
    fn non_object_first_element_renders_all_placeholders() {
        let Outcome::Report(report) = report(Some(r#"{"current_condition": [7]}"#)) else {
            panic!("expected a report");
        };
        assert_eq!(report, WeatherReport::default());
    }
}
