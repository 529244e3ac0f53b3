/// NWS (National Weather Service) API client.
///
/// Two concerns against api.weather.gov: active weather alerts near a
/// point, keyword-filtered down to surf-related hazards, and the marine
/// zone forecast, fetched in two hops (point metadata → forecast zone →
/// zone forecast) and passed through to callers unmodified.
///
/// The NWS API requires a User-Agent header identifying the application;
/// the shared HTTP client is constructed with one (see `service`).

use crate::model::{Alert, MarineError};
use serde::Deserialize;

const NWS_BASE_URL: &str = "https://api.weather.gov";

/// Vocabulary that marks an alert as relevant to rip current risk. Matched
/// case-insensitively against the alert's event and description.
const ALERT_KEYWORDS: [&str; 4] = ["rip current", "beach hazard", "surf", "marine"];

// ---------------------------------------------------------------------------
// Serde structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Deserialize)]
struct AlertFeature {
    #[serde(default)]
    properties: AlertProperties,
}

#[derive(Deserialize, Default)]
struct AlertProperties {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct PointResponse {
    properties: PointProperties,
}

#[derive(Deserialize, Default)]
struct PointProperties {
    #[serde(rename = "forecastZone", default)]
    forecast_zone: Option<String>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

pub fn build_alerts_url(lat: f64, lon: f64) -> String {
    let point = format!("{},{}", lat, lon);
    format!("{}/alerts/active?point={}", NWS_BASE_URL, urlencoding::encode(&point))
}

pub fn build_point_url(lat: f64, lon: f64) -> String {
    format!("{}/points/{},{}", NWS_BASE_URL, lat, lon)
}

pub fn build_zone_forecast_url(zone_id: &str) -> String {
    format!(
        "{}/zones/forecast/{}/forecast",
        NWS_BASE_URL,
        urlencoding::encode(zone_id)
    )
}

/// The point metadata reports `forecastZone` as a full resource URL
/// (`https://api.weather.gov/zones/forecast/FLZ173`); the trailing segment
/// is the zone id. Bare ids pass through unchanged.
pub fn zone_id_from(forecast_zone: &str) -> &str {
    forecast_zone
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(forecast_zone)
}

// ---------------------------------------------------------------------------
// Alert filtering and parsing
// ---------------------------------------------------------------------------

/// True when the alert's event or description mentions any of the surf
/// hazard keywords.
pub fn is_surf_related(event: &str, description: &str) -> bool {
    let event = event.to_lowercase();
    let description = description.to_lowercase();
    ALERT_KEYWORDS
        .iter()
        .any(|keyword| event.contains(keyword) || description.contains(keyword))
}

/// Parses an active-alerts response into surf-related `Alert`s; everything
/// else (tornado warnings, heat advisories, …) is dropped here.
pub fn parse_alerts_response(json: &str) -> Result<Vec<Alert>, MarineError> {
    let response: AlertsResponse = serde_json::from_str(json)
        .map_err(|e| MarineError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let alerts = response
        .features
        .into_iter()
        .filter_map(|feature| {
            let event = feature.properties.event.unwrap_or_default();
            let headline = feature.properties.headline.unwrap_or_default();
            let description = feature.properties.description.unwrap_or_default();
            if is_surf_related(&event, &description) {
                Some(Alert {
                    event,
                    headline,
                    description,
                })
            } else {
                None
            }
        })
        .collect();

    Ok(alerts)
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Fetches active alerts for a point. An empty vec is a normal result —
/// most beaches, most days, have no active surf hazards.
pub fn fetch_active_alerts(
    http: &reqwest::blocking::Client,
    lat: f64,
    lon: f64,
) -> Result<Vec<Alert>, MarineError> {
    let url = build_alerts_url(lat, lon);
    let body = http.get(&url).send()?.error_for_status()?.text()?;
    parse_alerts_response(&body)
}

/// Fetches the marine zone forecast for a point: point metadata first,
/// then the forecast for the zone it names. The forecast body is opaque to
/// this service and passed through unmodified.
pub fn fetch_surf_forecast(
    http: &reqwest::blocking::Client,
    lat: f64,
    lon: f64,
) -> Result<serde_json::Value, MarineError> {
    let point_url = build_point_url(lat, lon);
    let point: PointResponse = http.get(&point_url).send()?.error_for_status()?.json()?;

    let forecast_zone = point
        .properties
        .forecast_zone
        .ok_or_else(|| MarineError::NoData("point metadata has no forecast zone".to_string()))?;

    let zone_url = build_zone_forecast_url(zone_id_from(&forecast_zone));
    let forecast = http.get(&zone_url).send()?.error_for_status()?.json()?;
    Ok(forecast)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    // --- Keyword filter ------------------------------------------------------

    #[test]
    fn test_rip_current_event_is_surf_related() {
        assert!(is_surf_related("Rip Current Statement", ""));
        assert!(is_surf_related("RIP CURRENT STATEMENT", ""), "matching is case-insensitive");
    }

    #[test]
    fn test_keyword_in_description_alone_matches() {
        assert!(is_surf_related(
            "Special Weather Statement",
            "Dangerous surf conditions expected along the coast."
        ));
    }

    #[test]
    fn test_unrelated_events_are_filtered() {
        assert!(!is_surf_related("Tornado Warning", "A tornado has been sighted."));
        assert!(!is_surf_related("Excessive Heat Warning", "Heat index near 110."));
    }

    #[test]
    fn test_beach_hazard_and_marine_keywords_match() {
        assert!(is_surf_related("Beach Hazards Statement", ""));
        assert!(is_surf_related("Small Craft Advisory", "Hazardous marine conditions."));
    }

    // --- Alerts parsing ------------------------------------------------------

    #[test]
    fn test_parse_alerts_keeps_surf_hazards_and_drops_the_rest() {
        let alerts = parse_alerts_response(fixture_alerts_mixed_json())
            .expect("alerts fixture should parse");

        // Fixture: rip current statement + small craft advisory + tornado
        // warning; only the first two survive the filter.
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().any(|a| a.event == "Rip Current Statement"));
        assert!(alerts.iter().any(|a| a.event == "Small Craft Advisory"));
        assert!(!alerts.iter().any(|a| a.event == "Tornado Warning"));
    }

    #[test]
    fn test_parse_alerts_preserves_headline_and_description() {
        let alerts = parse_alerts_response(fixture_alerts_mixed_json())
            .expect("should parse");
        let rip = alerts
            .iter()
            .find(|a| a.event == "Rip Current Statement")
            .expect("rip current alert present");
        assert!(rip.headline.contains("Rip Current Statement issued"));
        assert!(rip.description.to_lowercase().contains("rip current"));
    }

    #[test]
    fn test_parse_beach_hazard_statement_survives_filter() {
        let alerts = parse_alerts_response(fixture_alerts_beach_hazard_json())
            .expect("beach hazard fixture should parse");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event, "Beach Hazards Statement");
        assert!(
            !alerts[0].event.to_lowercase().contains("rip current"),
            "fixture models the +2 advisory path, not the +5 warning path"
        );
    }

    #[test]
    fn test_zone_forecast_body_is_opaque_json() {
        // The forecast is passed through unmodified; all this service
        // assumes is that it is valid JSON.
        let forecast: serde_json::Value = serde_json::from_str(fixture_zone_forecast_json())
            .expect("zone forecast fixture should parse");
        assert!(forecast.get("periods").is_some());
    }

    #[test]
    fn test_parse_alerts_empty_features_yields_no_alerts() {
        let alerts = parse_alerts_response(fixture_alerts_empty_json())
            .expect("empty alerts response is valid");
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_parse_alerts_missing_features_field_yields_no_alerts() {
        // A degenerate but observed response shape.
        let alerts = parse_alerts_response(r#"{ "type": "FeatureCollection" }"#)
            .expect("missing features defaults to empty");
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_parse_alerts_malformed_json_is_parse_error() {
        let result = parse_alerts_response("not json");
        assert!(matches!(result, Err(MarineError::Parse(_))));
    }

    // --- Zone handling -------------------------------------------------------

    #[test]
    fn test_zone_id_extracted_from_resource_url() {
        assert_eq!(
            zone_id_from("https://api.weather.gov/zones/forecast/FLZ173"),
            "FLZ173"
        );
        assert_eq!(
            zone_id_from("https://api.weather.gov/zones/forecast/AMZ630/"),
            "AMZ630"
        );
    }

    #[test]
    fn test_bare_zone_id_passes_through() {
        assert_eq!(zone_id_from("FLZ173"), "FLZ173");
    }

    #[test]
    fn test_point_metadata_parses_forecast_zone() {
        let point: PointResponse = serde_json::from_str(fixture_point_metadata_json())
            .expect("point fixture should parse");
        assert_eq!(
            point.properties.forecast_zone.as_deref(),
            Some("https://api.weather.gov/zones/forecast/FLZ173")
        );
    }

    // --- URL construction ----------------------------------------------------

    #[test]
    fn test_alerts_url_encodes_the_point() {
        let url = build_alerts_url(25.7617, -80.1918);
        assert!(url.starts_with("https://api.weather.gov/alerts/active?point="));
        assert!(
            url.contains("25.7617%2C-80.1918"),
            "comma in the point value must be percent-encoded, got: {}",
            url
        );
    }

    #[test]
    fn test_zone_forecast_url_shape() {
        let url = build_zone_forecast_url("FLZ173");
        assert_eq!(url, "https://api.weather.gov/zones/forecast/FLZ173/forecast");
    }
}
