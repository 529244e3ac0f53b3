/// NOAA CO-OPS tides & currents API client.
///
/// Handles URL construction and JSON response parsing for the CO-OPS
/// datagetter endpoint:
///   https://api.tidesandcurrents.noaa.gov/api/prod/datagetter
///
/// One fetcher covers all three observation products (water level, wind,
/// wave height) — they differ only in the `product` query value and in
/// which field of each series entry carries the measurement. The same
/// endpoint also serves the station directory via `product=stations`.
/// See `fixtures.rs` for annotated examples of the response structures.

use crate::model::{MarineError, Reading, StationRecord};
use serde::Deserialize;

const COOPS_BASE_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Application identifier sent with every datagetter request, as the
/// CO-OPS usage guidelines ask.
const APPLICATION: &str = "ripmon_service";

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// The observation products this service consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    WaterLevel,
    Wind,
    WaveHeight,
}

impl Product {
    pub fn as_query(&self) -> &'static str {
        match self {
            Product::WaterLevel => "water_level",
            Product::Wind => "wind",
            Product::WaveHeight => "wave_height",
        }
    }

    /// Only water level readings are relative to a tidal datum.
    fn needs_datum(&self) -> bool {
        matches!(self, Product::WaterLevel)
    }

    /// Which series-entry field carries the measurement: wind series report
    /// speed in `s`; water level and wave height report in `v`.
    fn measurement_of(&self, entry: SeriesEntry) -> Option<String> {
        match self {
            Product::Wind => entry.s,
            _ => entry.v,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde structures for datagetter JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SeriesResponse {
    #[serde(default)]
    data: Option<Vec<SeriesEntry>>,
    #[serde(default)]
    error: Option<ErrorEnvelope>,
}

#[derive(Deserialize)]
struct SeriesEntry {
    t: String,
    // Measurements arrive as strings, sometimes empty.
    #[serde(default)]
    v: Option<String>,
    #[serde(default)]
    s: Option<String>,
}

/// CO-OPS reports problems in-band: `{"error": {"message": "..."}}` with
/// HTTP 200.
#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

#[derive(Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    stations: Vec<DirectoryStation>,
}

#[derive(Deserialize)]
struct DirectoryStation {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    // The directory serves coordinates as JSON numbers or numeric strings
    // depending on the station record's vintage.
    #[serde(default)]
    lat: Option<serde_json::Value>,
    #[serde(default)]
    lng: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a datagetter URL for one observation product at one station over
/// a YYYYMMDD date range. English units and station-local time throughout;
/// water level additionally pins the MLLW datum.
pub fn build_series_url(
    product: Product,
    station_id: &str,
    begin_date: &str,
    end_date: &str,
) -> String {
    let mut url = format!(
        "{}?product={}&application={}&begin_date={}&end_date={}&station={}&time_zone=lst_ldt&units=english&format=json",
        COOPS_BASE_URL,
        product.as_query(),
        APPLICATION,
        begin_date,
        end_date,
        urlencoding::encode(station_id),
    );
    if product.needs_datum() {
        url.push_str("&datum=MLLW");
    }
    url
}

/// Builds the station directory URL. The directory is not paginated; one
/// request returns every station.
pub fn build_directory_url() -> String {
    format!(
        "{}?product=stations&application={}&format=json",
        COOPS_BASE_URL, APPLICATION
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a datagetter series response into a flat list of `Reading`s.
///
/// Entries whose measurement field is absent are skipped; unparseable
/// measurement strings are kept as-is (downstream consumers parse at the
/// point of use and skip per-reading).
///
/// # Errors
/// - `MarineError::NoData` — in-band error envelope, or a series with no
///   measurements at all.
/// - `MarineError::Parse` — malformed or unexpected JSON structure.
pub fn parse_series_response(product: Product, json: &str) -> Result<Vec<Reading>, MarineError> {
    let response: SeriesResponse = serde_json::from_str(json)
        .map_err(|e| MarineError::Parse(format!("JSON deserialization failed: {}", e)))?;

    if let Some(envelope) = response.error {
        return Err(MarineError::NoData(envelope.message));
    }

    let entries = response
        .data
        .ok_or_else(|| MarineError::Parse("response has neither data nor error".to_string()))?;

    let readings: Vec<Reading> = entries
        .into_iter()
        .filter_map(|entry| {
            let time = entry.t.clone();
            product
                .measurement_of(entry)
                .map(|value| Reading { time, value })
        })
        .collect();

    if readings.is_empty() {
        return Err(MarineError::NoData(
            "series contained no measurements".to_string(),
        ));
    }

    Ok(readings)
}

/// Parses the station directory into `StationRecord`s.
///
/// Stations missing an id or valid numeric coordinates are silently
/// skipped — the directory carries historical entries with blank or
/// malformed positions, and a bad record must not abort selection.
pub fn parse_directory_response(json: &str) -> Result<Vec<StationRecord>, MarineError> {
    let response: DirectoryResponse = serde_json::from_str(json)
        .map_err(|e| MarineError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let mut records = Vec::new();
    for station in response.stations {
        let Some(id) = station.id else { continue };
        let (Some(lat), Some(lng)) = (
            station.lat.as_ref().and_then(coordinate_value),
            station.lng.as_ref().and_then(coordinate_value),
        ) else {
            continue;
        };
        let name = station.name.unwrap_or_else(|| id.clone());
        records.push(StationRecord {
            id,
            name,
            latitude: lat,
            longitude: lng,
        });
    }

    Ok(records)
}

/// Accepts a coordinate serialized as a JSON number or a numeric string.
fn coordinate_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Fetches one product series for one station over a YYYYMMDD date range.
pub fn fetch_series(
    http: &reqwest::blocking::Client,
    product: Product,
    station_id: &str,
    begin_date: &str,
    end_date: &str,
) -> Result<Vec<Reading>, MarineError> {
    let url = build_series_url(product, station_id, begin_date, end_date);
    let body = http.get(&url).send()?.error_for_status()?.text()?;
    parse_series_response(product, &body)
}

/// Fetches the complete station directory.
pub fn fetch_station_directory(
    http: &reqwest::blocking::Client,
) -> Result<Vec<StationRecord>, MarineError> {
    let url = build_directory_url();
    let body = http.get(&url).send()?.error_for_status()?.text()?;
    parse_directory_response(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    // --- URL construction ---------------------------------------------------

    #[test]
    fn test_build_series_url_targets_datagetter_with_json_format() {
        let url = build_series_url(Product::WaterLevel, "8723214", "20250807", "20250808");
        assert!(
            url.contains("api.tidesandcurrents.noaa.gov/api/prod/datagetter"),
            "must target the datagetter endpoint, got: {}",
            url
        );
        assert!(url.contains("format=json"), "must request JSON format");
        assert!(url.contains("units=english"), "must request english units");
        assert!(url.contains("time_zone=lst_ldt"), "must request station-local time");
    }

    #[test]
    fn test_build_series_url_includes_station_and_date_range() {
        let url = build_series_url(Product::Wind, "8638610", "20250807", "20250808");
        assert!(url.contains("station=8638610"), "must include station id");
        assert!(url.contains("begin_date=20250807"), "must include begin date");
        assert!(url.contains("end_date=20250808"), "must include end date");
        assert!(url.contains("product=wind"), "must include the product");
    }

    #[test]
    fn test_build_series_url_datum_only_for_water_level() {
        let water = build_series_url(Product::WaterLevel, "8723214", "20250807", "20250808");
        assert!(water.contains("datum=MLLW"), "water level is datum-relative");

        let wind = build_series_url(Product::Wind, "8723214", "20250807", "20250808");
        assert!(!wind.contains("datum="), "wind has no datum");

        let waves = build_series_url(Product::WaveHeight, "8723214", "20250807", "20250808");
        assert!(!waves.contains("datum="), "wave height has no datum");
    }

    #[test]
    fn test_build_directory_url_requests_station_listing() {
        let url = build_directory_url();
        assert!(url.contains("product=stations"), "must request the directory");
        assert!(url.contains("format=json"));
    }

    // --- Series parsing: happy path -----------------------------------------

    #[test]
    fn test_parse_water_level_series_preserves_order_and_values() {
        let readings = parse_series_response(Product::WaterLevel, fixture_water_level_falling_json())
            .expect("valid fixture should parse");

        assert_eq!(readings.len(), 6, "fixture has six observations");
        assert_eq!(readings[0].time, "2025-08-07 08:00");
        assert_eq!(readings[0].value, "2.31");
        // The last two values fall — the tide trend analysis depends on
        // chronological order being preserved.
        assert_eq!(readings[4].value, "1.92");
        assert_eq!(readings[5].value, "1.74");
    }

    #[test]
    fn test_parse_rising_series_ends_on_an_increase() {
        let readings = parse_series_response(Product::WaterLevel, fixture_water_level_rising_json())
            .expect("rising fixture should parse");

        let last = readings[readings.len() - 1].value_f64().unwrap();
        let previous = readings[readings.len() - 2].value_f64().unwrap();
        assert!(last > previous, "fixture must model an incoming tide");
    }

    #[test]
    fn test_parse_calm_wave_series_stays_under_two_feet() {
        let readings = parse_series_response(Product::WaveHeight, fixture_wave_series_small_json())
            .expect("calm fixture should parse");

        for reading in &readings {
            let height = reading.value_f64().expect("calm fixture values are numeric");
            assert!(height < 2.0, "calm fixture must stay below every elevated bucket");
        }
    }

    #[test]
    fn test_parse_wind_series_reads_speed_field() {
        let readings = parse_series_response(Product::Wind, fixture_wind_series_json())
            .expect("wind fixture should parse");

        assert_eq!(readings.len(), 3);
        let speeds: Vec<f64> = readings.iter().filter_map(|r| r.value_f64()).collect();
        assert_eq!(speeds, vec![12.4, 18.3, 16.0], "wind readings come from 's', not 'v'");
    }

    #[test]
    fn test_parse_wave_series_reads_value_field() {
        let readings = parse_series_response(Product::WaveHeight, fixture_wave_series_json())
            .expect("wave fixture should parse");

        let max = readings
            .iter()
            .filter_map(|r| r.value_f64())
            .fold(0.0_f64, f64::max);
        assert!((max - 9.2).abs() < 1e-9, "fixture max wave is 9.2 ft, got {}", max);
    }

    #[test]
    fn test_parse_keeps_unparseable_measurements_for_downstream_skip() {
        // Entries with garbage strings are retained; value_f64() returns
        // None for them and consumers skip per-reading.
        let readings = parse_series_response(Product::WaterLevel, fixture_unparseable_values_json())
            .expect("fixture should parse structurally");

        assert_eq!(readings.len(), 3);
        let parseable = readings.iter().filter(|r| r.value_f64().is_some()).count();
        assert_eq!(parseable, 1, "only one of three values is numeric");
    }

    // --- Series parsing: error and edge cases -------------------------------

    #[test]
    fn test_parse_error_envelope_returns_no_data() {
        let result = parse_series_response(Product::WaveHeight, fixture_error_envelope_json());
        match result {
            Err(MarineError::NoData(message)) => {
                assert!(
                    message.contains("No data was found"),
                    "should surface the provider's message, got: {}",
                    message
                );
            }
            other => panic!("error envelope should yield NoData, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_series_returns_no_data() {
        let result = parse_series_response(Product::WaterLevel, fixture_empty_series_json());
        assert!(
            matches!(result, Err(MarineError::NoData(_))),
            "empty data array should yield NoData, got {:?}",
            result
        );
    }

    #[test]
    fn test_parse_malformed_json_returns_parse_error() {
        let result = parse_series_response(Product::Wind, "{ this is not valid json }}}");
        assert!(
            matches!(result, Err(MarineError::Parse(_))),
            "malformed JSON should return Parse, got {:?}",
            result
        );
    }

    #[test]
    fn test_parse_empty_string_returns_parse_error() {
        let result = parse_series_response(Product::Wind, "");
        assert!(matches!(result, Err(MarineError::Parse(_))));
    }

    #[test]
    fn test_parse_response_with_neither_data_nor_error_is_parse_error() {
        let result = parse_series_response(Product::WaterLevel, r#"{ "metadata": {} }"#);
        assert!(
            matches!(result, Err(MarineError::Parse(_))),
            "unexpected envelope should be reported, got {:?}",
            result
        );
    }

    // --- Directory parsing ---------------------------------------------------

    #[test]
    fn test_parse_directory_returns_valid_stations() {
        let records = parse_directory_response(fixture_station_directory_json())
            .expect("directory fixture should parse");

        let virginia_key = records
            .iter()
            .find(|r| r.id == "8723214")
            .expect("Virginia Key should be in the directory");
        assert_eq!(virginia_key.name, "Virginia Key, FL");
        assert!((virginia_key.latitude - 25.7317).abs() < 1e-6);
        assert!((virginia_key.longitude - (-80.1617)).abs() < 1e-6);
    }

    #[test]
    fn test_parse_directory_accepts_string_coordinates() {
        // Older directory records serve lat/lng as numeric strings.
        let records = parse_directory_response(fixture_station_directory_json())
            .expect("directory fixture should parse");

        let sewells = records
            .iter()
            .find(|r| r.id == "8638610")
            .expect("string-coordinate station should be kept");
        assert!((sewells.latitude - 36.9467).abs() < 1e-6);
    }

    #[test]
    fn test_parse_directory_skips_invalid_coordinates() {
        let records = parse_directory_response(fixture_station_directory_json())
            .expect("directory fixture should parse");

        assert!(
            !records.iter().any(|r| r.id == "9999901"),
            "station with missing lng must be skipped"
        );
        assert!(
            !records.iter().any(|r| r.id == "9999902"),
            "station with non-numeric lat must be skipped"
        );
    }

    #[test]
    fn test_parse_directory_defaults_name_to_id() {
        let json = r#"{ "stations": [ { "id": "8661070", "lat": 33.655, "lng": -78.918 } ] }"#;
        let records = parse_directory_response(json).expect("should parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "8661070", "missing name falls back to the id");
    }

    #[test]
    fn test_coordinate_value_accepts_number_and_string_forms() {
        assert_eq!(coordinate_value(&serde_json::json!(25.7317)), Some(25.7317));
        assert_eq!(coordinate_value(&serde_json::json!("25.7317")), Some(25.7317));
        assert_eq!(coordinate_value(&serde_json::json!("")), None);
        assert_eq!(coordinate_value(&serde_json::json!(null)), None);
        assert_eq!(coordinate_value(&serde_json::json!({"d": 1})), None);
    }
}
