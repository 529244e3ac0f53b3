/// Test fixtures: representative JSON payloads from the CO-OPS datagetter
/// and NWS APIs.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// CO-OPS series response shape:
///   response.data[]
///     .t — observation timestamp, station-local time
///     .v — measurement as a STRING (water level, wave height)
///     .s — speed as a STRING (wind product only)
///   response.error.message — in-band error envelope, served with HTTP 200
///
/// CO-OPS directory response shape:
///   response.stations[] — {id, name, lat, lng}; lat/lng may be JSON
///   numbers or numeric strings depending on the record's vintage
///
/// NWS alerts response shape:
///   response.features[].properties — {event, headline, description}
///
/// Note: measurement values are always JSON strings in the CO-OPS
/// responses, even though they represent numbers. Parsers must handle this.

/// Virginia Key water levels over 90 minutes, ending on a falling tide
/// (1.92 → 1.74). The two most recent readings drive the tide-direction
/// factor.
pub(crate) fn fixture_water_level_falling_json() -> &'static str {
    r#"{
      "metadata": { "id": "8723214", "name": "Virginia Key", "lat": "25.7317", "lon": "-80.1617" },
      "data": [
        { "t": "2025-08-07 08:00", "v": "2.31", "s": "0.003", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 08:18", "v": "2.27", "s": "0.004", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 08:36", "v": "2.18", "s": "0.003", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 08:54", "v": "2.06", "s": "0.005", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 09:12", "v": "1.92", "s": "0.004", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 09:30", "v": "1.74", "s": "0.004", "f": "1,0,0,0", "q": "p" }
      ]
    }"#
}

/// Same station on a rising tide (1.74 → 1.92 over the last two readings).
pub(crate) fn fixture_water_level_rising_json() -> &'static str {
    r#"{
      "metadata": { "id": "8723214", "name": "Virginia Key", "lat": "25.7317", "lon": "-80.1617" },
      "data": [
        { "t": "2025-08-07 14:00", "v": "1.41", "s": "0.003", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 14:18", "v": "1.58", "s": "0.004", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 14:36", "v": "1.74", "s": "0.003", "f": "1,0,0,0", "q": "p" },
        { "t": "2025-08-07 14:54", "v": "1.92", "s": "0.005", "f": "1,0,0,0", "q": "p" }
      ]
    }"#
}

/// Wind series: speed lives in `s` (mph with units=english), direction and
/// gusts alongside. Max speed 18.3 mph.
pub(crate) fn fixture_wind_series_json() -> &'static str {
    r#"{
      "metadata": { "id": "8723214", "name": "Virginia Key", "lat": "25.7317", "lon": "-80.1617" },
      "data": [
        { "t": "2025-08-07 08:00", "s": "12.4", "d": "95.0", "dr": "E", "g": "15.1", "f": "0,0" },
        { "t": "2025-08-07 08:06", "s": "18.3", "d": "102.0", "dr": "ESE", "g": "22.8", "f": "0,0" },
        { "t": "2025-08-07 08:12", "s": "16.0", "d": "99.0", "dr": "E", "g": "19.4", "f": "0,0" }
      ]
    }"#
}

/// Wave heights with max 9.2 ft and mean 4.0 ft — the "HIGH RISK" wave
/// bucket (max > 8).
pub(crate) fn fixture_wave_series_json() -> &'static str {
    r#"{
      "metadata": { "id": "8638610", "name": "Sewells Point", "lat": "36.9467", "lon": "-76.3300" },
      "data": [
        { "t": "2025-08-07 08:00", "v": "9.2", "f": "0,0,0,0" },
        { "t": "2025-08-07 08:30", "v": "2.8", "f": "0,0,0,0" },
        { "t": "2025-08-07 09:00", "v": "3.1", "f": "0,0,0,0" },
        { "t": "2025-08-07 09:30", "v": "0.9", "f": "0,0,0,0" }
      ]
    }"#
}

/// Calm-day wave heights: max 1.2 ft, all below every elevated bucket.
pub(crate) fn fixture_wave_series_small_json() -> &'static str {
    r#"{
      "metadata": { "id": "8638610", "name": "Sewells Point", "lat": "36.9467", "lon": "-76.3300" },
      "data": [
        { "t": "2025-08-07 08:00", "v": "0.8", "f": "0,0,0,0" },
        { "t": "2025-08-07 08:30", "v": "1.2", "f": "0,0,0,0" },
        { "t": "2025-08-07 09:00", "v": "1.0", "f": "0,0,0,0" }
      ]
    }"#
}

/// In-band CO-OPS error envelope — returned with HTTP 200 when a station
/// does not report the requested product.
pub(crate) fn fixture_error_envelope_json() -> &'static str {
    r#"{
      "error": { "message": "No data was found. This product may not be offered at this station at the requested time." }
    }"#
}

/// Structurally valid response with an empty data array — a station that
/// reports the product but had a sensor gap.
pub(crate) fn fixture_empty_series_json() -> &'static str {
    r#"{
      "metadata": { "id": "8570283", "name": "Ocean City Inlet", "lat": "38.3283", "lon": "-75.0917" },
      "data": []
    }"#
}

/// Series where most measurement strings are garbage. Parsers keep the
/// entries; consumers skip per-reading via `Reading::value_f64`.
pub(crate) fn fixture_unparseable_values_json() -> &'static str {
    r#"{
      "metadata": { "id": "8570283", "name": "Ocean City Inlet", "lat": "38.3283", "lon": "-75.0917" },
      "data": [
        { "t": "2025-08-07 08:00", "v": "", "f": "0,0,0,0" },
        { "t": "2025-08-07 08:06", "v": "N/A", "f": "0,0,0,0" },
        { "t": "2025-08-07 08:12", "v": "1.88", "f": "0,0,0,0" }
      ]
    }"#
}

/// Station directory with a mix of record vintages: numeric coordinates,
/// string coordinates, a record missing its longitude (9999901), and one
/// with a non-numeric latitude (9999902). The last two must be skipped.
pub(crate) fn fixture_station_directory_json() -> &'static str {
    r#"{
      "count": 5,
      "stations": [
        { "id": "8723214", "name": "Virginia Key, FL", "lat": 25.7317, "lng": -80.1617 },
        { "id": "8638610", "name": "Sewells Point, VA", "lat": "36.9467", "lng": "-76.3300" },
        { "id": "8570283", "name": "Ocean City Inlet, MD", "lat": 38.3283, "lng": -75.0917 },
        { "id": "9999901", "name": "Decommissioned Pier", "lat": 27.5000 },
        { "id": "9999902", "name": "Bad Record", "lat": "unknown", "lng": "-80.2000" }
      ]
    }"#
}

/// Mixed active-alerts response: a rip current statement and a small craft
/// advisory (both surf-related) plus a tornado warning (filtered out).
pub(crate) fn fixture_alerts_mixed_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "properties": {
            "event": "Rip Current Statement",
            "headline": "Rip Current Statement issued August 7 at 4:12AM EDT until August 8 at 8:00PM EDT by NWS Miami FL",
            "description": "A high risk of rip currents is in effect. Rip currents can sweep even the best swimmers away from shore into deeper water."
          }
        },
        {
          "properties": {
            "event": "Small Craft Advisory",
            "headline": "Small Craft Advisory issued August 7 at 3:55AM EDT by NWS Miami FL",
            "description": "Hazardous marine conditions for small craft. Seas 6 to 9 feet."
          }
        },
        {
          "properties": {
            "event": "Tornado Warning",
            "headline": "Tornado Warning issued August 7 at 5:02AM EDT by NWS Miami FL",
            "description": "A severe thunderstorm capable of producing a tornado was located near Doral."
          }
        }
      ]
    }"#
}

/// A beach hazards statement with no rip current wording — worth +2, not +5.
pub(crate) fn fixture_alerts_beach_hazard_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "properties": {
            "event": "Beach Hazards Statement",
            "headline": "Beach Hazards Statement issued August 7 at 6:00AM EDT by NWS Wilmington NC",
            "description": "Longshore currents and rough surf expected through this evening."
          }
        }
      ]
    }"#
}

/// No active alerts — the common case.
pub(crate) fn fixture_alerts_empty_json() -> &'static str {
    r#"{ "type": "FeatureCollection", "features": [] }"#
}

/// NWS point metadata; `forecastZone` is a full resource URL whose trailing
/// segment is the zone id.
pub(crate) fn fixture_point_metadata_json() -> &'static str {
    r#"{
      "properties": {
        "gridId": "MFL",
        "gridX": 110,
        "gridY": 50,
        "forecastZone": "https://api.weather.gov/zones/forecast/FLZ173",
        "timeZone": "America/New_York"
      }
    }"#
}

/// Marine zone forecast body. Opaque to this service — passed through to
/// callers unmodified.
pub(crate) fn fixture_zone_forecast_json() -> &'static str {
    r#"{
      "zone": "https://api.weather.gov/zones/forecast/FLZ173",
      "updated": "2025-08-07T09:34:00+00:00",
      "periods": [
        { "number": 1, "name": "Today", "detailedForecast": "East winds 10 to 15 knots. Seas 3 to 5 feet. A moderate risk of rip currents." }
      ]
    }"#
}
