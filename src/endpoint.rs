/// HTTP endpoint for the rip current risk service.
///
/// Provides a small REST API for the beach-conditions frontend and other
/// tools. No auth, no CORS, no database — those concerns live in the
/// outer application layer.
///
/// Endpoints:
/// - GET /risk?lat=..&lon=..[&force=1] - Risk assessment for a coordinate
/// - DELETE /risk?lat=..&lon=..        - Drop the cached assessment
/// - GET /stations                     - Reference station registry
/// - GET /health                       - Service health check

use crate::model::MarineError;
use crate::service::RipCurrentService;
use crate::stations::REFERENCE_STATIONS;
use std::collections::HashMap;
use std::sync::Arc;
use tiny_http::Method;

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

/// Splits a request URL's query string into decoded key/value pairs.
fn parse_query(url: &str) -> HashMap<String, String> {
    let Some(query) = url.splitn(2, '?').nth(1) else {
        return HashMap::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            let key = urlencoding::decode(key).ok()?.into_owned();
            let value = urlencoding::decode(value).ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

/// Extracts and parses the `lat`/`lon` parameters.
fn parse_coordinates(query: &HashMap<String, String>) -> Result<(f64, f64), String> {
    let lat = query
        .get("lat")
        .ok_or_else(|| "missing 'lat' query parameter".to_string())?;
    let lon = query
        .get("lon")
        .ok_or_else(|| "missing 'lon' query parameter".to_string())?;

    let lat: f64 = lat
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat))?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon))?;

    Ok((lat, lon))
}

/// The refresh convention is `force=1`, matching the frontend's existing
/// query usage. Anything else reads as a normal cached lookup.
fn force_requested(query: &HashMap<String, String>) -> bool {
    query.get("force").map(|v| v == "1").unwrap_or(false)
}

// ---------------------------------------------------------------------------
// HTTP server
// ---------------------------------------------------------------------------

/// Starts the HTTP endpoint server on the specified port and serves
/// requests until the process exits.
pub fn start_endpoint_server(port: u16, service: Arc<RipCurrentService>) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /risk?lat=..&lon=..[&force=1] - Risk assessment");
    println!("   DELETE /risk?lat=..&lon=..        - Invalidate cached assessment");
    println!("   GET /stations                     - Reference stations");
    println!("   GET /health                       - Service health check\n");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let path = url.splitn(2, '?').next().unwrap_or("").to_string();
        let query = parse_query(&url);

        let response = match (request.method(), path.as_str()) {
            (Method::Get, "/health") => handle_health(),
            (Method::Get, "/risk") => handle_risk(&service, &query),
            (Method::Delete, "/risk") => handle_invalidate(&service, &query),
            (Method::Get, "/stations") => handle_stations(),
            _ => create_response(
                404,
                serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": ["/health", "/risk", "/stations"]
                }),
            ),
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_health() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "ripmon_service",
            "version": env!("CARGO_PKG_VERSION")
        }),
    )
}

fn handle_risk(
    service: &RipCurrentService,
    query: &HashMap<String, String>,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let (lat, lon) = match parse_coordinates(query) {
        Ok(coords) => coords,
        Err(message) => return create_response(400, serde_json::json!({ "error": message })),
    };

    match service.get_rip_current_risk(lat, lon, force_requested(query)) {
        Ok(assessment) => match serde_json::to_value(&assessment) {
            Ok(body) => create_response(200, body),
            Err(e) => create_response(
                500,
                serde_json::json!({ "error": format!("serialization failed: {}", e) }),
            ),
        },
        Err(MarineError::InvalidCoordinate { .. }) => create_response(
            400,
            serde_json::json!({ "error": "coordinates out of range", "lat": lat, "lon": lon }),
        ),
        Err(e) => create_response(500, serde_json::json!({ "error": e.to_string() })),
    }
}

fn handle_invalidate(
    service: &RipCurrentService,
    query: &HashMap<String, String>,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let (lat, lon) = match parse_coordinates(query) {
        Ok(coords) => coords,
        Err(message) => return create_response(400, serde_json::json!({ "error": message })),
    };

    service.invalidate(lat, lon);
    tiny_http::Response::from_data(Vec::new()).with_status_code(tiny_http::StatusCode::from(204))
}

fn handle_stations() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    match serde_json::to_value(REFERENCE_STATIONS) {
        Ok(body) => create_response(200, body),
        Err(e) => create_response(
            500,
            serde_json::json!({ "error": format!("serialization failed: {}", e) }),
        ),
    }
}

/// Create HTTP response with JSON body
fn create_response(
    status_code: u16,
    json: serde_json::Value,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string());
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
