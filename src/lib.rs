/// ripmon_service: rip current risk assessment service for beach conditions.
///
/// # Module structure
///
/// ```text
/// ripmon_service
/// ├── model       — shared data types (Reading, Alert, RiskAssessment, MarineError, …)
/// ├── config      — service configuration loader (ripmon.toml + env overrides)
/// ├── geo         — haversine distance between coordinate pairs
/// ├── stations    — CO-OPS station directory selection + reference station registry
/// ├── ingest
/// │   ├── coops   — NOAA CO-OPS tides & currents API: URL construction + JSON parsing
/// │   ├── nws     — NWS weather API: active alerts + surf/zone forecast
/// │   └── fixtures (test only) — representative API response payloads
/// ├── risk        — rip current risk scoring (alerts, waves, wind, tide)
/// ├── cache       — TTL-bounded in-memory cache of assessments
/// ├── service     — orchestrator: cache lookup, station fan-out, scoring
/// └── endpoint    — HTTP API exposing risk assessment and invalidation
/// ```

/// Public modules
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod geo;
pub mod ingest;
pub mod model;
pub mod risk;
pub mod service;
pub mod stations;
