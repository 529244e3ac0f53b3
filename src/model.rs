/// Shared data types for the rip current risk service.
///
/// Types here are the currency between the ingest layer, the risk scorer,
/// the cache, and the HTTP endpoint. Everything is plain data: `Clone` so
/// cached assessments can be handed out as value copies, `Serialize` so the
/// endpoint can render them as JSON without adapter structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error taxonomy for the marine data clients and the orchestrator.
///
/// Client-level failures (`Http`, `Parse`, `NoData`) are recovered by the
/// orchestrator and degrade into "no data for this signal". Only
/// `InvalidCoordinate` — a malformed call argument — surfaces to callers of
/// `get_rip_current_risk`.
#[derive(Debug, Error)]
pub enum MarineError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("no data available: {0}")]
    NoData(String),

    #[error("invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90], longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

// ---------------------------------------------------------------------------
// Stations and readings
// ---------------------------------------------------------------------------

/// A station record as returned by the CO-OPS station directory, before
/// any proximity ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A directory station ranked relative to a query point. Transient: the
/// distance only makes sense for the request that computed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_miles: f64,
}

/// One timestamped observation from a CO-OPS series (water level in feet,
/// wind speed in mph, or wave height in feet, depending on the product).
///
/// The value is kept as the provider's string form — CO-OPS serves numbers
/// as strings, occasionally empty — and parsed at the point of use so that
/// unparseable entries degrade per-reading rather than per-series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub time: String,
    pub value: String,
}

impl Reading {
    /// Numeric value, if the provider string parses.
    pub fn value_f64(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

/// Everything fetched for one station during an assessment. Any of the
/// series may be absent when the upstream fetch failed or the station does
/// not report that product.
#[derive(Debug, Clone, Default)]
pub struct StationSignals {
    pub station_id: String,
    pub tides: Option<Vec<Reading>>,
    pub wind: Option<Vec<Reading>>,
    pub waves: Option<Vec<Reading>>,
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// An active NWS alert relevant to surf conditions, reduced to the three
/// properties the scorer and the response body need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub event: String,
    pub headline: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Risk assessment
// ---------------------------------------------------------------------------

/// Overall risk category. Derived from the numeric score via fixed
/// thresholds — see `RiskCategory::from_score`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskCategory {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "LOW-MODERATE")]
    LowModerate,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "EXTREME")]
    Extreme,
}

impl RiskCategory {
    /// Maps a total risk score onto the category ladder. The thresholds are
    /// a user-visible contract: 8+ EXTREME, 6-7 HIGH, 4-5 MODERATE,
    /// 2-3 LOW-MODERATE, 0-1 LOW.
    pub fn from_score(score: u32) -> Self {
        if score >= 8 {
            RiskCategory::Extreme
        } else if score >= 6 {
            RiskCategory::High
        } else if score >= 4 {
            RiskCategory::Moderate
        } else if score >= 2 {
            RiskCategory::LowModerate
        } else {
            RiskCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::LowModerate => "LOW-MODERATE",
            RiskCategory::Moderate => "MODERATE",
            RiskCategory::High => "HIGH",
            RiskCategory::Extreme => "EXTREME",
        }
    }

    /// Fixed recommendation wording per category. Reproduced verbatim —
    /// downstream clients display these strings to beachgoers.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskCategory::Extreme => "Stay out of the water. Dangerous rip currents likely.",
            RiskCategory::High => "High risk of rip currents. Swim near lifeguards only.",
            RiskCategory::Moderate => {
                "Moderate rip current risk. Use caution and swim near lifeguards."
            }
            RiskCategory::LowModerate => "Some risk present. Be aware of changing conditions.",
            RiskCategory::Low => "Low rip current risk, but always use caution in the ocean.",
        }
    }
}

/// Per-factor explanation strings. Each factor is present only when the
/// corresponding signal had data to contribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RiskFactors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waves: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tide: Option<String>,
}

impl RiskFactors {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_none() && self.waves.is_none() && self.wind.is_none() && self.tide.is_none()
    }
}

/// Output of the pure scorer: score, category, recommendation, factors.
/// The orchestrator wraps this into a full `RiskAssessment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionsReport {
    pub overall: RiskCategory,
    pub score: u32,
    pub recommendation: String,
    pub factors: RiskFactors,
}

/// A complete rip current risk assessment for one coordinate.
///
/// Cached entries are returned as value copies, so mutating an assessment
/// a caller received never touches the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub overall: RiskCategory,
    pub score: u32,
    pub recommendation: String,
    pub factors: RiskFactors,
    pub alerts: Vec<Alert>,
    pub nearby_stations: Vec<Station>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surf_forecast: Option<serde_json::Value>,
    pub last_updated: DateTime<Utc>,
    pub cached: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
