/// TTL-bounded in-memory cache of risk assessments.
///
/// Keyed by the query coordinate rounded to four decimal places (~11 m),
/// so repeated lookups for the same beach hit one entry regardless of
/// float noise in the request. Entries expire after a configurable TTL and
/// are evicted lazily on the next lookup past expiry — never proactively
/// swept.
///
/// Methods take the current time as a parameter rather than reading a
/// clock, so expiry behavior is testable with synthetic timestamps.

use crate::model::RiskAssessment;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;

/// One cached assessment and when it was computed.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: RiskAssessment,
    timestamp: DateTime<Utc>,
}

/// In-memory assessment cache. Key: rounded "lat,lon" string.
#[derive(Debug)]
pub struct RiskCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

/// Cache key for a coordinate: both components rounded to 4 decimal
/// places. Two points within ~11 m of each other share an entry.
pub fn coordinate_key(lat: f64, lon: f64) -> String {
    format!("{:.4},{:.4}", lat, lon)
}

impl RiskCache {
    pub fn new(ttl_minutes: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: Duration::minutes(ttl_minutes as i64),
        }
    }

    /// Looks up a fresh entry for the coordinate. An expired entry is
    /// removed and reported as a miss. Hits return a value copy — the
    /// caller can mutate it freely without touching the cache.
    pub fn get(&mut self, lat: f64, lon: f64, now: DateTime<Utc>) -> Option<RiskAssessment> {
        let key = coordinate_key(lat, lon);
        let expired = match self.entries.get(&key) {
            None => return None,
            Some(entry) => now - entry.timestamp > self.ttl,
        };

        if expired {
            self.entries.remove(&key);
            return None;
        }

        debug!(%key, "cache hit");
        self.entries.get(&key).map(|entry| entry.data.clone())
    }

    /// Stores an assessment for the coordinate, overwriting any existing
    /// entry and restarting its TTL.
    pub fn insert(&mut self, lat: f64, lon: f64, data: RiskAssessment, now: DateTime<Utc>) {
        let key = coordinate_key(lat, lon);
        debug!(%key, "cache set");
        self.entries.insert(key, CacheEntry { data, timestamp: now });
    }

    /// Removes the entry for the coordinate regardless of remaining TTL,
    /// forcing the next lookup to miss.
    pub fn invalidate(&mut self, lat: f64, lon: f64) {
        self.entries.remove(&coordinate_key(lat, lon));
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
