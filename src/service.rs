/// Risk assessment orchestrator.
///
/// `RipCurrentService` owns the shared HTTP client and the TTL cache, and
/// drives one assessment end to end: station selection, the upstream
/// fan-out (alerts, zone forecast, and per-station tide/wind/wave data),
/// scoring, and cache bookkeeping.
///
/// State machine per rounded coordinate:
/// - MISS (no entry, or expired) → compute, insert, return `cached=false`.
/// - HIT within TTL → value copy tagged `cached=true`, no I/O.
/// - `force_refresh` bypasses a HIT unconditionally and overwrites.
/// - `invalidate` drops the entry regardless of remaining TTL.
///
/// Upstream failures degrade into absent signals before scoring; only
/// malformed call arguments surface as errors. There is no retry and no
/// stale-entry fallback on a failed compute.

use crate::cache::RiskCache;
use crate::config::ServiceConfig;
use crate::ingest::coops::{self, Product};
use crate::ingest::nws;
use crate::model::{MarineError, RiskAssessment, Station, StationSignals};
use crate::risk;
use crate::stations;
use chrono::{Duration, Local, Utc};
use std::sync::{Mutex, mpsc};
use threadpool::ThreadPool;
use tracing::{info, warn};

pub struct RipCurrentService {
    http: reqwest::blocking::Client,
    cache: Mutex<RiskCache>,
    config: ServiceConfig,
}

impl RipCurrentService {
    /// Builds the service with a shared HTTP client carrying the configured
    /// User-Agent and per-request timeout.
    pub fn new(config: ServiceConfig) -> Result<Self, MarineError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            cache: Mutex::new(RiskCache::new(config.cache_ttl_minutes)),
            config,
        })
    }

    /// Comprehensive rip current risk assessment for a coordinate.
    ///
    /// Serves from cache when a fresh entry exists and `force_refresh` is
    /// false; otherwise computes, caches, and returns the new assessment.
    /// Returned assessments are always independent copies.
    pub fn get_rip_current_risk(
        &self,
        lat: f64,
        lon: f64,
        force_refresh: bool,
    ) -> Result<RiskAssessment, MarineError> {
        validate_coordinates(lat, lon)?;

        if !force_refresh {
            let mut cache = self.cache.lock().expect("cache mutex poisoned");
            if let Some(mut hit) = cache.get(lat, lon, Utc::now()) {
                hit.cached = true;
                return Ok(hit);
            }
        }

        // The lock is not held across the slow path. Two simultaneous
        // misses for one key may both compute; the later insert wins.
        let assessment = self.compute_assessment(lat, lon)?;

        let mut cache = self.cache.lock().expect("cache mutex poisoned");
        cache.insert(lat, lon, assessment.clone(), Utc::now());
        Ok(assessment)
    }

    /// Drops any cached assessment for the coordinate, forcing the next
    /// lookup to recompute.
    pub fn invalidate(&self, lat: f64, lon: f64) {
        let mut cache = self.cache.lock().expect("cache mutex poisoned");
        cache.invalidate(lat, lon);
    }

    // -----------------------------------------------------------------------
    // Slow path
    // -----------------------------------------------------------------------

    fn compute_assessment(&self, lat: f64, lon: f64) -> Result<RiskAssessment, MarineError> {
        let mut nearby =
            stations::find_nearby_stations(&self.http, lat, lon, self.config.search_radius_miles);

        let (begin_date, end_date) = assessment_date_range();

        let alerts = match nws::fetch_active_alerts(&self.http, lat, lon) {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!(error = %e, "active alerts unavailable, scoring without them");
                Vec::new()
            }
        };

        let surf_forecast = match nws::fetch_surf_forecast(&self.http, lat, lon) {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                warn!(error = %e, "surf forecast unavailable");
                None
            }
        };

        let fanout: Vec<Station> = nearby
            .iter()
            .take(self.config.station_fanout)
            .cloned()
            .collect();
        let signals = self.collect_station_data(&fanout, &begin_date, &end_date);

        let report = risk::score_conditions(&alerts, &signals);
        info!(
            score = report.score,
            overall = report.overall.as_str(),
            stations = fanout.len(),
            alerts = alerts.len(),
            "risk assessment computed"
        );

        nearby.truncate(self.config.station_fanout);
        Ok(RiskAssessment {
            overall: report.overall,
            score: report.score,
            recommendation: report.recommendation,
            factors: report.factors,
            alerts,
            nearby_stations: nearby,
            surf_forecast,
            last_updated: Utc::now(),
            cached: false,
        })
    }

    /// Fetches tide, wind, and wave series for each station, one worker
    /// per station. Results are reassembled in input order — the tide
    /// tie-break consults the nearest station first, so order matters.
    fn collect_station_data(
        &self,
        stations: &[Station],
        begin_date: &str,
        end_date: &str,
    ) -> Vec<StationSignals> {
        if stations.is_empty() {
            return Vec::new();
        }

        let pool = ThreadPool::new(stations.len());
        let (tx, rx) = mpsc::channel();

        for (index, station) in stations.iter().enumerate() {
            let tx = tx.clone();
            let http = self.http.clone();
            let station_id = station.id.clone();
            let begin = begin_date.to_string();
            let end = end_date.to_string();
            pool.execute(move || {
                let signals = fetch_station_signals(&http, &station_id, &begin, &end);
                let _ = tx.send((index, signals));
            });
        }
        drop(tx);

        let mut slots: Vec<Option<StationSignals>> = stations.iter().map(|_| None).collect();
        for (index, signals) in rx {
            slots[index] = Some(signals);
        }
        slots.into_iter().flatten().collect()
    }
}

/// Fetches all three products for one station. Each fetch degrades
/// independently — a station that reports water level but not waves still
/// contributes its tide trend.
fn fetch_station_signals(
    http: &reqwest::blocking::Client,
    station_id: &str,
    begin_date: &str,
    end_date: &str,
) -> StationSignals {
    let fetch = |product: Product, label: &str| match coops::fetch_series(
        http, product, station_id, begin_date, end_date,
    ) {
        Ok(readings) => Some(readings),
        Err(e) => {
            warn!(station = %station_id, error = %e, "{} unavailable", label);
            None
        }
    };

    let tides = fetch(Product::WaterLevel, "water level");
    let wind = fetch(Product::Wind, "wind");
    let waves = fetch(Product::WaveHeight, "wave height");

    StationSignals {
        station_id: station_id.to_string(),
        tides,
        wind,
        waves,
    }
}

/// Date range for observation requests: today through tomorrow, local
/// wall clock, in the YYYYMMDD form the datagetter expects.
fn assessment_date_range() -> (String, String) {
    let today = Local::now();
    let tomorrow = today + Duration::days(1);
    (
        today.format("%Y%m%d").to_string(),
        tomorrow.format("%Y%m%d").to_string(),
    )
}

/// Rejects malformed call arguments before any I/O happens.
fn validate_coordinates(lat: f64, lon: f64) -> Result<(), MarineError> {
    let valid = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);
    if valid {
        Ok(())
    } else {
        Err(MarineError::InvalidCoordinate { lat, lon })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
