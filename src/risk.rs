/// Rip current risk scoring.
///
/// `score_conditions` is the central algorithm of the service: a pure,
/// total function combining four independent signals — active alerts, wave
/// height, wind speed, and tide direction — into an additive score, a
/// category on a fixed ladder, and per-factor explanation strings.
///
/// Absent or unparseable data never fails the scorer; a missing signal
/// simply contributes nothing, so partial upstream outages degrade into a
/// lower score rather than an error.

use crate::model::{Alert, ConditionsReport, RiskCategory, RiskFactors, StationSignals};

/// How many of the most recent water-level readings the tide trend looks at.
const TIDE_WINDOW: usize = 6;

/// Scores rip current risk from active alerts and per-station readings.
pub fn score_conditions(alerts: &[Alert], stations: &[StationSignals]) -> ConditionsReport {
    let mut score = 0;
    let mut factors = RiskFactors::default();

    let (alert_points, alert_factor) = alerts_contribution(alerts);
    score += alert_points;
    factors.alerts = alert_factor;

    let (wave_points, wave_factor) = waves_contribution(stations);
    score += wave_points;
    factors.waves = wave_factor;

    let (wind_points, wind_factor) = wind_contribution(stations);
    score += wind_points;
    factors.wind = wind_factor;

    let (tide_points, tide_factor) = tide_contribution(stations);
    score += tide_points;
    factors.tide = tide_factor;

    let overall = RiskCategory::from_score(score);
    ConditionsReport {
        overall,
        score,
        recommendation: overall.recommendation().to_string(),
        factors,
    }
}

// ---------------------------------------------------------------------------
// Factor contributions
// ---------------------------------------------------------------------------

/// Active alerts: a rip current warning dominates (+5); any other surf
/// advisory is a flat +2. The factor message carries the first matching
/// headline so clients can show the official wording.
fn alerts_contribution(alerts: &[Alert]) -> (u32, Option<String>) {
    if alerts.is_empty() {
        return (0, None);
    }

    let rip_alert = alerts
        .iter()
        .find(|alert| alert.event.to_lowercase().contains("rip current"));

    match rip_alert {
        Some(alert) => {
            let headline = if alert.headline.trim().is_empty() {
                "Rip Current Warning"
            } else {
                alert.headline.as_str()
            };
            (5, Some(format!("ACTIVE RIP CURRENT WARNING - {}", headline)))
        }
        None => (2, Some("Beach hazard or surf advisory active".to_string())),
    }
}

/// Wave height: max and mean over every parseable reading from every
/// station, bucketed together. Readings are deliberately pooled across
/// stations rather than distance-weighted.
fn waves_contribution(stations: &[StationSignals]) -> (u32, Option<String>) {
    let heights: Vec<f64> = stations
        .iter()
        .filter_map(|s| s.waves.as_ref())
        .flatten()
        .filter_map(|r| r.value_f64())
        .collect();

    if heights.is_empty() {
        return (0, None);
    }

    let max = heights.iter().copied().fold(f64::MIN, f64::max);
    let mean = heights.iter().sum::<f64>() / heights.len() as f64;

    let (points, label) = if max > 8.0 || mean > 5.0 {
        (4, "HIGH RISK - Large waves")
    } else if max > 5.0 || mean > 3.0 {
        (3, "ELEVATED - Moderate to large waves")
    } else if max > 3.0 || mean > 2.0 {
        (2, "MODERATE - Some wave activity")
    } else {
        (1, "LOW - Small waves")
    };

    (
        points,
        Some(format!("{} (max: {:.1}ft, avg: {:.1}ft)", label, max, mean)),
    )
}

/// Wind: the single worst speed across every station's readings. An
/// all-calm series (max 0) contributes nothing.
fn wind_contribution(stations: &[StationSignals]) -> (u32, Option<String>) {
    let max = stations
        .iter()
        .filter_map(|s| s.wind.as_ref())
        .flatten()
        .filter_map(|r| r.value_f64())
        .fold(0.0_f64, f64::max);

    if max <= 0.0 {
        return (0, None);
    }

    let (points, message) = if max > 25.0 {
        (
            3,
            format!("HIGH - Strong winds ({:.1} mph) likely creating dangerous surf", max),
        )
    } else if max > 15.0 {
        (
            2,
            format!("MODERATE - Moderate winds ({:.1} mph) may affect surf conditions", max),
        )
    } else {
        (1, format!("LOW - Light winds ({:.1} mph)", max))
    };

    (points, Some(message))
}

/// Tide direction: the first station (in input order) with at least two
/// water-level readings decides. Within that station's last six readings,
/// a drop between the two most recent means an outgoing tide (+1).
///
/// Only one station is consulted — a deliberate tie-break, not exhaustive
/// aggregation. A station whose most recent readings don't parse is
/// skipped in favor of the next.
fn tide_contribution(stations: &[StationSignals]) -> (u32, Option<String>) {
    for station in stations {
        let Some(tides) = &station.tides else { continue };
        if tides.len() < 2 {
            continue;
        }

        let recent = &tides[tides.len().saturating_sub(TIDE_WINDOW)..];
        let current = recent[recent.len() - 1].value_f64();
        let previous = recent[recent.len() - 2].value_f64();

        match (current, previous) {
            (Some(current), Some(previous)) => {
                return if current < previous {
                    (
                        1,
                        Some("OUTGOING TIDE - Increased rip current risk during outgoing tide".to_string()),
                    )
                } else {
                    (0, Some("INCOMING TIDE - Lower rip current risk".to_string()))
                };
            }
            _ => continue,
        }
    }

    (0, None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
