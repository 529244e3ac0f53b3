/// Station selection for the rip current risk service.
///
/// Two concerns: ranking the live CO-OPS station directory by proximity to
/// a query point, and a small static registry of well-known stations for
/// popular beaches. The registry is reference material surfaced through
/// the HTTP endpoint — assessment always works from the live directory so
/// newly commissioned stations are picked up without a redeploy.

use crate::geo::distance_miles;
use crate::ingest::coops;
use crate::model::{Station, StationRecord};
use serde::Serialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// Reference registry
// ---------------------------------------------------------------------------

/// A well-known CO-OPS station near a popular beach.
#[derive(Debug, Serialize)]
pub struct ReferenceStation {
    /// Short lookup key, e.g. "miami".
    pub slug: &'static str,
    /// 7-digit CO-OPS station id.
    pub station_id: &'static str,
    /// Official station name.
    pub name: &'static str,
}

/// Well-known stations for popular beach destinations, East Coast first.
///
/// Sources: CO-OPS station directory (tidesandcurrents.noaa.gov).
pub static REFERENCE_STATIONS: &[ReferenceStation] = &[
    ReferenceStation {
        slug: "miami",
        station_id: "8723214",
        name: "Virginia Key, FL",
    },
    ReferenceStation {
        slug: "virginia_beach",
        station_id: "8638610",
        name: "Sewells Point, VA",
    },
    ReferenceStation {
        slug: "ocean_city",
        station_id: "8570283",
        name: "Ocean City Inlet, MD",
    },
    ReferenceStation {
        slug: "outer_banks",
        station_id: "8652587",
        name: "Oregon Inlet Marina, NC",
    },
    ReferenceStation {
        slug: "myrtle_beach",
        station_id: "8661070",
        name: "Springmaid Pier, SC",
    },
    ReferenceStation {
        slug: "san_francisco",
        station_id: "9414290",
        name: "San Francisco, CA",
    },
    ReferenceStation {
        slug: "los_angeles",
        station_id: "9410840",
        name: "San Pedro, CA",
    },
];

/// Looks up a reference station by slug. Returns `None` if not found.
pub fn find_reference_station(slug: &str) -> Option<&'static ReferenceStation> {
    REFERENCE_STATIONS.iter().find(|s| s.slug == slug)
}

// ---------------------------------------------------------------------------
// Proximity selection
// ---------------------------------------------------------------------------

/// Ranks directory records by distance from a query point: computes the
/// distance to each, drops records beyond `radius_miles`, sorts ascending.
/// Pure — the directory fetch happens in `find_nearby_stations`.
pub fn select_nearby(
    records: &[StationRecord],
    lat: f64,
    lon: f64,
    radius_miles: f64,
) -> Vec<Station> {
    let mut nearby: Vec<Station> = records
        .iter()
        .filter_map(|record| {
            let distance = distance_miles(lat, lon, record.latitude, record.longitude);
            if distance <= radius_miles {
                Some(Station {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    latitude: record.latitude,
                    longitude: record.longitude,
                    distance_miles: distance,
                })
            } else {
                None
            }
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    nearby
}

/// Fetches the full station directory and returns the stations within
/// `radius_miles` of the point, nearest first.
///
/// The directory is fetched once per call; result caching lives one layer
/// up in the orchestrator's assessment cache. A directory fetch failure
/// degrades to an empty list (logged) rather than an error, so that a
/// transient outage does not abort the whole risk assessment — alerts and
/// the zone forecast can still contribute.
pub fn find_nearby_stations(
    http: &reqwest::blocking::Client,
    lat: f64,
    lon: f64,
    radius_miles: f64,
) -> Vec<Station> {
    match coops::fetch_station_directory(http) {
        Ok(records) => select_nearby(&records, lat, lon, radius_miles),
        Err(e) => {
            warn!(error = %e, "station directory unavailable, continuing without station data");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
