/// Great-circle distance between coordinate pairs.
///
/// Used to rank CO-OPS stations by proximity to a beach. Haversine with an
/// Earth radius of 3959 miles, matching the station selection radius units
/// used throughout the service.

/// Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two WGS84 points, in miles.
///
/// Pure and total: any pair of finite coordinates yields a finite,
/// non-negative distance.
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
