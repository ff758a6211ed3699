//! Great-circle distance over WGS84 coordinates. Leaf module: the ranking
//! pipeline and the geo backfill both go through here.

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Returns `None` for non-finite or out-of-range values, so malformed
    /// input from the store degrades to "coordinate absent" instead of
    /// poisoning the distance math.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    haversine_km(from.latitude, from.longitude, to.latitude, to.longitude)
}

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUNIS: (f64, f64) = (36.8065, 10.1815);
    const SOUSSE: (f64, f64) = (35.8256, 10.6411);

    #[test]
    fn distance_is_zero_for_identical_points() {
        assert_eq!(haversine_km(TUNIS.0, TUNIS.1, TUNIS.0, TUNIS.1), 0.0);
        assert_eq!(haversine_km(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(TUNIS.0, TUNIS.1, SOUSSE.0, SOUSSE.1);
        let ba = haversine_km(SOUSSE.0, SOUSSE.1, TUNIS.0, TUNIS.1);
        assert!((ab - ba).abs() <= 1e-9 * ab.max(ba));
    }

    #[test]
    fn tunis_to_sousse_is_about_119_km() {
        let d = haversine_km(TUNIS.0, TUNIS.1, SOUSSE.0, SOUSSE.1);
        assert!(d > 118.0 && d < 120.0, "got {} km", d);
    }

    #[test]
    fn distance_is_never_negative() {
        let d = haversine_km(-36.8, -10.2, 35.8, 10.6);
        assert!(d >= 0.0);
    }

    #[test]
    fn coordinate_rejects_malformed_values() {
        assert!(Coordinate::new(f64::NAN, 10.0).is_none());
        assert!(Coordinate::new(36.8, f64::INFINITY).is_none());
        assert!(Coordinate::new(91.0, 10.0).is_none());
        assert!(Coordinate::new(36.8, -180.5).is_none());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
        assert!(Coordinate::new(36.8065, 10.1815).is_some());
    }
}
