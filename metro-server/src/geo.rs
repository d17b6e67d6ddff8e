//! Distance functions.
//!
//! Both functions are total: NaN inputs propagate to a NaN result rather
//! than being rejected.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two latitude/longitude points, in km.
///
/// Uses the `0.5 - cos(Δφ)/2 + cos φ1 cos φ2 (1 - cos Δλ)/2` form of the
/// haversine, which is exactly zero for identical points and exactly
/// symmetric in its arguments.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = 0.5 - d_lat.cos() / 2.0
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (1.0 - d_lon.cos()) / 2.0;

    EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
}

/// Euclidean distance on a local plane.
pub fn planar_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn latitude() -> impl Strategy<Value = f64> {
        -90.0..=90.0f64
    }

    fn longitude() -> impl Strategy<Value = f64> {
        -180.0..=180.0f64
    }

    proptest! {
        #[test]
        fn haversine_zero_for_same_point(lat in latitude(), lon in longitude()) {
            prop_assert_eq!(haversine_km(lat, lon, lat, lon), 0.0);
        }

        #[test]
        fn haversine_is_symmetric(
            lat1 in latitude(), lon1 in longitude(),
            lat2 in latitude(), lon2 in longitude(),
        ) {
            prop_assert_eq!(
                haversine_km(lat1, lon1, lat2, lon2),
                haversine_km(lat2, lon2, lat1, lon1)
            );
        }

        #[test]
        fn planar_is_symmetric(
            x1 in -1000.0..1000.0f64, y1 in -1000.0..1000.0f64,
            x2 in -1000.0..1000.0f64, y2 in -1000.0..1000.0f64,
        ) {
            prop_assert_eq!(planar_distance(x1, y1, x2, y2), planar_distance(x2, y2, x1, y1));
        }
    }
}
