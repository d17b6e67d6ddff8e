//! Coordinate types.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// Accepts `latitude`/`longitude` as well as the short `lat`/`lon`/`lng`
/// spellings used by geocoders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        crate::geo::haversine_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// A position on a station's local floor plane.
///
/// Indoor graphs are small enough that distances are planar. Records that
/// carry `latitude`/`longitude` instead of `x`/`y` are mapped onto the same
/// plane with `x = latitude` and `y = longitude`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IndoorPoint {
    pub x: f64,
    pub y: f64,
}

impl IndoorPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &IndoorPoint) -> f64 {
        crate::geo::planar_distance(self.x, self.y, other.x, other.y)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndoorPoint {
    Planar {
        x: f64,
        y: f64,
    },
    Geo {
        #[serde(alias = "lat")]
        latitude: f64,
        #[serde(alias = "lon", alias = "lng")]
        longitude: f64,
    },
}

impl<'de> Deserialize<'de> for IndoorPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawIndoorPoint::deserialize(deserializer)? {
            RawIndoorPoint::Planar { x, y } => IndoorPoint { x, y },
            RawIndoorPoint::Geo {
                latitude,
                longitude,
            } => IndoorPoint {
                x: latitude,
                y: longitude,
            },
        })
    }
}
