//! Coordinates and distance.
//!
//! Positions are plain (latitude, longitude) pairs in floating-point
//! degrees. Distances are great-circle (haversine) in meters, which is
//! more than accurate enough at city scale.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are real numbers (no NaN, no infinity).
    /// Spawn input must pass this before it touches engine state.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Great-circle distance to `other`, in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }

    /// This coordinate shifted by the given degree deltas.
    pub fn offset_deg(&self, dlat: f64, dlon: f64) -> Coordinate {
        Coordinate::new(self.lat + dlat, self.lon + dlon)
    }
}

/// An immutable labeled point from an external data source
/// (e.g. a police station). The engine only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPoint {
    pub label:    String,
    pub position: Coordinate,
}

impl StaticPoint {
    pub fn new(label: impl Into<String>, position: Coordinate) -> Self {
        Self { label: label.into(), position }
    }
}
