//! Nearest-neighbor query over static points.
//!
//! Pure functions, no engine state involved. The candidate list is
//! caller-owned (fetched from a geodata provider, or synthesized via
//! `fallback_stations` when that provider is unavailable).

use crate::geo::{Coordinate, StaticPoint};

/// Result of a nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    pub point:      &'a StaticPoint,
    pub distance_m: f64,
}

/// Linear scan for the candidate closest to `query`.
///
/// Returns `None` for an empty candidate list — an expected condition,
/// not an error. Ties go to the first candidate encountered, so the
/// result is deterministic for a fixed input ordering.
pub fn nearest_to<'a>(query: &Coordinate, candidates: &'a [StaticPoint]) -> Option<Nearest<'a>> {
    let mut best: Option<Nearest<'a>> = None;
    for point in candidates {
        let distance_m = query.distance_to(&point.position);
        // Strict < keeps the first of any equidistant pair.
        if best.map_or(true, |b| distance_m < b.distance_m) {
            best = Some(Nearest { point, distance_m });
        }
    }
    best
}

/// Degree offsets for the synthesized offline station set.
/// Roughly a few hundred meters out in three directions.
const FALLBACK_OFFSETS_DEG: [(&str, f64, f64); 3] = [
    ("Central Police Station", 0.0030, 0.0020),
    ("East Police Outpost", -0.0020, 0.0040),
    ("Harbour Police Station", 0.0010, -0.0035),
];

/// Synthesize a small fixed station set around `center`.
///
/// Used when the points-of-interest provider fails or returns nothing,
/// so the dashboard stays usable offline. Deterministic: same center,
/// same points.
pub fn fallback_stations(center: &Coordinate) -> Vec<StaticPoint> {
    FALLBACK_OFFSETS_DEG
        .iter()
        .map(|(label, dlat, dlon)| {
            StaticPoint::new(*label, center.offset_deg(*dlat, *dlon))
        })
        .collect()
}
