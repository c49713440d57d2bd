//! The simulated bus: spawn-time definition and live state.

use crate::geo::Coordinate;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// Caller-supplied definition for one bus in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    pub id:          EntityId,
    pub route:       String,
    /// Initial estimated time of arrival, in minutes. Clamped to ≥ 1.
    pub eta_minutes: u32,
}

impl EntityDef {
    pub fn new(id: impl Into<String>, route: impl Into<String>, eta_minutes: u32) -> Self {
        Self {
            id:          id.into(),
            route:       route.into(),
            eta_minutes: eta_minutes.max(1),
        }
    }
}

/// A live bus. `id` and `route` never change after spawn.
///
/// Motion is anchored: every tick offsets from `anchor` (the spawn
/// position), not from the previous position, so a bus wobbles inside a
/// disc of radius `radial_step_max_deg` instead of drifting off the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id:          EntityId,
    pub route:       String,
    pub anchor:      Coordinate,
    pub position:    Coordinate,
    /// Heading in radians, advanced by a fixed step every tick.
    pub heading:     f64,
    /// Estimated time of arrival in minutes. Invariant: always ≥ 1.
    pub eta_minutes: u32,
}
