//! Shared primitive types used across the simulation core.

/// A simulation tick. One tick = one motion step for every live bus.
pub type Tick = u64;

/// A stable, caller-assigned identifier for a bus (e.g. "24B").
pub type EntityId = String;

/// Batch generation counter. Each `spawn_batch` call gets a fresh id,
/// so a stale driver tick can be matched against the batch it targeted.
pub type BatchId = u64;
