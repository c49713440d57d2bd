//! Engine events.
//!
//! Every state-changing operation returns the events it produced, in
//! order. Callers (the runner's IPC loop, tests) log or forward them;
//! nothing is persisted — the core is ephemeral per session.

use crate::types::{BatchId, Tick};
use serde::{Deserialize, Serialize};

/// Every event the engine can emit.
/// Variants are appended over time — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    BatchSpawned {
        batch: BatchId,
        entity_count: usize,
    },
    TickCompleted {
        batch: BatchId,
        tick: Tick,
    },
    AttributesShuffled {
        batch: BatchId,
        tick: Tick,
    },
    BatchCleared {
        batch: BatchId,
        tick: Tick,
    },
}

impl SimEvent {
    /// Stable string name for log lines and event streams.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::BatchSpawned { .. }       => "batch_spawned",
            Self::TickCompleted { .. }      => "tick_completed",
            Self::AttributesShuffled { .. } => "attributes_shuffled",
            Self::BatchCleared { .. }       => "batch_cleared",
        }
    }
}
