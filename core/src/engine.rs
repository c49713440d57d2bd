//! The motion engine — the heart of the shelter simulation.
//!
//! STATE MACHINE (fixed, documented, never extended ad hoc):
//!   Empty  --spawn_batch-->  Active
//!   Active --clear-------->  Empty
//!
//! RULES:
//!   - Only one batch is live at a time; spawning replaces the previous
//!     batch atomically.
//!   - tick() and shuffle_attributes() are no-ops in Empty. A stale
//!     driver timer firing after clear() must never resurrect state.
//!   - All randomness flows through the RngBank streams.
//!   - The engine never does I/O and never sleeps.

use crate::{
    config::SimConfig,
    entity::{Entity, EntityDef},
    error::{SimError, SimResult},
    event::SimEvent,
    geo::Coordinate,
    rng::{RngBank, StreamRng, StreamSlot},
    types::{BatchId, Tick},
};
use std::collections::HashSet;
use std::f64::consts::TAU;

/// The live batch: all buses from one spawn_batch call plus its tick
/// counter. Replaced wholesale, never partially edited.
struct Batch {
    id:       BatchId,
    tick:     Tick,
    entities: Vec<Entity>,
}

pub struct MotionEngine {
    config:        SimConfig,
    spawn_rng:     StreamRng,
    motion_rng:    StreamRng,
    attribute_rng: StreamRng,
    batch:         Option<Batch>,
    next_batch_id: BatchId,
}

impl MotionEngine {
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let bank = RngBank::new(seed);
        Self {
            spawn_rng:     bank.for_stream(StreamSlot::Spawn),
            motion_rng:    bank.for_stream(StreamSlot::Motion),
            attribute_rng: bank.for_stream(StreamSlot::Attribute),
            batch:         None,
            next_batch_id: 0,
            config,
        }
    }

    /// Spawn a full batch of buses around `center`, replacing any live
    /// batch. All-or-nothing: validation failures leave the previous
    /// batch untouched.
    ///
    /// Buses are placed at evenly spaced bearings on a fixed radius so
    /// spawn layouts are reproducible; only the initial heading is
    /// drawn from the spawn stream.
    pub fn spawn_batch(
        &mut self,
        center: Coordinate,
        defs: &[EntityDef],
    ) -> SimResult<Vec<SimEvent>> {
        if !center.is_finite() {
            return Err(SimError::invalid(format!(
                "spawn center must be finite, got ({}, {})",
                center.lat, center.lon
            )));
        }
        if defs.is_empty() {
            return Err(SimError::invalid("spawn batch requires at least one entity"));
        }
        let mut seen = HashSet::new();
        for def in defs {
            if !seen.insert(def.id.as_str()) {
                return Err(SimError::invalid(format!(
                    "duplicate entity id in batch: {}",
                    def.id
                )));
            }
        }

        let mut events = self.clear();

        let count = defs.len();
        let entities = defs
            .iter()
            .enumerate()
            .map(|(i, def)| {
                let bearing = TAU * i as f64 / count as f64;
                let anchor = center.offset_deg(
                    self.config.spawn_radius_deg * bearing.cos(),
                    self.config.spawn_radius_deg * bearing.sin(),
                );
                Entity {
                    id:          def.id.clone(),
                    route:       def.route.clone(),
                    anchor,
                    position:    anchor,
                    heading:     self.spawn_rng.range_f64(0.0, TAU),
                    eta_minutes: def.eta_minutes.max(1),
                }
            })
            .collect();

        let id = self.next_batch_id;
        self.next_batch_id += 1;
        self.batch = Some(Batch { id, tick: 0, entities });

        log::debug!("batch {id} spawned with {count} buses at ({}, {})", center.lat, center.lon);
        events.push(SimEvent::BatchSpawned { batch: id, entity_count: count });
        Ok(events)
    }

    /// Advance every live bus by one simulation step.
    ///
    /// Per bus: heading advances by the fixed angular step, position
    /// moves to anchor + radial step along the new heading (anchored
    /// wobble, bounded by `radial_step_max_deg`), and ETA shifts ±1
    /// with a decrement bias, floored at 1.
    ///
    /// No-op in Empty. Never changes cardinality or ids.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        let config = &self.config;
        let Some(batch) = self.batch.as_mut() else {
            return vec![];
        };

        batch.tick += 1;
        for entity in &mut batch.entities {
            entity.heading = (entity.heading + config.angular_step_rad) % TAU;
            let r = self
                .motion_rng
                .range_f64(config.radial_step_min_deg, config.radial_step_max_deg);
            entity.position = entity
                .anchor
                .offset_deg(r * entity.heading.cos(), r * entity.heading.sin());

            entity.eta_minutes = if self.attribute_rng.chance(config.eta_decrement_bias) {
                entity.eta_minutes.saturating_sub(1).max(1)
            } else {
                entity.eta_minutes + 1
            };
        }

        log::debug!("batch {} tick {} complete", batch.id, batch.tick);
        vec![SimEvent::TickCompleted { batch: batch.id, tick: batch.tick }]
    }

    /// Run n ticks in a loop. Used by tests and fast-forward.
    pub fn run_ticks(&mut self, n: u64) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.tick());
        }
        events
    }

    /// One-shot ±1 ETA perturbation (50/50) on every bus, floored at 1.
    /// Positions are untouched. No-op in Empty.
    pub fn shuffle_attributes(&mut self) -> Vec<SimEvent> {
        let Some(batch) = self.batch.as_mut() else {
            return vec![];
        };

        for entity in &mut batch.entities {
            entity.eta_minutes = if self.attribute_rng.chance(0.5) {
                entity.eta_minutes.saturating_sub(1).max(1)
            } else {
                entity.eta_minutes + 1
            };
        }
        vec![SimEvent::AttributesShuffled { batch: batch.id, tick: batch.tick }]
    }

    /// Empty the live set. Idempotent: clearing an empty engine emits
    /// nothing. After this returns, any outstanding tick targets a dead
    /// batch id and falls through the Empty no-op path.
    pub fn clear(&mut self) -> Vec<SimEvent> {
        match self.batch.take() {
            Some(batch) => {
                log::debug!("batch {} cleared at tick {}", batch.id, batch.tick);
                vec![SimEvent::BatchCleared { batch: batch.id, tick: batch.tick }]
            }
            None => vec![],
        }
    }

    /// Toggle semantics for a start/stop button: spawn if Empty, clear
    /// if Active.
    pub fn toggle(
        &mut self,
        center: Coordinate,
        defs: &[EntityDef],
    ) -> SimResult<Vec<SimEvent>> {
        if self.is_active() {
            Ok(self.clear())
        } else {
            self.spawn_batch(center, defs)
        }
    }

    pub fn is_active(&self) -> bool {
        self.batch.is_some()
    }

    /// Ticks elapsed for the live batch, 0 when Empty.
    pub fn current_tick(&self) -> Tick {
        self.batch.as_ref().map_or(0, |b| b.tick)
    }

    pub fn batch_id(&self) -> Option<BatchId> {
        self.batch.as_ref().map(|b| b.id)
    }

    /// Read access to the live buses, in spawn order. Empty slice when
    /// no batch is live.
    pub fn snapshot(&self) -> &[Entity] {
        self.batch.as_ref().map_or(&[], |b| b.entities.as_slice())
    }

    /// The live set serialized to JSON, for IPC payloads and
    /// determinism checks.
    pub fn snapshot_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self.snapshot())?)
    }
}
