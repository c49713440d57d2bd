//! Engine state-machine tests: Empty ↔ Active, clear idempotence,
//! stale-tick immunity, toggle semantics.

use shelter_core::{
    config::SimConfig,
    engine::MotionEngine,
    entity::EntityDef,
    event::SimEvent,
    geo::Coordinate,
};

fn chennai() -> Coordinate {
    Coordinate::new(13.0827, 80.2707)
}

fn demo_defs() -> Vec<EntityDef> {
    vec![
        EntityDef::new("24B", "Anna Square", 5),
        EntityDef::new("45C", "T. Nagar", 12),
        EntityDef::new("101", "Broadway", 22),
    ]
}

#[test]
fn clear_empties_the_live_set() {
    let mut engine = MotionEngine::new(42, SimConfig::default());
    engine.spawn_batch(chennai(), &demo_defs()).unwrap();
    assert!(engine.is_active());

    let events = engine.clear();
    assert!(matches!(events.as_slice(), [SimEvent::BatchCleared { .. }]));
    assert!(!engine.is_active());
    assert!(engine.snapshot().is_empty());
    assert_eq!(engine.batch_id(), None);
}

#[test]
fn clear_is_idempotent() {
    let mut engine = MotionEngine::new(42, SimConfig::default());
    assert!(engine.clear().is_empty(), "Clearing an empty engine emits nothing");

    engine.spawn_batch(chennai(), &demo_defs()).unwrap();
    engine.clear();
    assert!(engine.clear().is_empty(), "Second clear must be a no-op");
}

#[test]
fn stale_ticks_after_clear_cannot_resurrect_state() {
    // Simulates a driver timer still firing after the batch was
    // cleared — the primary race hazard for a timer-driven caller.
    let mut engine = MotionEngine::new(42, SimConfig::default());
    engine.spawn_batch(chennai(), &demo_defs()).unwrap();
    engine.run_ticks(5);
    engine.clear();

    for _ in 0..10 {
        let events = engine.tick();
        assert!(events.is_empty(), "Tick on Empty must emit nothing");
        assert!(engine.snapshot().is_empty(), "Stale tick resurrected entities");
    }
    assert_eq!(engine.current_tick(), 0);
}

#[test]
fn tick_on_fresh_engine_is_a_no_op() {
    let mut engine = MotionEngine::new(42, SimConfig::default());
    assert!(engine.tick().is_empty());
    assert!(!engine.is_active());
}

#[test]
fn toggle_starts_when_empty_and_stops_when_active() {
    let mut engine = MotionEngine::new(42, SimConfig::default());

    let events = engine.toggle(chennai(), &demo_defs()).unwrap();
    assert!(engine.is_active(), "First toggle must spawn");
    assert!(matches!(events.as_slice(), [SimEvent::BatchSpawned { entity_count: 3, .. }]));

    let events = engine.toggle(chennai(), &demo_defs()).unwrap();
    assert!(!engine.is_active(), "Second toggle must clear");
    assert!(matches!(events.as_slice(), [SimEvent::BatchCleared { .. }]));
}

#[test]
fn respawn_emits_cleared_then_spawned() {
    let mut engine = MotionEngine::new(42, SimConfig::default());
    engine.spawn_batch(chennai(), &demo_defs()).unwrap();

    let events = engine.spawn_batch(chennai(), &demo_defs()).unwrap();
    assert!(
        matches!(
            events.as_slice(),
            [SimEvent::BatchCleared { .. }, SimEvent::BatchSpawned { .. }]
        ),
        "Replacement must clear the old batch before spawning, got {events:?}"
    );
}

#[test]
fn tick_counter_tracks_the_live_batch() {
    let mut engine = MotionEngine::new(42, SimConfig::default());
    engine.spawn_batch(chennai(), &demo_defs()).unwrap();
    engine.run_ticks(7);
    assert_eq!(engine.current_tick(), 7);

    let events = engine.tick();
    assert!(matches!(events.as_slice(), [SimEvent::TickCompleted { tick: 8, .. }]));
}
