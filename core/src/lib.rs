//! shelter-core — simulation core for the smart bus-shelter dashboard.
//!
//! The library owns exactly one thing: a set of simulated moving buses
//! plus a nearest-station query over caller-supplied points.
//!
//! RULES:
//!   - The engine performs no I/O. Map tiles, geolocation, weather and
//!     station lookups all live in the caller.
//!   - The engine owns no timer. `tick()` is a plain state transition;
//!     whoever drives it (shelter-runner, a UI loop, a test) decides
//!     the cadence.
//!   - All randomness flows through the RngBank. Nothing in the core
//!     may call a platform RNG.

pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod event;
pub mod geo;
pub mod proximity;
pub mod rng;
pub mod types;
