//! Engine tunables.
//!
//! All motion constants live here so tests and the runner share one
//! source of truth. Steps are expressed in coordinate degrees; they are
//! deliberately small relative to the coordinate scale so buses wobble
//! near their spawn point instead of translating across the map.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Radius at which buses are placed around the spawn center.
    pub spawn_radius_deg: f64,
    /// Fixed heading increment per tick, radians.
    pub angular_step_rad: f64,
    /// Lower bound of the per-tick radial step, degrees.
    pub radial_step_min_deg: f64,
    /// Upper bound of the per-tick radial step, degrees.
    pub radial_step_max_deg: f64,
    /// Probability that a tick decrements ETA (the rest increment).
    pub eta_decrement_bias: f64,
    /// Suggested driver cadence, milliseconds. The engine itself never
    /// sleeps; this is read by whoever owns the timer.
    pub tick_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_radius_deg:    0.004,
            angular_step_rad:    0.25,
            radial_step_min_deg: 0.0002,
            radial_step_max_deg: 0.0012,
            eta_decrement_bias:  0.6,
            tick_interval_ms:    2000,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. The runner uses this for `--config`;
    /// tests use `SimConfig::default()`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.eta_decrement_bias) {
            anyhow::bail!("eta_decrement_bias must be in [0, 1]");
        }
        if self.radial_step_min_deg > self.radial_step_max_deg {
            anyhow::bail!("radial_step_min_deg must be <= radial_step_max_deg");
        }
        Ok(())
    }
}
