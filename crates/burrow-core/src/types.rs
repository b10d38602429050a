//! Fundamental identifiers, geometry, and simulation time.

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Unique id of a spawned target. Ids increase with creation order, so
/// ordering by id is ordering by spawn sequence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TargetId(pub u32);

/// Unique id of a fired projectile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProjectileId(pub u32);

/// Cancel token returned by the scheduler for a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Simulation time tracking. Time is virtual and only moves when the host
/// advances the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames advanced so far.
    pub frame: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: u64,
}

impl SimTime {
    /// Advance by one frame of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: u64) {
        self.frame += 1;
        self.elapsed_ms += dt_ms;
    }

    /// Elapsed simulation time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target-{}", self.0)
    }
}

impl std::fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "projectile-{}", self.0)
    }
}
