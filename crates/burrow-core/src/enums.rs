//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Target kind, fixed at creation. Determines point value and dwell time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    #[default]
    Standard,
    /// Short dwell, worth more.
    Fast,
    /// Rare, glowing, worth the most.
    Bonus,
}

impl TargetKind {
    /// Pick a kind from a uniform roll in `[0, 1)`.
    ///
    /// Bonus is checked first (10%), then fast (next 20%), else standard.
    pub fn from_roll(roll: f64) -> Self {
        if roll < crate::constants::BONUS_CHANCE {
            TargetKind::Bonus
        } else if roll < crate::constants::FAST_THRESHOLD {
            TargetKind::Fast
        } else {
            TargetKind::Standard
        }
    }
}

/// Target lifecycle phase. A removed target no longer exists in the world,
/// so there is no `Removed` variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPhase {
    /// Placed below the surface, waiting to emerge.
    #[default]
    Spawned,
    /// Visible and hittable; dwell timer running.
    Emerged,
    /// Dwell expired, sinking back. Still hittable while alive.
    Retreating,
    /// Hit by the player; awaiting removal.
    Hit,
}

/// Session (game clock) state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Playing,
    Finished,
}

/// Why a target left the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Retreat animation completed.
    Retreat,
    /// Hit animation completed.
    Hit,
    /// Force-removed when the session ended.
    SessionEnd,
    /// Cleaned up after an internal fault.
    Fault,
}

/// Why a projectile was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileEnd {
    /// Struck a target.
    Collision,
    /// Travelled its maximum distance.
    MaxDistance,
    /// Lifespan timer fired.
    Lifespan,
    /// Destroyed after an internal fault.
    Fault,
}

/// Vertical animation played on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetAnimation {
    Emerge,
    Retreat,
}

/// Easing curve for height animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    EaseOutCubic,
    EaseInCubic,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInCubic => t * t * t,
        }
    }
}

/// HUD text slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudSlot {
    Score,
    Timer,
    FinalScore,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
