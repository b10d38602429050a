//! Player commands delivered by the host to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start button pressed.
    StartGame,
    /// Restart button pressed on the game-over panel.
    ResetGame,
    /// Controller trigger pressed. `grip` is the weapon's world position and
    /// `aim` its world forward direction (need not be normalized).
    PullTrigger { grip: Vec3, aim: Vec3 },
}
