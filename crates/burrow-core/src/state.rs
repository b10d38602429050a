//! Game state snapshot: the complete visible state handed to the host each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, AudioEvent, PresentationIntent};
use crate::types::{ProjectileId, SimTime, TargetId, Vec3};

/// Complete game state produced after each engine step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub session: SessionView,
    /// Live targets in spawn order.
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
    pub audio_events: Vec<AudioEvent>,
    pub presentation: Vec<PresentationIntent>,
    pub alerts: Vec<Alert>,
}

/// Session progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub score: u32,
    pub time_remaining_secs: u32,
    /// Targets struck this session.
    pub hits: u32,
    /// Shots fired this session.
    pub shots: u32,
}

/// A live target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub kind: TargetKind,
    pub phase: TargetPhase,
    pub position: Vec3,
    pub points: u32,
    pub alive: bool,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: Vec3,
    pub direction: Vec3,
    pub traveled: f32,
}
