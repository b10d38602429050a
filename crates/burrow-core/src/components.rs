//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ProjectileId, TargetId, TimerHandle, Vec3};

/// World position of an entity (m). y is up; the playable surface is y = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// A hittable target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub kind: TargetKind,
    /// Point value, derived from kind at spawn.
    pub points: u32,
    /// Cleared exactly once, by a hit.
    pub alive: bool,
    pub retreating: bool,
    pub phase: TargetPhase,
    /// Where the spawner placed it (surface level).
    pub spawn_position: Vec3,
    /// Pending dwell-to-retreat timer, cancelled by a hit.
    pub retreat_timer: Option<TimerHandle>,
}

/// An in-flight height animation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeightTween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

/// Vertical motion of a target.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TargetMotion {
    pub tween: Option<HeightTween>,
}

/// A fired shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub origin: Vec3,
    /// Unit direction of travel.
    pub direction: Vec3,
    /// Units per second.
    pub speed: f32,
    /// Distance covered so far.
    pub traveled: f32,
    /// Time alive so far (ms).
    pub age_ms: u64,
    pub max_distance: f32,
    pub lifespan_ms: u64,
}
