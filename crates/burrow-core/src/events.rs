//! Events emitted by the simulation for audio, presentation, and diagnostics.
//!
//! The core never calls into the host directly. It emits intents, and the host
//! applies them fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ProjectileId, TargetId, Vec3};

/// Audio notifications for the sound collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    TargetEmerged { target: TargetId },
    TargetHit { target: TargetId, points: u32 },
    TargetRetreated { target: TargetId },
    Shot,
    SessionChanged { phase: SessionPhase },
}

/// Presentation intents for the rendering host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationIntent {
    /// Create a target entity below the surface.
    PlaceTarget {
        target: TargetId,
        kind: TargetKind,
        position: Vec3,
        color: String,
        glow: bool,
    },
    /// Start a vertical animation on a target.
    AnimateTarget {
        target: TargetId,
        animation: TargetAnimation,
        duration_ms: u64,
    },
    /// Particle burst where a target was hit.
    HitBurst { position: Vec3, duration_ms: u64 },
    /// Floating "+N" text above a hit target.
    ScorePopup {
        points: u32,
        position: Vec3,
        highlight: bool,
        duration_ms: u64,
    },
    /// Destroy a target entity.
    RemoveTarget { target: TargetId },
    /// Create a projectile entity.
    PlaceProjectile { projectile: ProjectileId, position: Vec3 },
    /// Destroy a projectile entity.
    RemoveProjectile { projectile: ProjectileId },
    /// Weapon kick after a shot.
    Recoil { duration_ms: u64 },
    /// Replace HUD text.
    SetText { slot: HudSlot, text: String },
    /// Show or hide the start button.
    SetStartButtonVisible { visible: bool },
    /// Show or hide the game-over panel.
    SetGameOverVisible { visible: bool },
}

/// Alert for the non-blocking diagnostic surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    /// Component that raised the alert (e.g. "spawner").
    pub component: String,
    /// Operation in progress when it was raised (e.g. "spawn").
    pub action: String,
    pub message: String,
    pub frame: u64,
}
