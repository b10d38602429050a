//! Systems that operate on the simulation world.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they touch. They do not own state; results leave through the `Outbox`.

pub mod hud;
pub mod motion;
pub mod projectile;
pub mod snapshot;
pub mod spawner;
pub mod targets;

use burrow_core::events::{Alert, AudioEvent, PresentationIntent};

/// Notifications produced during one engine step, drained into the snapshot.
#[derive(Debug, Default)]
pub struct Outbox {
    pub audio: Vec<AudioEvent>,
    pub presentation: Vec<PresentationIntent>,
    pub alerts: Vec<Alert>,
}

impl Outbox {
    pub fn take(&mut self) -> Outbox {
        std::mem::take(self)
    }
}
