//! Scripted player for the demo binary: aims at the first exposed target.

use burrow_core::commands::PlayerCommand;
use burrow_core::constants::MIN_HITTABLE_HEIGHT;
use burrow_core::enums::SessionPhase;
use burrow_core::state::GameStateSnapshot;
use burrow_core::types::Vec3;

/// Where the player holds the weapon.
pub const GRIP: Vec3 = Vec3::new(0.0, 0.0, 0.0);

/// Trigger pull aimed at the first alive, exposed target, if any.
pub fn next_shot(snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    if snapshot.session.phase != SessionPhase::Playing {
        return None;
    }
    let target = snapshot
        .targets
        .iter()
        .find(|t| t.alive && t.position.y >= MIN_HITTABLE_HEIGHT)?;
    Some(PlayerCommand::PullTrigger {
        grip: GRIP,
        aim: target.position - GRIP,
    })
}
