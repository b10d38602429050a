//! Snapshot system: reads the world and engine state into a `GameStateSnapshot`.
//!
//! Read-only: it never touches the world.

use hecs::World;

use burrow_core::components::*;
use burrow_core::state::*;
use burrow_core::types::SimTime;
use burrow_fsm::session::SessionClock;

use super::projectile::ProjectileState;
use super::spawner::SpawnerState;
use super::Outbox;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    session: &SessionClock,
    spawner: &SpawnerState,
    projectiles: &ProjectileState,
    outbox: Outbox,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        session: SessionView {
            phase: session.phase(),
            score: session.score(),
            time_remaining_secs: session.time_remaining_secs(),
            hits: session.hits(),
            shots: session.shots(),
        },
        targets: build_targets(world, spawner),
        projectiles: build_projectiles(world, projectiles),
        audio_events: outbox.audio,
        presentation: outbox.presentation,
        alerts: outbox.alerts,
    }
}

/// Live targets in spawn order. Entities the world no longer holds are skipped.
fn build_targets(world: &World, spawner: &SpawnerState) -> Vec<TargetView> {
    spawner
        .live()
        .filter_map(|(_, entity)| {
            let target = world.get::<&Target>(entity).ok()?;
            let pos = world.get::<&Position>(entity).ok()?;
            Some(TargetView {
                id: target.id,
                kind: target.kind,
                phase: target.phase,
                position: pos.0,
                points: target.points,
                alive: target.alive,
            })
        })
        .collect()
}

fn build_projectiles(world: &World, projectiles: &ProjectileState) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(entity, (projectile, _))| projectiles.entity(projectile.id) == Some(*entity))
        .map(|(_, (projectile, pos))| ProjectileView {
            id: projectile.id,
            position: pos.0,
            direction: projectile.direction,
            traveled: projectile.traveled,
        })
        .collect();

    views.sort_by_key(|p| p.id);
    views
}
