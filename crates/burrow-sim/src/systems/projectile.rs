//! Projectile system: firing, straight-line motion, and target collision.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::{debug, trace};

use burrow_core::components::{Position, Projectile};
use burrow_core::config::{GameConfig, ProjectileConfig};
use burrow_core::constants::*;
use burrow_core::enums::ProjectileEnd;
use burrow_core::events::{AudioEvent, PresentationIntent};
use burrow_core::types::{ProjectileId, TargetId, Vec3};
use burrow_fsm::session::SessionClock;

use super::spawner::SpawnerState;
use super::{targets, Outbox};
use crate::error::SimError;
use crate::scheduler::{Scheduler, TimerAction};
use crate::world_setup;

/// In-flight projectiles and the weapon that fires them.
#[derive(Debug)]
pub struct ProjectileState {
    live: BTreeMap<ProjectileId, Entity>,
    next_id: u32,
    last_fire_ms: Option<u64>,
    cooldown_ms: u64,
    ballistics: ProjectileConfig,
}

impl ProjectileState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            live: BTreeMap::new(),
            next_id: 0,
            last_fire_ms: None,
            cooldown_ms: config.fire_cooldown_ms,
            ballistics: config.projectile.clone(),
        }
    }

    pub fn count(&self) -> usize {
        self.live.len()
    }

    pub fn ids(&self) -> Vec<ProjectileId> {
        self.live.keys().copied().collect()
    }

    pub fn entity(&self, id: ProjectileId) -> Option<Entity> {
        self.live.get(&id).copied()
    }
}

/// Why a trigger pull produced no shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejected {
    /// Fired again before the cooldown elapsed.
    CoolingDown,
    /// The aim vector has no direction.
    NoAim,
}

/// Pull the trigger. On success a projectile leaves the muzzle, a short
/// distance ahead of the grip along the aim.
pub fn fire(
    state: &mut ProjectileState,
    world: &mut World,
    timers: &mut impl Scheduler,
    session: &mut SessionClock,
    grip: Vec3,
    aim: Vec3,
    out: &mut Outbox,
) -> Result<ProjectileId, FireRejected> {
    let now = timers.now_ms();
    if let Some(last) = state.last_fire_ms {
        if now < last + state.cooldown_ms {
            return Err(FireRejected::CoolingDown);
        }
    }

    let direction = aim.normalize_or_zero();
    if direction == Vec3::ZERO {
        return Err(FireRejected::NoAim);
    }

    state.last_fire_ms = Some(now);
    let muzzle = grip + direction * MUZZLE_OFFSET;
    let ballistics = state.ballistics.clone();
    let id = create(state, world, timers, muzzle, direction, &ballistics, out);

    session.record_shot();
    out.audio.push(AudioEvent::Shot);
    out.presentation.push(PresentationIntent::Recoil {
        duration_ms: RECOIL_MS,
    });
    Ok(id)
}

/// Create a projectile at `origin` heading along `direction` and arm its
/// lifespan timer. The direction is normalized here.
pub fn create(
    state: &mut ProjectileState,
    world: &mut World,
    timers: &mut impl Scheduler,
    origin: Vec3,
    direction: Vec3,
    ballistics: &ProjectileConfig,
    out: &mut Outbox,
) -> ProjectileId {
    let id = ProjectileId(state.next_id);
    state.next_id += 1;

    let entity = world_setup::spawn_projectile(
        world,
        id,
        origin,
        direction.normalize_or_zero(),
        ballistics.speed,
        ballistics.max_distance,
        ballistics.lifespan_ms,
    );
    state.live.insert(id, entity);
    timers.schedule_after(ballistics.lifespan_ms, TimerAction::ExpireProjectile(id));

    out.presentation.push(PresentationIntent::PlaceProjectile {
        projectile: id,
        position: origin,
    });
    debug!(projectile = %id, ?origin, ?direction, "projectile created");
    id
}

/// Advance one projectile by `dt_ms`. Returns its new position and whether
/// it has reached its maximum distance.
///
/// Distance is derived from total age rather than accumulated per frame, so
/// the result does not depend on how time was sliced.
pub fn advance(projectile: &mut Projectile, dt_ms: u64) -> (Vec3, bool) {
    projectile.age_ms += dt_ms;
    let traveled = projectile.speed * projectile.age_ms as f32 / 1000.0;
    projectile.traveled = traveled.min(projectile.max_distance);
    let position = projectile.origin + projectile.direction * projectile.traveled;
    (position, traveled >= projectile.max_distance)
}

/// Whether a projectile at `projectile` strikes a target at `target`.
/// Targets below the hittable height are never struck.
pub fn collides(projectile: Vec3, target: Vec3) -> bool {
    target.y >= MIN_HITTABLE_HEIGHT && projectile.distance(target) < HIT_RADIUS
}

/// Find the first live target struck at `position`, in spawn order.
///
/// A target that was already hit stays in the live set until its removal
/// fires, and it still absorbs projectiles until then.
pub fn first_strike(
    position: Vec3,
    world: &World,
    spawner: &SpawnerState,
) -> Result<Option<TargetId>, SimError> {
    for (id, entity) in spawner.live() {
        let target_pos = world
            .get::<&Position>(entity)
            .map_err(|source| SimError::TargetComponent { id, source })?
            .0;
        if collides(position, target_pos) {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

/// Step every projectile by `dt_ms`, one at a time in creation order, so a
/// target struck by one projectile is already dead for the next.
///
/// A fault in one projectile is returned with its id and does not stop the
/// others.
pub fn run(
    state: &mut ProjectileState,
    world: &mut World,
    timers: &mut impl Scheduler,
    spawner: &SpawnerState,
    session: &mut SessionClock,
    dt_ms: u64,
    out: &mut Outbox,
) -> Vec<(ProjectileId, SimError)> {
    let mut faults = Vec::new();
    for id in state.ids() {
        if let Err(err) = step_one(state, world, timers, spawner, session, id, dt_ms, out) {
            faults.push((id, err));
        }
    }
    faults
}

#[allow(clippy::too_many_arguments)]
fn step_one(
    state: &mut ProjectileState,
    world: &mut World,
    timers: &mut impl Scheduler,
    spawner: &SpawnerState,
    session: &mut SessionClock,
    id: ProjectileId,
    dt_ms: u64,
    out: &mut Outbox,
) -> Result<(), SimError> {
    let Some(entity) = state.entity(id) else {
        return Ok(());
    };

    let (position, spent) = {
        let mut projectile = world
            .get::<&mut Projectile>(entity)
            .map_err(|source| SimError::ProjectileComponent { id, source })?;
        advance(&mut projectile, dt_ms)
    };
    world
        .get::<&mut Position>(entity)
        .map_err(|source| SimError::ProjectileComponent { id, source })?
        .0 = position;

    if spent {
        destroy(state, world, id, ProjectileEnd::MaxDistance, out)?;
        return Ok(());
    }

    if let Some(target) = first_strike(position, world, spawner)? {
        let accepted = targets::hit(spawner, world, timers, session, target, out)?;
        trace!(projectile = %id, target_id = %target, accepted, "collision");
        destroy(state, world, id, ProjectileEnd::Collision, out)?;
    }
    Ok(())
}

/// Destroy a projectile. Returns `Ok(false)` if it was already gone.
pub fn destroy(
    state: &mut ProjectileState,
    world: &mut World,
    id: ProjectileId,
    end: ProjectileEnd,
    out: &mut Outbox,
) -> Result<bool, SimError> {
    let Some(entity) = state.live.remove(&id) else {
        return Ok(false);
    };
    out.presentation
        .push(PresentationIntent::RemoveProjectile { projectile: id });
    world
        .despawn(entity)
        .map_err(|source| SimError::ProjectileDespawn { id, source })?;
    debug!(projectile = %id, ?end, "projectile destroyed");
    Ok(true)
}
