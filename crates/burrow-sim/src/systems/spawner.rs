//! Spawner: keeps up to `max_targets` live targets, placing a new one at a
//! jittered interval while enabled.
//!
//! The live set is the single source of truth for which targets exist. It is
//! ordered by `TargetId`, so any scan over it runs in spawn order.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use burrow_core::config::GameConfig;
use burrow_core::constants::*;
use burrow_core::enums::TargetKind;
use burrow_core::types::{TargetId, TimerHandle, Vec3};

use super::targets;
use super::Outbox;
use crate::scheduler::{Scheduler, TimerAction};
use crate::world_setup;

/// Spawner state. Owned by the engine.
#[derive(Debug)]
pub struct SpawnerState {
    enabled: bool,
    live: BTreeMap<TargetId, Entity>,
    max_targets: usize,
    interval_ms: u64,
    spawn_radius: f32,
    candidates: Vec<Vec3>,
    pending: Option<TimerHandle>,
    next_id: u32,
}

impl SpawnerState {
    /// Build a disabled spawner and lay out its candidate positions.
    pub fn new(config: &GameConfig, rng: &mut ChaCha8Rng) -> Self {
        Self {
            enabled: false,
            live: BTreeMap::new(),
            max_targets: config.max_targets,
            interval_ms: config.spawn_interval_ms(),
            spawn_radius: config.spawn_radius,
            candidates: world_setup::generate_spawn_candidates(rng, config.spawn_radius),
            pending: None,
            next_id: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_full(&self) -> bool {
        self.live.len() >= self.max_targets
    }

    /// Live target ids in spawn order.
    pub fn live_ids(&self) -> Vec<TargetId> {
        self.live.keys().copied().collect()
    }

    pub fn live(&self) -> impl Iterator<Item = (TargetId, Entity)> + '_ {
        self.live.iter().map(|(&id, &entity)| (id, entity))
    }

    pub fn entity(&self, id: TargetId) -> Option<Entity> {
        self.live.get(&id).copied()
    }

    pub fn candidates(&self) -> &[Vec3] {
        &self.candidates
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Take the next target id.
    pub fn allocate_id(&mut self) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a freshly created target to the live set.
    pub fn track(&mut self, id: TargetId, entity: Entity) {
        self.live.insert(id, entity);
    }

    /// Drop a target from the live set. No-op if it is not there.
    pub fn remove_target(&mut self, id: TargetId) -> Option<Entity> {
        self.live.remove(&id)
    }

    /// Mark the scheduled attempt as consumed once its timer fires.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }
}

/// Enable spawning and place the first target immediately.
/// Does nothing if the spawner is already running.
pub fn start(
    spawner: &mut SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    rng: &mut ChaCha8Rng,
    out: &mut Outbox,
) {
    if spawner.enabled {
        return;
    }
    spawner.enabled = true;
    info!(
        max_targets = spawner.max_targets,
        interval_ms = spawner.interval_ms,
        "spawner started"
    );
    spawn_one(spawner, world, timers, rng, out);
}

/// Disable spawning and cancel the pending attempt. Live targets are left
/// alone.
pub fn stop(spawner: &mut SpawnerState, timers: &mut impl Scheduler) {
    spawner.enabled = false;
    if let Some(handle) = spawner.pending.take() {
        timers.cancel(handle);
    }
    info!(live = spawner.live.len(), "spawner stopped");
}

/// One spawn attempt.
///
/// At capacity it backs off for a short fixed delay instead of placing a
/// target. Otherwise it places a target of a random kind at a random
/// candidate position and schedules the next attempt after a jittered
/// interval. Nothing here can fail: candidate selection always yields a
/// position and the world insert is infallible.
pub fn spawn_one(
    spawner: &mut SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    rng: &mut ChaCha8Rng,
    out: &mut Outbox,
) {
    if !spawner.enabled {
        return;
    }
    if let Some(handle) = spawner.pending.take() {
        timers.cancel(handle);
    }

    if spawner.is_full() {
        debug!(live = spawner.live.len(), "spawner at capacity, backing off");
        spawner.pending = Some(timers.schedule_after(SPAWN_BACKOFF_MS, TimerAction::SpawnAttempt));
        return;
    }

    let kind = TargetKind::from_roll(rng.gen::<f64>());
    let position =
        world_setup::pick_spawn_position(rng, &spawner.candidates, spawner.spawn_radius);
    targets::spawn(spawner, world, timers, kind, position, out);

    let delay = jittered_interval(rng, spawner.interval_ms);
    spawner.pending = Some(timers.schedule_after(delay, TimerAction::SpawnAttempt));
}

/// Scale `interval_ms` by a uniform factor in `[0.8, 1.2)`.
pub fn jittered_interval(rng: &mut ChaCha8Rng, interval_ms: u64) -> u64 {
    let factor = SPAWN_JITTER_MIN + rng.gen::<f64>() * SPAWN_JITTER_SPAN;
    (interval_ms as f64 * factor).round() as u64
}
