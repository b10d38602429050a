//! Target lifecycle system.
//!
//! Drives each target through `spawned -> emerged -> {retreating | hit} ->
//! removed` by feeding timer and collision stimuli into the target FSM, then
//! applying the side effects (tweens, timers, score, intents).

use hecs::{Entity, World};
use tracing::{debug, info};

use burrow_core::components::{HeightTween, Position, Target, TargetMotion};
use burrow_core::constants::*;
use burrow_core::enums::*;
use burrow_core::events::{AudioEvent, PresentationIntent};
use burrow_core::types::{TargetId, Vec3};
use burrow_fsm::profiles::get_profile;
use burrow_fsm::session::SessionClock;
use burrow_fsm::target::{evaluate, TargetInput, TargetStatus};

use super::spawner::SpawnerState;
use super::{hud, Outbox};
use crate::error::SimError;
use crate::scheduler::{Scheduler, TimerAction};
use crate::world_setup;

/// Create a target below `position`, add it to the live set, and schedule
/// its emergence.
pub fn spawn(
    spawner: &mut SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    kind: TargetKind,
    position: Vec3,
    out: &mut Outbox,
) -> TargetId {
    let id = spawner.allocate_id();
    let entity = world_setup::spawn_target(world, id, kind, position);
    spawner.track(id, entity);

    let profile = get_profile(kind);
    out.presentation.push(PresentationIntent::PlaceTarget {
        target: id,
        kind,
        position: Vec3::new(position.x, BURIED_HEIGHT, position.z),
        color: profile.color.to_string(),
        glow: profile.glow,
    });
    timers.schedule_after(EMERGE_DELAY_MS, TimerAction::Emerge(id));

    debug!(target_id = %id, ?kind, x = position.x, z = position.z, "target spawned");
    id
}

/// Raise a spawned target and start its dwell timer.
pub fn emerge(
    spawner: &SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    id: TargetId,
    out: &mut Outbox,
) -> Result<(), SimError> {
    let Some(entity) = spawner.entity(id) else {
        return Ok(());
    };

    let dwell_ms = {
        let mut target = target_mut(world, id, entity)?;
        if !step(&mut target, TargetInput::Emerge) {
            return Ok(());
        }
        let dwell_ms = get_profile(target.kind).dwell_ms;
        target.retreat_timer = Some(timers.schedule_after(dwell_ms, TimerAction::Retreat(id)));
        dwell_ms
    };

    start_tween(
        world,
        id,
        entity,
        SURFACE_HEIGHT,
        EMERGE_ANIMATION_MS,
        Easing::EaseOutCubic,
        timers.now_ms(),
    )?;

    out.audio.push(AudioEvent::TargetEmerged { target: id });
    out.presentation.push(PresentationIntent::AnimateTarget {
        target: id,
        animation: TargetAnimation::Emerge,
        duration_ms: EMERGE_ANIMATION_MS,
    });
    debug!(target_id = %id, dwell_ms, "target emerged");
    Ok(())
}

/// Sink a target whose dwell expired and schedule its removal.
/// The target stays hittable until the removal fires.
pub fn retreat(
    spawner: &SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    id: TargetId,
    out: &mut Outbox,
) -> Result<(), SimError> {
    let Some(entity) = spawner.entity(id) else {
        return Ok(());
    };

    {
        let mut target = target_mut(world, id, entity)?;
        if !step(&mut target, TargetInput::Retreat) {
            return Ok(());
        }
        // This timer is the one firing now.
        target.retreat_timer = None;
    }

    start_tween(
        world,
        id,
        entity,
        BURIED_HEIGHT,
        RETREAT_REMOVAL_MS,
        Easing::EaseInCubic,
        timers.now_ms(),
    )?;
    timers.schedule_after(
        RETREAT_REMOVAL_MS,
        TimerAction::RemoveTarget(id, RemovalCause::Retreat),
    );

    out.audio.push(AudioEvent::TargetRetreated { target: id });
    out.presentation.push(PresentationIntent::AnimateTarget {
        target: id,
        animation: TargetAnimation::Retreat,
        duration_ms: RETREAT_REMOVAL_MS,
    });
    debug!(target_id = %id, "target retreating");
    Ok(())
}

/// Strike a target. Returns `Ok(false)` when the target is gone or already
/// dead, in which case nothing happens.
///
/// A hit cancels the pending dwell timer, credits the session (only while
/// playing), and schedules removal once the hit effect has played.
pub fn hit(
    spawner: &SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    session: &mut SessionClock,
    id: TargetId,
    out: &mut Outbox,
) -> Result<bool, SimError> {
    let Some(entity) = spawner.entity(id) else {
        return Ok(false);
    };

    let (kind, points, pending) = {
        let mut target = target_mut(world, id, entity)?;
        if !step(&mut target, TargetInput::Hit) {
            return Ok(false);
        }
        (target.kind, target.points, target.retreat_timer.take())
    };
    if let Some(handle) = pending {
        timers.cancel(handle);
    }

    let position = world
        .get::<&Position>(entity)
        .map_err(|source| SimError::TargetComponent { id, source })?
        .0;

    let credited = session.record_hit(Some(points));

    out.audio.push(AudioEvent::TargetHit { target: id, points });
    out.presentation.push(PresentationIntent::HitBurst {
        position,
        duration_ms: HIT_REMOVAL_MS,
    });
    out.presentation.push(PresentationIntent::ScorePopup {
        points,
        position: position + Vec3::Y * SCORE_POPUP_OFFSET,
        highlight: kind == TargetKind::Bonus,
        duration_ms: SCORE_POPUP_MS,
    });
    if credited.is_some() {
        out.presentation.push(hud::score_text(session.score()));
    }

    timers.schedule_after(HIT_REMOVAL_MS, TimerAction::RemoveTarget(id, RemovalCause::Hit));

    info!(
        target_id = %id,
        ?kind,
        points,
        credited = credited.is_some(),
        score = session.score(),
        "target hit"
    );
    Ok(true)
}

/// Remove a target from the live set and the world. Returns `Ok(false)` if
/// it was already gone.
///
/// The live set is updated before the entity is destroyed, so a failed
/// despawn never leaves a dangling live entry.
pub fn remove(
    spawner: &mut SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    id: TargetId,
    cause: RemovalCause,
    out: &mut Outbox,
) -> Result<bool, SimError> {
    let Some(entity) = spawner.remove_target(id) else {
        return Ok(false);
    };

    let pending = world
        .get::<&mut Target>(entity)
        .ok()
        .and_then(|mut target| target.retreat_timer.take());
    if let Some(handle) = pending {
        timers.cancel(handle);
    }

    out.presentation.push(PresentationIntent::RemoveTarget { target: id });
    world
        .despawn(entity)
        .map_err(|source| SimError::TargetDespawn { id, source })?;

    debug!(target_id = %id, ?cause, live = spawner.live_count(), "target removed");
    Ok(true)
}

/// Remove every live target. Faults on individual targets are returned so
/// the caller can report them; the remaining targets are still removed.
pub fn remove_all(
    spawner: &mut SpawnerState,
    world: &mut World,
    timers: &mut impl Scheduler,
    cause: RemovalCause,
    out: &mut Outbox,
) -> Vec<SimError> {
    let mut faults = Vec::new();
    for id in spawner.live_ids() {
        if let Err(err) = remove(spawner, world, timers, id, cause, out) {
            faults.push(err);
        }
    }
    faults
}

/// Feed one input to the FSM and write back the result.
fn step(target: &mut Target, input: TargetInput) -> bool {
    let status = TargetStatus {
        phase: target.phase,
        alive: target.alive,
        retreating: target.retreating,
    };
    let update = evaluate(&status, input);
    if update.phase_changed {
        target.phase = update.status.phase;
        target.alive = update.status.alive;
        target.retreating = update.status.retreating;
    }
    update.phase_changed
}

fn target_mut(
    world: &World,
    id: TargetId,
    entity: Entity,
) -> Result<hecs::RefMut<'_, Target>, SimError> {
    world
        .get::<&mut Target>(entity)
        .map_err(|source| SimError::TargetComponent { id, source })
}

/// Animate a target's height from where it is now to `to`.
fn start_tween(
    world: &World,
    id: TargetId,
    entity: Entity,
    to: f32,
    duration_ms: u64,
    easing: Easing,
    now_ms: u64,
) -> Result<(), SimError> {
    let from = world
        .get::<&Position>(entity)
        .map_err(|source| SimError::TargetComponent { id, source })?
        .0
        .y;
    let mut motion = world
        .get::<&mut TargetMotion>(entity)
        .map_err(|source| SimError::TargetComponent { id, source })?;
    motion.tween = Some(HeightTween {
        from,
        to,
        start_ms: now_ms,
        duration_ms,
        easing,
    });
    Ok(())
}
