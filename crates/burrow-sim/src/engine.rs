//! Simulation engine: owns the game world and drives every system.
//!
//! `SimulationEngine` owns the hecs ECS world, the virtual-time timer queue,
//! and the session clock. It processes player commands, fires due timers,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use burrow_core::commands::PlayerCommand;
use burrow_core::components::{Position, Projectile, Target};
use burrow_core::config::GameConfig;
use burrow_core::constants::*;
use burrow_core::enums::*;
use burrow_core::events::{Alert, AudioEvent, PresentationIntent};
use burrow_core::state::{GameStateSnapshot, ProjectileView, TargetView};
use burrow_core::types::{ProjectileId, SimTime, TargetId, TimerHandle, Vec3};
use burrow_fsm::session::{Countdown, SessionAction, SessionClock, TransitionError};

use crate::error::SimError;
use crate::scheduler::{Scheduler, TimerAction, TimerQueue};
use crate::systems::projectile::{FireRejected, ProjectileState};
use crate::systems::spawner::SpawnerState;
use crate::systems::{self, hud, projectile, spawner, targets, Outbox};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Wall-clock multiplier applied by the host loop (1.0 = normal).
    pub time_scale: f64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// Observer for diagnostics, injected by the host.
pub trait Reporter: Send {
    fn report(&mut self, alert: &Alert);
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    time_scale: f64,
    rng: ChaCha8Rng,
    timers: TimerQueue,
    session: SessionClock,
    spawner: SpawnerState,
    projectiles: ProjectileState,
    countdown: Option<TimerHandle>,
    game: GameConfig,
    command_queue: VecDeque<PlayerCommand>,
    outbox: Outbox,
    reporter: Option<Box<dyn Reporter>>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let spawner = SpawnerState::new(&config.game, &mut rng);
        debug!(
            seed = config.seed,
            candidates = spawner.candidates().len(),
            "engine created"
        );

        Self {
            world: World::new(),
            time: SimTime::default(),
            time_scale: config.time_scale,
            rng,
            timers: TimerQueue::new(),
            session: SessionClock::new(config.game.game_length_secs),
            spawner,
            projectiles: ProjectileState::new(&config.game),
            countdown: None,
            game: config.game,
            command_queue: VecDeque::new(),
            outbox: Outbox::default(),
            reporter: None,
        }
    }

    /// Attach a diagnostics observer.
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance virtual time by `dt_ms` and return the resulting snapshot.
    ///
    /// Queued commands run first, at the current time. The step is then cut
    /// into slices of at most `FRAME_MS`, so a long step cannot carry a
    /// projectile past a target between collision checks. Within a slice,
    /// due timers fire in due order, each at its own due time, and target
    /// motion and projectiles are stepped at the end of the slice.
    pub fn advance(&mut self, dt_ms: u64) -> GameStateSnapshot {
        self.process_commands();

        let end = self.timers.now_ms() + dt_ms;
        loop {
            let start = self.timers.now_ms();
            let until = (start + FRAME_MS).min(end);
            self.step_slice(until, until - start);
            if until >= end {
                break;
            }
        }

        self.time.advance(dt_ms);

        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.session,
            &self.spawner,
            &self.projectiles,
            self.outbox.take(),
        )
    }

    /// Advance by one fixed frame.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(FRAME_MS)
    }

    /// Get the current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn session(&self) -> &SessionClock {
        &self.session
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current virtual time (ms).
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &GameConfig {
        &self.game
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_enabled()
    }

    /// Live target ids in spawn order.
    pub fn live_targets(&self) -> Vec<TargetId> {
        self.spawner.live_ids()
    }

    pub fn live_target_count(&self) -> usize {
        self.spawner.live_count()
    }

    pub fn spawn_candidates(&self) -> &[Vec3] {
        self.spawner.candidates()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// View of a live target.
    pub fn target(&self, id: TargetId) -> Option<TargetView> {
        let entity = self.spawner.entity(id)?;
        let target = self.world.get::<&Target>(entity).ok()?;
        let pos = self.world.get::<&Position>(entity).ok()?;
        Some(TargetView {
            id,
            kind: target.kind,
            phase: target.phase,
            position: pos.0,
            points: target.points,
            alive: target.alive,
        })
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.count()
    }

    /// View of an in-flight projectile.
    pub fn projectile(&self, id: ProjectileId) -> Option<ProjectileView> {
        let entity = self.projectiles.entity(id)?;
        let projectile = self.world.get::<&Projectile>(entity).ok()?;
        let pos = self.world.get::<&Position>(entity).ok()?;
        Some(ProjectileView {
            id,
            position: pos.0,
            direction: projectile.direction,
            traveled: projectile.traveled,
        })
    }

    /// Place a target directly, bypassing the spawner's timing and capacity.
    /// It emerges after the usual delay.
    pub fn spawn_target(&mut self, kind: TargetKind, position: Vec3) -> TargetId {
        targets::spawn(
            &mut self.spawner,
            &mut self.world,
            &mut self.timers,
            kind,
            position,
            &mut self.outbox,
        )
    }

    /// Strike a target directly. Returns whether the hit was accepted.
    pub fn hit_target(&mut self, id: TargetId) -> bool {
        match targets::hit(
            &self.spawner,
            &mut self.world,
            &mut self.timers,
            &mut self.session,
            id,
            &mut self.outbox,
        ) {
            Ok(accepted) => accepted,
            Err(err) => {
                self.recover("target", "hit", err);
                false
            }
        }
    }

    /// Launch a projectile with the configured ballistics, bypassing the
    /// weapon's cooldown and muzzle offset.
    pub fn launch_projectile(&mut self, origin: Vec3, direction: Vec3) -> ProjectileId {
        projectile::create(
            &mut self.projectiles,
            &mut self.world,
            &mut self.timers,
            origin,
            direction,
            &self.game.projectile,
            &mut self.outbox,
        )
    }

    /// End the session now: stop the countdown and the spawner, clear every
    /// live target, and finish.
    /// Outside play the call is rejected before anything is touched.
    pub fn end_session(&mut self) {
        if self.session.phase() != SessionPhase::Playing {
            self.reject(TransitionError {
                from: self.session.phase(),
                action: SessionAction::Finish,
            });
            return;
        }
        if let Some(handle) = self.countdown.take() {
            self.timers.cancel(handle);
        }
        spawner::stop(&mut self.spawner, &mut self.timers);

        let faults = targets::remove_all(
            &mut self.spawner,
            &mut self.world,
            &mut self.timers,
            RemovalCause::SessionEnd,
            &mut self.outbox,
        );
        for err in faults {
            self.recover("session", "end", err);
        }

        if let Err(err) = self.session.finish() {
            self.reject(err);
            return;
        }

        self.outbox.audio.push(AudioEvent::SessionChanged {
            phase: SessionPhase::Finished,
        });
        self.outbox
            .presentation
            .push(PresentationIntent::SetGameOverVisible { visible: true });
        self.outbox
            .presentation
            .push(hud::final_score_text(self.session.score()));
        info!(
            score = self.session.score(),
            hits = self.session.hits(),
            shots = self.session.shots(),
            "session finished"
        );
    }

    /// Fire timers due by `until`, then move targets and projectiles.
    fn step_slice(&mut self, until: u64, slice_ms: u64) {
        while let Some((_, action)) = self.timers.pop_due(until) {
            self.dispatch(action);
        }
        self.timers.advance_to(until);

        systems::motion::run(&mut self.world, until);

        let faults = projectile::run(
            &mut self.projectiles,
            &mut self.world,
            &mut self.timers,
            &self.spawner,
            &mut self.session,
            slice_ms,
            &mut self.outbox,
        );
        for (id, err) in faults {
            self.recover("projectile", "tick", err);
            self.discard_projectile(id);
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_session(),
            PlayerCommand::ResetGame => self.reset_session(),
            PlayerCommand::PullTrigger { grip, aim } => {
                match projectile::fire(
                    &mut self.projectiles,
                    &mut self.world,
                    &mut self.timers,
                    &mut self.session,
                    grip,
                    aim,
                    &mut self.outbox,
                ) {
                    Ok(id) => debug!(projectile = %id, "shot fired"),
                    Err(FireRejected::CoolingDown) => debug!("trigger ignored, cooling down"),
                    Err(FireRejected::NoAim) => {
                        warn!(?aim, "trigger ignored, aim has no direction");
                        self.raise(
                            AlertLevel::Info,
                            "weapon",
                            "fire",
                            "aim vector has zero length".to_string(),
                        );
                    }
                }
            }
        }
    }

    fn start_session(&mut self) {
        let was_finished = self.session.phase() == SessionPhase::Finished;
        if let Err(err) = self.session.start() {
            self.reject(err);
            return;
        }

        if was_finished {
            self.outbox
                .presentation
                .push(PresentationIntent::SetGameOverVisible { visible: false });
        }
        self.outbox
            .presentation
            .push(PresentationIntent::SetStartButtonVisible { visible: false });
        self.outbox.presentation.push(hud::score_text(0));
        self.outbox
            .presentation
            .push(hud::timer_text(self.session.time_remaining_secs()));
        self.outbox.audio.push(AudioEvent::SessionChanged {
            phase: SessionPhase::Playing,
        });

        self.countdown = Some(
            self.timers
                .schedule_after(COUNTDOWN_PERIOD_MS, TimerAction::Countdown),
        );
        info!(
            game_length_secs = self.session.game_length_secs(),
            "session started"
        );

        spawner::start(
            &mut self.spawner,
            &mut self.world,
            &mut self.timers,
            &mut self.rng,
            &mut self.outbox,
        );
    }

    fn reset_session(&mut self) {
        if let Err(err) = self.session.reset() {
            self.reject(err);
            return;
        }
        self.outbox
            .presentation
            .push(PresentationIntent::SetGameOverVisible { visible: false });
        self.outbox
            .presentation
            .push(PresentationIntent::SetStartButtonVisible { visible: true });
        self.outbox.presentation.push(hud::score_text(0));
        self.outbox.presentation.push(hud::timer_text(0));
        self.outbox.audio.push(AudioEvent::SessionChanged {
            phase: SessionPhase::Idle,
        });
        info!("session reset");
    }

    fn countdown_tick(&mut self) {
        self.countdown = None;
        match self.session.countdown() {
            Countdown::Running(secs) => {
                self.outbox.presentation.push(hud::timer_text(secs));
                self.countdown = Some(
                    self.timers
                        .schedule_after(COUNTDOWN_PERIOD_MS, TimerAction::Countdown),
                );
            }
            Countdown::Expired => {
                self.outbox.presentation.push(hud::timer_text(0));
                self.end_session();
            }
            Countdown::Stopped => {}
        }
    }

    /// Run one due timer action.
    fn dispatch(&mut self, action: TimerAction) {
        let result = match action {
            TimerAction::SpawnAttempt => {
                self.spawner.clear_pending();
                spawner::spawn_one(
                    &mut self.spawner,
                    &mut self.world,
                    &mut self.timers,
                    &mut self.rng,
                    &mut self.outbox,
                );
                Ok(())
            }
            TimerAction::Emerge(id) => targets::emerge(
                &self.spawner,
                &mut self.world,
                &mut self.timers,
                id,
                &mut self.outbox,
            )
            .map_err(|err| ("emerge", err)),
            TimerAction::Retreat(id) => targets::retreat(
                &self.spawner,
                &mut self.world,
                &mut self.timers,
                id,
                &mut self.outbox,
            )
            .map_err(|err| ("retreat", err)),
            TimerAction::RemoveTarget(id, cause) => targets::remove(
                &mut self.spawner,
                &mut self.world,
                &mut self.timers,
                id,
                cause,
                &mut self.outbox,
            )
            .map(|_| ())
            .map_err(|err| ("remove", err)),
            TimerAction::ExpireProjectile(id) => projectile::destroy(
                &mut self.projectiles,
                &mut self.world,
                id,
                ProjectileEnd::Lifespan,
                &mut self.outbox,
            )
            .map(|_| ())
            .map_err(|err| ("expire", err)),
            TimerAction::Countdown => {
                self.countdown_tick();
                Ok(())
            }
        };

        if let Err((step, err)) = result {
            let component = if err.projectile().is_some() {
                "projectile"
            } else {
                "target"
            };
            self.recover(component, step, err);
        }
    }

    /// Contain a fault raised by one action: log it, surface an alert, and
    /// finish the cleanup the action was doing so no live entry dangles.
    fn recover(&mut self, component: &'static str, action: &'static str, err: SimError) {
        warn!(component, action, error = %err, "fault contained");
        self.raise(AlertLevel::Critical, component, action, err.to_string());

        if let Some(id) = err.target() {
            if let Err(cleanup) = targets::remove(
                &mut self.spawner,
                &mut self.world,
                &mut self.timers,
                id,
                RemovalCause::Fault,
                &mut self.outbox,
            ) {
                debug!(target_id = %id, error = %cleanup, "fault cleanup left no entity to despawn");
            }
        }
        if let Some(id) = err.projectile() {
            self.discard_projectile(id);
        }
    }

    fn discard_projectile(&mut self, id: ProjectileId) {
        if let Err(cleanup) = projectile::destroy(
            &mut self.projectiles,
            &mut self.world,
            id,
            ProjectileEnd::Fault,
            &mut self.outbox,
        ) {
            debug!(projectile = %id, error = %cleanup, "fault cleanup left no entity to despawn");
        }
    }

    /// Surface a rejected command. Gameplay continues.
    fn reject(&mut self, err: TransitionError) {
        warn!(error = %err, "command rejected");
        self.raise(
            AlertLevel::Warning,
            "session",
            action_name(&err),
            err.to_string(),
        );
    }

    fn raise(
        &mut self,
        level: AlertLevel,
        component: &'static str,
        action: &'static str,
        message: String,
    ) {
        let alert = Alert {
            level,
            component: component.to_string(),
            action: action.to_string(),
            message,
            frame: self.time.frame,
        };
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(&alert);
        }
        self.outbox.alerts.push(alert);
    }

    /// Strip a component from a live target so its next lifecycle step faults.
    #[cfg(test)]
    pub(crate) fn corrupt_target(&mut self, id: TargetId) {
        if let Some(entity) = self.spawner.entity(id) {
            let _ = self.world.remove_one::<Position>(entity);
        }
    }

    /// Strip a component from an in-flight projectile so its next tick faults.
    #[cfg(test)]
    pub(crate) fn corrupt_projectile(&mut self, id: ProjectileId) {
        if let Some(entity) = self.projectiles.entity(id) {
            let _ = self.world.remove_one::<Projectile>(entity);
        }
    }
}

fn action_name(err: &TransitionError) -> &'static str {
    match err.action {
        SessionAction::Start => "start",
        SessionAction::Finish => "finish",
        SessionAction::Reset => "reset",
    }
}
