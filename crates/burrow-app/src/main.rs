//! `burrow`: run one scripted session headlessly and report the score.
//!
//! Usage: `burrow [config.json]` (or set `BURROW_CONFIG`).

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tracing::info;

use burrow_app::autoplay;
use burrow_app::config::{self, AppConfig};
use burrow_app::control;
use burrow_app::host::{HeadlessHost, LogReporter, MuteControl};
use burrow_app::startup::{StartupStage, StartupTracker};
use burrow_app::state::AppState;
use burrow_app::telemetry;
use burrow_core::commands::PlayerCommand;
use burrow_core::enums::SessionPhase;
use burrow_sim::audio::AudioDirector;
use burrow_sim::SimulationEngine;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SHOT_INTERVAL: Duration = Duration::from_millis(300);

fn main() -> anyhow::Result<()> {
    let path = config::config_path(std::env::args().skip(1));
    let config = config::load(path.as_deref())?;
    telemetry::init(config.pretty_logs);

    let state = boot(&config)?;
    let result = play(&state, &config);
    control::shutdown(&state).context("stopping game loop")?;
    result
}

/// Run the start-up stages and leave the game loop running.
fn boot(config: &AppConfig) -> anyhow::Result<AppState> {
    let mut startup = StartupTracker::new();

    let mute = startup.run(StartupStage::SceneSetup, || {
        Ok(MuteControl::attach(
            config.camera_anchor.as_deref(),
            config.game.audio.muted,
        ))
    })?;

    let engine = startup.run(StartupStage::ComponentRegistration, || {
        Ok(SimulationEngine::new(config.sim_config()).with_reporter(Box::new(LogReporter)))
    })?;

    let bank = startup.run(StartupStage::AssetLoading, || Ok(config.sound_bank()))?;

    let director = startup.run(StartupStage::AudioSetup, || {
        Ok(AudioDirector::new(&config.game.audio, bank))
    })?;

    let state = startup.run(StartupStage::GameInitialization, || {
        let state = AppState::new(mute.is_some());
        let host = Box::new(HeadlessHost::new(mute));
        control::start_simulation(&state, engine, director, host)?;
        Ok(state)
    })?;

    Ok(state)
}

/// Start a session, shoot at whatever emerges, and wait for the clock.
fn play(state: &AppState, config: &AppConfig) -> anyhow::Result<()> {
    control::send_command(state, PlayerCommand::StartGame)?;

    let session_secs = config.game.game_length_secs as f64 / config.time_scale;
    let deadline = Instant::now() + Duration::from_secs_f64(session_secs) + Duration::from_secs(5);
    let mut last_shot = Instant::now();

    loop {
        std::thread::sleep(POLL_INTERVAL);
        if Instant::now() > deadline {
            bail!("session did not finish within {session_secs:.1}s of wall time");
        }

        let Some(snapshot) = control::get_snapshot(state)? else {
            continue;
        };
        if snapshot.session.phase == SessionPhase::Finished {
            info!(
                score = snapshot.session.score,
                hits = snapshot.session.hits,
                shots = snapshot.session.shots,
                "game over"
            );
            return Ok(());
        }

        if last_shot.elapsed() >= SHOT_INTERVAL {
            if let Some(shot) = autoplay::next_shot(&snapshot) {
                control::send_command(state, shot)?;
                last_shot = Instant::now();
            }
        }
    }
}
