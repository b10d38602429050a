//! Game loop thread: steps the engine at a fixed rate and hands each snapshot to the host.
//!
//! Commands arrive via `mpsc` channel. Each frame advances the engine by one
//! fixed tick, routes audio events through the director, hands presentation
//! intents to the host, and stores the snapshot in shared state for
//! synchronous polling. `time_scale` changes how long a frame lasts in wall
//! time, never how much simulated time it covers.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use burrow_core::constants::{FRAME_MS, TICK_RATE};
use burrow_core::state::GameStateSnapshot;
use burrow_sim::audio::AudioDirector;
use burrow_sim::SimulationEngine;

use crate::host::Host;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the control surface and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    director: AudioDirector,
    host: Box<dyn Host>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("burrow-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, director, host, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Advance the engine by `dt_ms` and deliver the frame's output to the host.
pub fn step(
    engine: &mut SimulationEngine,
    director: &mut AudioDirector,
    host: &mut dyn Host,
    dt_ms: u64,
) -> GameStateSnapshot {
    let snapshot = engine.advance(dt_ms);

    for event in &snapshot.audio_events {
        for playback in director.handle(event) {
            host.play(&playback);
        }
    }
    for playback in director.update(dt_ms) {
        host.play(&playback);
    }
    for intent in &snapshot.presentation {
        host.present(intent);
    }

    snapshot
}

/// Wall-clock length of one frame at `time_scale`.
pub fn frame_period(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    mut director: AudioDirector,
    mut host: Box<dyn Host>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(time_scale = engine.time_scale(), "game loop started");
    let period = frame_period(engine.time_scale());
    let mut next_tick_time = Instant::now();
    let mut poison_reported = false;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::ToggleMute) => {
                    let (muted, playback) = director.toggle_mute();
                    for p in &playback {
                        host.play(p);
                    }
                    host.mute_changed(muted);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    return;
                }
            }
        }

        // 2. Advance one fixed tick
        let snapshot = step(&mut engine, &mut director, host.as_mut(), FRAME_MS);

        // 3. Store latest snapshot for synchronous polling
        publish(latest_snapshot, snapshot, &mut poison_reported);

        // 4. Sleep until next frame
        next_tick_time += period;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > period * 2 {
            // Fell behind, drop the backlog
            next_tick_time = now;
        }
    }
}

/// Store the snapshot for pollers. A reader that panicked while holding the
/// lock poisons it; the slot is plain data, so keep writing through it.
fn publish(
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    snapshot: GameStateSnapshot,
    poison_reported: &mut bool,
) {
    let mut lock = match latest_snapshot.lock() {
        Ok(lock) => lock,
        Err(poisoned) => {
            if !*poison_reported {
                warn!("snapshot lock poisoned, recovering");
                *poison_reported = true;
            }
            poisoned.into_inner()
        }
    };
    *lock = Some(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::commands::PlayerCommand;
    use burrow_core::config::AudioConfig;
    use burrow_core::enums::SessionPhase;
    use burrow_core::events::PresentationIntent;
    use burrow_sim::audio::{Playback, SoundBank};
    use burrow_sim::SimConfig;

    #[derive(Default)]
    struct Recorder {
        intents: Vec<PresentationIntent>,
        playback: Vec<Playback>,
    }

    impl Host for Recorder {
        fn present(&mut self, intent: &PresentationIntent) {
            self.intents.push(intent.clone());
        }
        fn play(&mut self, playback: &Playback) {
            self.playback.push(playback.clone());
        }
        fn mute_changed(&mut self, _muted: bool) {}
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::ToggleMute).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(commands[1], GameLoopCommand::ToggleMute));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_step_routes_audio_and_intents() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut director = AudioDirector::new(&AudioConfig::default(), Some(SoundBank::complete()));
        let mut host = Recorder::default();

        engine.queue_command(PlayerCommand::StartGame);
        let snap = step(&mut engine, &mut director, &mut host, 10);

        assert_eq!(snap.session.phase, SessionPhase::Playing);
        assert!(host
            .playback
            .contains(&Playback::Sound { id: "start", volume: 0.7 }));
        assert!(host.playback.contains(&Playback::MusicPlay { volume: 0.3 }));
        assert!(host
            .intents
            .contains(&PresentationIntent::SetStartButtonVisible { visible: false }));
    }

    #[test]
    fn test_time_scale_shortens_frames_not_ticks() {
        let secs = |scale: f64| frame_period(scale).as_secs_f64();
        assert!((secs(1.0) - 0.010).abs() < 1e-6);
        assert!((secs(4.0) - 0.0025).abs() < 1e-6);
        assert_eq!(frame_period(0.0), TICK_DURATION, "zero scale falls back");

        // However fast the clock runs, each frame covers one fixed tick.
        let mut engine = SimulationEngine::new(SimConfig {
            time_scale: 8.0,
            ..Default::default()
        });
        let mut director = AudioDirector::new(&AudioConfig::default(), None);
        let snap = step(&mut engine, &mut director, &mut Recorder::default(), FRAME_MS);
        assert_eq!(snap.time.elapsed_ms, FRAME_MS);
    }

    #[test]
    fn test_publish_recovers_poisoned_lock() {
        let latest = Arc::new(Mutex::new(None));
        let poisoner = latest.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("reader crashed");
        })
        .join();
        assert!(latest.is_poisoned());

        let mut reported = false;
        publish(&latest, GameStateSnapshot::default(), &mut reported);
        assert!(reported);
        let lock = latest.lock().unwrap_or_else(|e| e.into_inner());
        assert!(lock.is_some());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 100Hz = 10ms per frame
        assert_eq!(TICK_DURATION, Duration::from_millis(10));
    }

    #[test]
    fn test_loop_thread_starts_and_stops() {
        let latest = Arc::new(Mutex::new(None));
        let engine = SimulationEngine::new(SimConfig::default());
        let director = AudioDirector::new(&AudioConfig::default(), None);
        let (tx, handle) =
            spawn_game_loop(engine, director, Box::new(Recorder::default()), latest.clone())
                .unwrap();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snap = latest.lock().unwrap().clone().expect("snapshot published");
        assert_eq!(snap.session.phase, SessionPhase::Playing);
    }
}
