//! Control surface: the calls a front end makes into the running game.
//!
//! Bridges host requests to the game loop thread via its command channel.

use thiserror::Error;

use burrow_core::commands::PlayerCommand;
use burrow_core::state::GameStateSnapshot;
use burrow_sim::audio::AudioDirector;
use burrow_sim::SimulationEngine;

use crate::game_loop;
use crate::host::Host;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop is no longer receiving commands")]
    Disconnected,
    #[error("no mute control is attached")]
    MuteUnavailable,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread")]
    Spawn(#[from] std::io::Error),
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &AppState,
    engine: SimulationEngine,
    director: AudioDirector,
    host: Box<dyn Host>,
) -> Result<(), ControlError> {
    let mut running = state.running.lock().map_err(|_| ControlError::Poisoned)?;
    if *running {
        return Err(ControlError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(engine, director, host, state.latest_snapshot.clone())?;

    *state.command_tx.lock().map_err(|_| ControlError::Poisoned)? = Some(cmd_tx);
    *state.worker.lock().map_err(|_| ControlError::Poisoned)? = Some(handle);
    *running = true;
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    send(state, GameLoopCommand::PlayerCommand(command))
}

/// Flip mute. Only possible when the host attached a mute control.
pub fn toggle_mute(state: &AppState) -> Result<(), ControlError> {
    if !state.mute_control {
        return Err(ControlError::MuteUnavailable);
    }
    send(state, GameLoopCommand::ToggleMute)
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, ControlError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| ControlError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn shutdown(state: &AppState) -> Result<(), ControlError> {
    let mut running = state.running.lock().map_err(|_| ControlError::Poisoned)?;
    if !*running {
        return Err(ControlError::NotStarted);
    }

    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take()
    {
        // A closed channel means the loop already exited.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let worker = state
        .worker
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();
    if let Some(handle) = worker {
        handle.join().map_err(|_| ControlError::Disconnected)?;
    }
    *running = false;
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| ControlError::Disconnected),
        None => Err(ControlError::NotStarted),
    }
}
