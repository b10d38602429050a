//! Application state shared between the control surface and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use burrow_core::commands::PlayerCommand;
use burrow_core::state::GameStateSnapshot;

/// Commands sent from the control surface to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Flip the audio mute flag.
    ToggleMute,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// State shared by every control call. The loop-side handles are empty until
/// `control::start_simulation` fills them.
pub struct AppState {
    /// Sender half of the game loop's command channel.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the loop thread once per frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
    /// Game loop thread, joined on shutdown.
    pub worker: Mutex<Option<JoinHandle<()>>>,
    /// Whether the host could attach a mute control.
    pub mute_control: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            worker: Mutex::new(None),
            mute_control: false,
        }
    }
}

impl AppState {
    pub fn new(mute_control: bool) -> Self {
        Self {
            mute_control,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(true);
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
        assert!(state.worker.lock().unwrap().is_none());
        assert!(state.mute_control);
    }
}
