//! Session clock state machine.
//!
//! `idle -> playing -> finished -> idle`. Starting from `finished` performs
//! the reset implicitly. Every other transition is rejected.

use std::fmt;

use thiserror::Error;

use burrow_core::constants::DEFAULT_HIT_POINTS;
use burrow_core::enums::SessionPhase;

/// Operations that move the session between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    Finish,
    Reset,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionAction::Start => "start",
            SessionAction::Finish => "finish",
            SessionAction::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// A transition that the session does not allow.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot {action} a session that is {from:?}")]
pub struct TransitionError {
    pub from: SessionPhase,
    pub action: SessionAction,
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Still playing with this many seconds left.
    Running(u32),
    /// Time ran out on this step; the caller must finish the session.
    Expired,
    /// The session is not playing; nothing changed.
    Stopped,
}

/// Score and countdown for one run of the game.
#[derive(Debug, Clone)]
pub struct SessionClock {
    phase: SessionPhase,
    score: u32,
    hits: u32,
    shots: u32,
    time_remaining_secs: u32,
    game_length_secs: u32,
}

impl SessionClock {
    pub fn new(game_length_secs: u32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: 0,
            hits: 0,
            shots: 0,
            time_remaining_secs: game_length_secs,
            game_length_secs,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn game_length_secs(&self) -> u32 {
        self.game_length_secs
    }

    /// Begin a run: zero the score and refill the clock.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        if self.phase == SessionPhase::Playing {
            return Err(self.reject(SessionAction::Start));
        }
        self.score = 0;
        self.hits = 0;
        self.shots = 0;
        self.time_remaining_secs = self.game_length_secs;
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// One countdown step of one second.
    pub fn countdown(&mut self) -> Countdown {
        if self.phase != SessionPhase::Playing {
            return Countdown::Stopped;
        }
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            Countdown::Expired
        } else {
            Countdown::Running(self.time_remaining_secs)
        }
    }

    /// End the run.
    pub fn finish(&mut self) -> Result<(), TransitionError> {
        if self.phase != SessionPhase::Playing {
            return Err(self.reject(SessionAction::Finish));
        }
        self.phase = SessionPhase::Finished;
        Ok(())
    }

    /// Return to idle after a finished run, zeroing score and clock.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.phase != SessionPhase::Finished {
            return Err(self.reject(SessionAction::Reset));
        }
        self.score = 0;
        self.hits = 0;
        self.shots = 0;
        self.time_remaining_secs = 0;
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// Credit a hit. Returns the points credited, or `None` when the session
    /// is not playing and the hit is ignored.
    pub fn record_hit(&mut self, points: Option<u32>) -> Option<u32> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        let points = points.unwrap_or(DEFAULT_HIT_POINTS);
        self.score = self.score.saturating_add(points);
        self.hits += 1;
        Some(points)
    }

    /// Count a shot fired during play.
    pub fn record_shot(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.shots += 1;
        }
    }

    fn reject(&self, action: SessionAction) -> TransitionError {
        TransitionError {
            from: self.phase,
            action,
        }
    }
}
