//! BURROW host application.
//!
//! Wires the simulation to a host: a game-loop thread fed by a command
//! channel, the audio director, headless presentation sinks, start-up
//! tracking, configuration loading, and logging.

pub mod autoplay;
pub mod config;
pub mod control;
pub mod game_loop;
pub mod host;
pub mod startup;
pub mod state;
pub mod telemetry;

pub use burrow_core as core;
