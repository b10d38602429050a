//! Simulation engine for BURROW.
//!
//! Owns the hecs ECS world, a virtual-time timer queue, and the session
//! clock. Runs systems each frame and produces GameStateSnapshots for the host.

pub mod audio;
pub mod engine;
pub mod error;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use burrow_core as core;
pub use engine::{Reporter, SimConfig, SimulationEngine};
