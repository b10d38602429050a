//! State machines for BURROW.
//!
//! Target lifecycle transitions, the session clock, and per-kind target
//! profiles. Pure data in, pure data out: no ECS, no timers.

pub mod profiles;
pub mod session;
pub mod target;

pub use burrow_core as core;
