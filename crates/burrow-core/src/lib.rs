//! Core types and definitions for the BURROW target-shooting game.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, components, commands, events, state snapshots, constants, and
//! configuration. It has no dependency on a host runtime or renderer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
