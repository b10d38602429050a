//! Static game configuration, read once at initialization.
//!
//! Every field has a default, so a partial JSON document only overrides
//! what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level game parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Session length in seconds.
    pub game_length_secs: u32,
    /// Mean time between spawns in seconds (jittered ±20%).
    pub spawn_interval_secs: f64,
    /// Maximum number of live targets at once.
    pub max_targets: usize,
    /// Half-width of the square spawn area around the player (m).
    pub spawn_radius: f32,
    /// Minimum time between accepted trigger pulls (ms).
    pub fire_cooldown_ms: u64,
    pub projectile: ProjectileConfig,
    pub audio: AudioConfig,
}

/// Projectile ballistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Units per second.
    pub speed: f32,
    /// Distance after which the projectile expires.
    pub max_distance: f32,
    /// Time after which the projectile expires (ms).
    pub lifespan_ms: u64,
}

/// Sound levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_length_secs: 60,
            spawn_interval_secs: 2.0,
            max_targets: 5,
            spawn_radius: 1.2,
            fire_cooldown_ms: 250,
            projectile: ProjectileConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            max_distance: 10.0,
            lifespan_ms: 2000,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sfx_volume: 0.7,
            music_volume: 0.3,
            muted: false,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse error")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game_length_secs == 0 {
            return Err(ConfigError::NotPositive {
                field: "game_length_secs",
            });
        }
        if !(self.spawn_interval_secs > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "spawn_interval_secs",
            });
        }
        if self.max_targets == 0 {
            return Err(ConfigError::NotPositive {
                field: "max_targets",
            });
        }
        if !(self.spawn_radius > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "spawn_radius",
            });
        }
        if !(self.projectile.speed > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "projectile.speed",
            });
        }
        if !(self.projectile.max_distance > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "projectile.max_distance",
            });
        }
        if self.projectile.lifespan_ms == 0 {
            return Err(ConfigError::NotPositive {
                field: "projectile.lifespan_ms",
            });
        }
        for (field, value) in [
            ("audio.sfx_volume", self.audio.sfx_volume),
            ("audio.music_volume", self.audio.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Spawn interval in milliseconds.
    pub fn spawn_interval_ms(&self) -> u64 {
        (self.spawn_interval_secs * 1000.0).round() as u64
    }
}
