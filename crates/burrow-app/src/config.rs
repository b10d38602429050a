//! Application configuration: game parameters plus host settings, loaded
//! from an optional JSON file.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use burrow_core::config::GameConfig;
use burrow_sim::audio::{SoundBank, SOUND_IDS};
use burrow_sim::SimConfig;

/// Environment variable naming the config file when no argument is given.
pub const CONFIG_ENV: &str = "BURROW_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub time_scale: f64,
    pub game: GameConfig,
    /// Audio assets available to the host. `null` runs without sound.
    pub assets: Option<AssetConfig>,
    /// Scene node the mute control attaches to. `null` omits the control.
    pub camera_anchor: Option<String>,
    /// Multi-line log output.
    pub pretty_logs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub sounds: Vec<String>,
    pub music: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
            assets: Some(AssetConfig::default()),
            camera_anchor: Some("camera".to_string()),
            pretty_logs: false,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            sounds: SOUND_IDS.iter().map(|id| id.to_string()).collect(),
            music: true,
        }
    }
}

impl AppConfig {
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            time_scale: self.time_scale,
            game: self.game.clone(),
        }
    }

    pub fn sound_bank(&self) -> Option<SoundBank> {
        self.assets
            .as_ref()
            .map(|assets| SoundBank::new(assets.sounds.iter().cloned(), assets.music))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.time_scale.is_finite() && self.time_scale > 0.0,
            "time_scale must be positive, got {}",
            self.time_scale
        );
        self.game.validate().context("invalid game settings")?;
        Ok(())
    }
}

/// Config path from the first command-line argument, else from `BURROW_CONFIG`.
pub fn config_path(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
    args.next()
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Load and validate the config. No path means defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse(&text).with_context(|| format!("loading config {}", path.display()))?
        }
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

pub fn parse(text: &str) -> anyhow::Result<AppConfig> {
    serde_json::from_str(text).context("config is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = load(None).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.game.game_length_secs, 60);
        assert!(config.sound_bank().unwrap().has_music());
        assert_eq!(config.camera_anchor.as_deref(), Some("camera"));
    }

    #[test]
    fn test_null_assets_and_anchor() {
        let config = parse(r#"{ "assets": null, "camera_anchor": null, "seed": 7 }"#).unwrap();
        assert!(config.sound_bank().is_none());
        assert!(config.camera_anchor.is_none());
        assert_eq!(config.sim_config().seed, 7);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = parse(r#"{ "time_scale": 0.0 }"#).unwrap();
        assert!(config.validate().is_err());

        let config = parse(r#"{ "game": { "max_targets": 0 } }"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("max_targets"), "got {err:#}");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("burrow-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "game": { "game_length_secs": 15 }, "time_scale": 2.0 }"#)
            .unwrap();
        let config = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.game.game_length_secs, 15);
        assert_eq!(config.time_scale, 2.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load(Some(Path::new("/nonexistent/burrow.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/burrow.json"));
    }

    #[test]
    fn test_config_path_prefers_argument() {
        let path = config_path(vec!["game.json".to_string()].into_iter());
        assert_eq!(path, Some(PathBuf::from("game.json")));
    }
}
