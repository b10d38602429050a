//! Host-side sinks for presentation intents, playback requests, and alerts.
//!
//! `HeadlessHost` stands in for a renderer: it applies intents to a small
//! scene model and logs them, which is enough to run and observe a session
//! from the terminal.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, error, info, trace, warn};

use burrow_core::enums::{AlertLevel, HudSlot};
use burrow_core::events::{Alert, PresentationIntent};
use burrow_core::types::{ProjectileId, TargetId};
use burrow_sim::audio::Playback;
use burrow_sim::Reporter;

/// Receives everything the simulation asks the host to show or play.
pub trait Host: Send {
    fn present(&mut self, intent: &PresentationIntent);
    fn play(&mut self, playback: &Playback);
    fn mute_changed(&mut self, muted: bool);
}

/// Scene model kept by the headless host.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub targets: BTreeSet<TargetId>,
    pub projectiles: BTreeSet<ProjectileId>,
    pub hud: HashMap<HudSlot, String>,
    pub start_button_visible: bool,
    pub game_over_visible: bool,
    pub sounds_played: usize,
    pub music_playing: bool,
    pub mute_control: Option<MuteControl>,
}

impl HeadlessHost {
    pub fn new(mute_control: Option<MuteControl>) -> Self {
        Self {
            start_button_visible: true,
            mute_control,
            ..Self::default()
        }
    }
}

impl Host for HeadlessHost {
    fn present(&mut self, intent: &PresentationIntent) {
        match intent {
            PresentationIntent::PlaceTarget {
                target, kind, color, ..
            } => {
                self.targets.insert(*target);
                debug!(target_id = %target, ?kind, color = %color, "place target");
            }
            PresentationIntent::RemoveTarget { target } => {
                self.targets.remove(target);
            }
            PresentationIntent::PlaceProjectile { projectile, .. } => {
                self.projectiles.insert(*projectile);
            }
            PresentationIntent::RemoveProjectile { projectile } => {
                self.projectiles.remove(projectile);
            }
            PresentationIntent::SetText { slot, text } => {
                info!(?slot, text = %text, "hud");
                self.hud.insert(*slot, text.clone());
            }
            PresentationIntent::SetStartButtonVisible { visible } => {
                self.start_button_visible = *visible;
            }
            PresentationIntent::SetGameOverVisible { visible } => {
                self.game_over_visible = *visible;
            }
            PresentationIntent::AnimateTarget { .. }
            | PresentationIntent::HitBurst { .. }
            | PresentationIntent::ScorePopup { .. }
            | PresentationIntent::Recoil { .. } => trace!(?intent, "effect"),
        }
    }

    fn play(&mut self, playback: &Playback) {
        match playback {
            Playback::Sound { id, volume } => {
                self.sounds_played += 1;
                trace!(id, volume, "sound");
            }
            Playback::MusicPlay { .. } => self.music_playing = true,
            Playback::MusicPause | Playback::MusicStop => self.music_playing = false,
            Playback::MusicVolume { .. } => {}
        }
    }

    fn mute_changed(&mut self, muted: bool) {
        if let Some(control) = self.mute_control.as_mut() {
            control.muted = muted;
            debug!(label = control.label(), "mute control updated");
        }
    }
}

/// On-screen mute toggle, attached to the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteControl {
    pub anchor: String,
    pub muted: bool,
}

impl MuteControl {
    /// Attach to `anchor`. Without an anchor there is nowhere to put the
    /// control, so it is omitted and the game runs without it.
    pub fn attach(anchor: Option<&str>, muted: bool) -> Option<Self> {
        match anchor {
            Some(anchor) => Some(Self {
                anchor: anchor.to_string(),
                muted,
            }),
            None => {
                warn!("camera anchor not found, mute control omitted");
                None
            }
        }
    }

    pub fn label(&self) -> &'static str {
        if self.muted {
            "🔇"
        } else {
            "🔊"
        }
    }
}

/// Reports simulation alerts to the log.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, alert: &Alert) {
        match alert.level {
            AlertLevel::Info => info!(
                component = %alert.component,
                action = %alert.action,
                frame = alert.frame,
                "{}",
                alert.message
            ),
            AlertLevel::Warning => warn!(
                component = %alert.component,
                action = %alert.action,
                frame = alert.frame,
                "{}",
                alert.message
            ),
            AlertLevel::Critical => error!(
                component = %alert.component,
                action = %alert.action,
                frame = alert.frame,
                "{}",
                alert.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::enums::TargetKind;
    use burrow_core::types::Vec3;

    #[test]
    fn test_headless_host_tracks_scene() {
        let mut host = HeadlessHost::new(None);
        assert!(host.start_button_visible);

        host.present(&PresentationIntent::PlaceTarget {
            target: TargetId(4),
            kind: TargetKind::Fast,
            position: Vec3::ZERO,
            color: "#FF4500".into(),
            glow: false,
        });
        host.present(&PresentationIntent::SetText {
            slot: HudSlot::Score,
            text: "Score: 25".into(),
        });
        assert!(host.targets.contains(&TargetId(4)));
        assert_eq!(host.hud[&HudSlot::Score], "Score: 25");

        host.present(&PresentationIntent::RemoveTarget {
            target: TargetId(4),
        });
        assert!(host.targets.is_empty());
    }

    #[test]
    fn test_mute_control_needs_anchor() {
        assert!(MuteControl::attach(None, false).is_none());

        let mut control = MuteControl::attach(Some("camera"), false).unwrap();
        assert_eq!(control.label(), "🔊");
        control.muted = true;
        assert_eq!(control.label(), "🔇");
    }

    #[test]
    fn test_music_state_follows_playback() {
        let mut host = HeadlessHost::new(None);
        host.play(&Playback::MusicPlay { volume: 0.3 });
        assert!(host.music_playing);
        host.play(&Playback::Sound {
            id: "hit",
            volume: 0.7,
        });
        assert_eq!(host.sounds_played, 1);
        host.play(&Playback::MusicStop);
        assert!(!host.music_playing);
    }
}
