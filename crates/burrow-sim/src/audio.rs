//! Audio director: turns simulation audio events into playback requests.
//!
//! Decides what to play and at what volume; the host owns decoding and
//! mixing. Sounds missing from the bank are skipped. With no bank at all the
//! director stays silent for the whole run.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use burrow_core::config::AudioConfig;
use burrow_core::constants::{MUSIC_FADE_INTERVAL_MS, MUSIC_FADE_STEP};
use burrow_core::enums::SessionPhase;
use burrow_core::events::AudioEvent;

/// Sound ids the game uses.
pub const SOUND_IDS: [&str; 6] = ["emerge", "hit", "retreat", "shoot", "start", "end"];

/// The sounds and music track the host has loaded.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    sounds: BTreeSet<String>,
    music: bool,
}

impl SoundBank {
    pub fn new<I, S>(sounds: I, music: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sounds: sounds.into_iter().map(Into::into).collect(),
            music,
        }
    }

    /// A bank holding every sound and the music track.
    pub fn complete() -> Self {
        Self::new(SOUND_IDS, true)
    }

    pub fn has_sound(&self, id: &str) -> bool {
        self.sounds.contains(id)
    }

    pub fn has_music(&self) -> bool {
        self.music
    }
}

/// A request to the host's audio backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Playback {
    /// Play a one-shot sound; overlapping plays are allowed.
    Sound { id: &'static str, volume: f32 },
    /// Start the music from the beginning.
    MusicPlay { volume: f32 },
    MusicVolume { volume: f32 },
    MusicPause,
    /// Pause and rewind the music.
    MusicStop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Music {
    Stopped,
    Playing,
    Fading { volume: f32, next_step_ms: u64 },
}

pub struct AudioDirector {
    bank: Option<SoundBank>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    session: SessionPhase,
    music: Music,
    now_ms: u64,
}

impl AudioDirector {
    pub fn new(config: &AudioConfig, bank: Option<SoundBank>) -> Self {
        match &bank {
            Some(bank) => debug!(
                sounds = bank.sounds.len(),
                music = bank.music,
                "audio bank loaded"
            ),
            None => warn!("no audio assets available, sound disabled"),
        }
        Self {
            bank,
            sfx_volume: config.sfx_volume,
            music_volume: config.music_volume,
            muted: config.muted,
            session: SessionPhase::Idle,
            music: Music::Stopped,
            now_ms: 0,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Map one simulation event to playback requests.
    pub fn handle(&mut self, event: &AudioEvent) -> Vec<Playback> {
        let mut out = Vec::new();
        match event {
            AudioEvent::TargetEmerged { .. } => self.play_sound("emerge", &mut out),
            AudioEvent::TargetHit { .. } => self.play_sound("hit", &mut out),
            AudioEvent::TargetRetreated { .. } => self.play_sound("retreat", &mut out),
            AudioEvent::Shot => self.play_sound("shoot", &mut out),
            AudioEvent::SessionChanged { phase } => {
                self.session = *phase;
                match phase {
                    SessionPhase::Playing => {
                        self.play_sound("start", &mut out);
                        self.play_music(&mut out);
                    }
                    SessionPhase::Finished => {
                        self.play_sound("end", &mut out);
                        self.fade_music();
                    }
                    SessionPhase::Idle => {}
                }
            }
        }
        out
    }

    /// Advance the music fade by `dt_ms`.
    pub fn update(&mut self, dt_ms: u64) -> Vec<Playback> {
        self.now_ms += dt_ms;
        let mut out = Vec::new();

        while let Music::Fading {
            volume,
            next_step_ms,
        } = self.music
        {
            if next_step_ms > self.now_ms {
                break;
            }
            if volume > MUSIC_FADE_STEP {
                let volume = volume - MUSIC_FADE_STEP;
                out.push(Playback::MusicVolume { volume });
                self.music = Music::Fading {
                    volume,
                    next_step_ms: next_step_ms + MUSIC_FADE_INTERVAL_MS,
                };
            } else {
                out.push(Playback::MusicStop);
                self.music = Music::Stopped;
            }
        }
        out
    }

    /// Flip the mute flag. Returns the new flag and any music change.
    pub fn toggle_mute(&mut self) -> (bool, Vec<Playback>) {
        let mut out = Vec::new();
        if self.muted {
            self.muted = false;
            if self.session == SessionPhase::Playing {
                self.play_music(&mut out);
            }
        } else {
            self.muted = true;
            if self.has_music() {
                out.push(Playback::MusicPause);
            }
        }
        debug!(muted = self.muted, "mute toggled");
        (self.muted, out)
    }

    fn play_sound(&self, id: &'static str, out: &mut Vec<Playback>) {
        if self.muted {
            return;
        }
        match &self.bank {
            Some(bank) if bank.has_sound(id) => out.push(Playback::Sound {
                id,
                volume: self.sfx_volume,
            }),
            Some(_) => debug!(id, "sound not in bank, skipped"),
            None => {}
        }
    }

    fn play_music(&mut self, out: &mut Vec<Playback>) {
        if self.muted || !self.has_music() {
            return;
        }
        self.music = Music::Playing;
        out.push(Playback::MusicPlay {
            volume: self.music_volume,
        });
    }

    fn fade_music(&mut self) {
        if !self.has_music() {
            return;
        }
        let volume = match self.music {
            Music::Fading { volume, .. } => volume,
            _ => self.music_volume,
        };
        self.music = Music::Fading {
            volume,
            next_step_ms: self.now_ms + MUSIC_FADE_INTERVAL_MS,
        };
    }

    fn has_music(&self) -> bool {
        self.bank.as_ref().is_some_and(SoundBank::has_music)
    }
}
