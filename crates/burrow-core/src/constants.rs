//! Simulation constants and tuning parameters.

/// Default frame rate used by `SimulationEngine::tick` (Hz).
pub const TICK_RATE: u32 = 100;

/// Milliseconds per default frame.
pub const FRAME_MS: u64 = 1000 / TICK_RATE as u64;

// --- Target lifecycle ---

/// Delay between spawning a target and starting its emerge (ms).
pub const EMERGE_DELAY_MS: u64 = 100;

/// Emerge animation duration (ms).
pub const EMERGE_ANIMATION_MS: u64 = 500;

/// Retreat animation duration; the target is removed when it completes (ms).
pub const RETREAT_REMOVAL_MS: u64 = 500;

/// Hit (explosion) animation duration; the target is removed when it completes (ms).
pub const HIT_REMOVAL_MS: u64 = 500;

/// Score popup lifetime (ms).
pub const SCORE_POPUP_MS: u64 = 1000;

/// Height of the score popup above the struck target (m).
pub const SCORE_POPUP_OFFSET: f32 = 0.25;

/// Dwell before auto-retreat for standard and bonus targets (ms).
pub const STANDARD_DWELL_MS: u64 = 2000;

/// Dwell before auto-retreat for fast targets (ms).
pub const FAST_DWELL_MS: u64 = 1000;

/// Height of a target before it emerges and after it retreats (m).
pub const BURIED_HEIGHT: f32 = -0.25;

/// Height of a fully emerged target (m).
pub const SURFACE_HEIGHT: f32 = 0.0;

// --- Scoring ---

pub const STANDARD_POINTS: u32 = 10;
pub const FAST_POINTS: u32 = 25;
pub const BONUS_POINTS: u32 = 50;

/// Points credited when a hit notification carries no value.
pub const DEFAULT_HIT_POINTS: u32 = 10;

// --- Spawner ---

/// Probability that a spawn is a bonus target.
pub const BONUS_CHANCE: f64 = 0.10;

/// Upper bound of the fast band: rolls in `[BONUS_CHANCE, FAST_THRESHOLD)`
/// are fast (a 20% chance). Kept as a literal since `0.10 + 0.20` rounds
/// above `0.30` in f64.
pub const FAST_THRESHOLD: f64 = 0.30;

/// Retry delay when the live set is at capacity (ms).
pub const SPAWN_BACKOFF_MS: u64 = 500;

/// Lower bound of the spawn interval jitter factor.
pub const SPAWN_JITTER_MIN: f64 = 0.8;

/// Width of the spawn interval jitter factor (0.8 .. 1.2).
pub const SPAWN_JITTER_SPAN: f64 = 0.4;

/// Spawn candidates form a square grid of this many cells per side.
pub const SPAWN_GRID_SIZE: usize = 3;

/// Maximum random offset applied to each grid cell center, per axis (m).
pub const SPAWN_CELL_JITTER: f32 = 0.05;

/// Candidates with both |x| and |z| below this are too close to the player (m).
pub const SPAWN_EXCLUSION: f32 = 0.2;

// --- Projectiles ---

/// Distance below which a projectile strikes a target (m). Strict comparison.
pub const HIT_RADIUS: f32 = 0.15;

/// Targets lower than this are underground and cannot be struck (m).
pub const MIN_HITTABLE_HEIGHT: f32 = -0.1;

/// Distance from the grip to the weapon tip where projectiles appear (m).
pub const MUZZLE_OFFSET: f32 = 0.3;

/// Recoil animation duration (ms).
pub const RECOIL_MS: u64 = 50;

// --- Session ---

/// Countdown period (ms).
pub const COUNTDOWN_PERIOD_MS: u64 = 1000;

// --- Audio ---

/// Music fade-out step applied every `MUSIC_FADE_INTERVAL_MS`.
pub const MUSIC_FADE_STEP: f32 = 0.05;

/// Music fade-out step period (ms).
pub const MUSIC_FADE_INTERVAL_MS: u64 = 100;
