//! Kind-specific target profiles.
//!
//! Consolidates per-kind parameters for the target lifecycle.

use burrow_core::enums::TargetKind;

/// Profile for a target kind.
pub struct TargetProfile {
    /// Points credited on hit.
    pub points: u32,
    /// Time spent emerged before auto-retreat (ms).
    pub dwell_ms: u64,
    /// Body color handed to the renderer.
    pub color: &'static str,
    /// Whether the renderer should add a pulsing glow.
    pub glow: bool,
}

/// Get the profile for a given kind.
pub fn get_profile(kind: TargetKind) -> TargetProfile {
    use burrow_core::constants::*;

    match kind {
        TargetKind::Standard => TargetProfile {
            points: STANDARD_POINTS,
            dwell_ms: STANDARD_DWELL_MS,
            color: "#8B4513",
            glow: false,
        },
        TargetKind::Fast => TargetProfile {
            points: FAST_POINTS,
            dwell_ms: FAST_DWELL_MS,
            color: "#FF4500",
            glow: false,
        },
        TargetKind::Bonus => TargetProfile {
            points: BONUS_POINTS,
            dwell_ms: STANDARD_DWELL_MS,
            color: "#FFD700",
            glow: true,
        },
    }
}
