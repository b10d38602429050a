//! Target lifecycle state machine.
//!
//! `spawned -> emerged -> {retreating | hit} -> removed`. The `alive` flag,
//! not the `retreating` flag, gates a hit, so a retreating target can still
//! be struck until its removal fires.

use burrow_core::enums::TargetPhase;

/// Lifecycle flags of one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetStatus {
    pub phase: TargetPhase,
    pub alive: bool,
    pub retreating: bool,
}

/// Stimulus delivered to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetInput {
    /// Emerge delay elapsed.
    Emerge,
    /// Dwell timer expired.
    Retreat,
    /// Struck by a projectile (or by the host directly).
    Hit,
}

/// Output of the target FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetUpdate {
    pub status: TargetStatus,
    pub phase_changed: bool,
}

impl TargetStatus {
    /// Status of a freshly spawned target.
    pub fn spawned() -> Self {
        Self {
            phase: TargetPhase::Spawned,
            alive: true,
            retreating: false,
        }
    }
}

/// Evaluate one input against a target's status.
pub fn evaluate(status: &TargetStatus, input: TargetInput) -> TargetUpdate {
    let no_change = TargetUpdate {
        status: *status,
        phase_changed: false,
    };

    if !status.alive {
        return no_change;
    }

    match input {
        TargetInput::Emerge => {
            if status.phase != TargetPhase::Spawned {
                return no_change;
            }
            TargetUpdate {
                status: TargetStatus {
                    phase: TargetPhase::Emerged,
                    ..*status
                },
                phase_changed: true,
            }
        }
        TargetInput::Retreat => {
            if status.retreating {
                return no_change;
            }
            TargetUpdate {
                status: TargetStatus {
                    phase: TargetPhase::Retreating,
                    retreating: true,
                    ..*status
                },
                phase_changed: true,
            }
        }
        TargetInput::Hit => TargetUpdate {
            status: TargetStatus {
                phase: TargetPhase::Hit,
                alive: false,
                ..*status
            },
            phase_changed: true,
        },
    }
}
