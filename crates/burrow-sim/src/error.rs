//! Faults raised inside a single simulation action.

use thiserror::Error;

use burrow_core::types::{ProjectileId, TargetId};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{id} is missing component data")]
    TargetComponent {
        id: TargetId,
        #[source]
        source: hecs::ComponentError,
    },
    #[error("{id} could not be despawned")]
    TargetDespawn {
        id: TargetId,
        #[source]
        source: hecs::NoSuchEntity,
    },
    #[error("{id} is missing component data")]
    ProjectileComponent {
        id: ProjectileId,
        #[source]
        source: hecs::ComponentError,
    },
    #[error("{id} could not be despawned")]
    ProjectileDespawn {
        id: ProjectileId,
        #[source]
        source: hecs::NoSuchEntity,
    },
}

impl SimError {
    /// The target left inconsistent by this fault, if any.
    pub fn target(&self) -> Option<TargetId> {
        match self {
            SimError::TargetComponent { id, .. } | SimError::TargetDespawn { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The projectile left inconsistent by this fault, if any.
    pub fn projectile(&self) -> Option<ProjectileId> {
        match self {
            SimError::ProjectileComponent { id, .. } | SimError::ProjectileDespawn { id, .. } => {
                Some(*id)
            }
            _ => None,
        }
    }
}
