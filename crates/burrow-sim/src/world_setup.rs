//! Entity spawn factories and spawn-area layout.
//!
//! Creates target and projectile entities with their component bundles, and
//! lays out the candidate spawn positions around the player.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use burrow_core::components::*;
use burrow_core::constants::*;
use burrow_core::enums::*;
use burrow_core::types::{ProjectileId, TargetId, Vec3};
use burrow_fsm::profiles::get_profile;

/// Spawn a target buried below `position`, waiting to emerge.
pub fn spawn_target(
    world: &mut World,
    id: TargetId,
    kind: TargetKind,
    position: Vec3,
) -> hecs::Entity {
    let profile = get_profile(kind);
    let surface = Vec3::new(position.x, SURFACE_HEIGHT, position.z);

    world.spawn((
        Target {
            id,
            kind,
            points: profile.points,
            alive: true,
            retreating: false,
            phase: TargetPhase::Spawned,
            spawn_position: surface,
            retreat_timer: None,
        },
        Position(Vec3::new(position.x, BURIED_HEIGHT, position.z)),
        TargetMotion::default(),
    ))
}

/// Spawn a projectile at `origin` travelling along `direction` (unit length).
pub fn spawn_projectile(
    world: &mut World,
    id: ProjectileId,
    origin: Vec3,
    direction: Vec3,
    speed: f32,
    max_distance: f32,
    lifespan_ms: u64,
) -> hecs::Entity {
    world.spawn((
        Projectile {
            id,
            origin,
            direction,
            speed,
            traveled: 0.0,
            age_ms: 0,
            max_distance,
            lifespan_ms,
        },
        Position(origin),
    ))
}

/// Lay out spawn candidates: a grid over a square of side `2 * spawn_radius`,
/// each cell center nudged by a small random offset, with anything near the
/// player at the origin discarded.
pub fn generate_spawn_candidates(rng: &mut ChaCha8Rng, spawn_radius: f32) -> Vec<Vec3> {
    let grid = SPAWN_GRID_SIZE as f32;
    let spacing = spawn_radius * 2.0 / grid;
    let mut candidates = Vec::with_capacity(SPAWN_GRID_SIZE * SPAWN_GRID_SIZE);

    for ix in 0..SPAWN_GRID_SIZE {
        for iz in 0..SPAWN_GRID_SIZE {
            let x = (ix as f32 - grid / 2.0 + 0.5) * spacing
                + rng.gen_range(-SPAWN_CELL_JITTER..SPAWN_CELL_JITTER);
            let z = (iz as f32 - grid / 2.0 + 0.5) * spacing
                + rng.gen_range(-SPAWN_CELL_JITTER..SPAWN_CELL_JITTER);

            if x.abs() < SPAWN_EXCLUSION && z.abs() < SPAWN_EXCLUSION {
                continue;
            }
            candidates.push(Vec3::new(x, SURFACE_HEIGHT, z));
        }
    }

    candidates
}

/// Pick a spawn position uniformly from the candidates, or uniformly within
/// the spawn radius when there are none.
pub fn pick_spawn_position(rng: &mut ChaCha8Rng, candidates: &[Vec3], spawn_radius: f32) -> Vec3 {
    if candidates.is_empty() {
        let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        let radius: f32 = rng.gen_range(0.0..1.0) * spawn_radius;
        return Vec3::new(angle.cos() * radius, SURFACE_HEIGHT, angle.sin() * radius);
    }
    candidates[rng.gen_range(0..candidates.len())]
}
