//! Target height animation.
//!
//! Evaluates each target's active tween at the current time and writes the
//! resulting height into its Position. Collision reads these heights.

use hecs::World;

use burrow_core::components::{Position, TargetMotion};

/// Run height animation for all targets with an active tween.
pub fn run(world: &mut World, now_ms: u64) {
    for (_entity, (motion, pos)) in world.query_mut::<(&mut TargetMotion, &mut Position)>() {
        let Some(tween) = motion.tween else {
            continue;
        };

        let elapsed = now_ms.saturating_sub(tween.start_ms);
        let t = if tween.duration_ms == 0 {
            1.0
        } else {
            elapsed as f32 / tween.duration_ms as f32
        };

        pos.0.y = tween.from + (tween.to - tween.from) * tween.easing.apply(t);

        if t >= 1.0 {
            pos.0.y = tween.to;
            motion.tween = None;
        }
    }
}
