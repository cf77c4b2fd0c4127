use bevy::prelude::*;
use constants::animation::PHASE_PER_SECOND;

/// Animation phase shared by the point shader and the pick proxies.
/// Written once per frame before either reads it.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AnimationClock {
    pub phase: f32,
}

impl AnimationClock {
    pub fn phase_at(elapsed_secs: f32) -> f32 {
        elapsed_secs * PHASE_PER_SECOND
    }
}

pub fn advance_animation_clock(time: Res<Time>, mut clock: ResMut<AnimationClock>) {
    clock.phase = AnimationClock::phase_at(time.elapsed_secs());
}
