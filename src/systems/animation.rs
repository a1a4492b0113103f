use bevy_ecs::{
    component::Component,
    system::{Query, Res},
};

use crate::constants::animation::{FRAME_COUNT, FRAME_DURATION};
use crate::systems::components::DeltaTime;
use crate::systems::movement::Motion;

/// Walk-cycle state, advanced only while the entity is moving.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameAnimation {
    pub frame_index: u8,
    pub frame_timer: f32,
}

impl FrameAnimation {
    pub fn tick(&mut self, moving: bool, dt: f32) {
        if !moving {
            self.frame_index = 0;
            self.frame_timer = 0.0;
            return;
        }

        self.frame_timer += dt;
        if self.frame_timer >= FRAME_DURATION {
            self.frame_timer -= FRAME_DURATION;
            self.frame_index = (self.frame_index + 1) % FRAME_COUNT;
        }
    }
}

pub fn frame_animation_system(delta_time: Res<DeltaTime>, mut query: Query<(&Motion, &mut FrameAnimation)>) {
    for (motion, mut animation) in query.iter_mut() {
        animation.tick(motion.moving, delta_time.0);
    }
}
