use bevy_ecs::{
    component::Component,
    event::EventWriter,
    query::With,
    system::{Query, Res},
};
use glam::{IVec2, Vec2};
use tracing::trace;

use crate::constants::{mechanics, TILE_SIZE};
use crate::events::PlayerArrived;
use crate::map::{direction::Direction, grid::Grid};
use crate::systems::components::{DeltaTime, Npc, Player};
use crate::systems::input::InputDirections;

/// The last tile an entity fully arrived on. Always a walkable tile.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePosition(pub IVec2);

/// Progress of a single tile-to-tile step.
///
/// The committed tile only changes once `progress` reaches 1; rendering interpolates
/// between the committed tile and its neighbour in `direction` meanwhile.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Facing, kept between moves to orient rendering.
    pub direction: Direction,
    pub moving: bool,
    /// In `[0, 1)` while moving.
    pub progress: f32,
    /// Tiles per second.
    pub speed: f32,
}

impl Motion {
    pub fn new(direction: Direction, speed: f32) -> Self {
        Self {
            direction,
            moving: false,
            progress: 0.0,
            speed,
        }
    }

    /// Advances an in-flight step by `dt` seconds.
    ///
    /// Returns the step direction when the step completes; the caller commits the tile.
    pub fn advance(&mut self, dt: f32) -> Option<Direction> {
        if !self.moving {
            return None;
        }

        self.progress += self.speed * dt;
        if self.progress >= 1.0 {
            self.moving = false;
            self.progress = 0.0;
            return Some(self.direction);
        }
        None
    }

    /// Offset from the committed tile, in tiles.
    pub fn render_offset(&self) -> Vec2 {
        if self.moving {
            self.direction.as_ivec2().as_vec2() * self.progress
        } else {
            Vec2::ZERO
        }
    }
}

/// Begins a step towards the neighbouring tile in `direction`.
///
/// Ignored when the entity is already mid-step or the destination is not walkable.
/// Returns whether the step was started.
pub fn try_start_move(grid: &Grid, position: &TilePosition, motion: &mut Motion, direction: Direction, speed: f32) -> bool {
    if motion.moving {
        return false;
    }

    let target = position.0 + direction.as_ivec2();
    if !grid.is_walkable(target) {
        return false;
    }

    motion.direction = direction;
    motion.moving = true;
    motion.progress = 0.0;
    motion.speed = speed;
    true
}

/// Advances a step and commits the tile change when it completes.
///
/// Returns `true` on the frame the entity arrives on a new tile.
pub fn advance(position: &mut TilePosition, motion: &mut Motion, dt: f32) -> bool {
    match motion.advance(dt) {
        Some(direction) => {
            position.0 += direction.as_ivec2();
            true
        }
        None => false,
    }
}

/// Pixel-space centre of an entity, interpolated along its current step.
pub fn render_center(position: &TilePosition, motion: &Motion) -> Vec2 {
    (position.0.as_vec2() + motion.render_offset() + Vec2::splat(0.5)) * TILE_SIZE as f32
}

/// Resolves the wanted direction, starts a step if idle and advances the player.
pub fn player_movement_system(
    grid: Res<Grid>,
    delta_time: Res<DeltaTime>,
    input: Res<InputDirections>,
    mut players: Query<(&mut TilePosition, &mut Motion), With<Player>>,
    mut arrivals: EventWriter<PlayerArrived>,
) {
    for (mut position, mut motion) in players.iter_mut() {
        if !motion.moving {
            let wanted = input.resolve(motion.direction);
            try_start_move(&grid, &position, &mut motion, wanted, mechanics::PLAYER_SPEED);
        }

        if advance(&mut position, &mut motion, delta_time.0) {
            trace!(tile = ?position.0, "Player arrived on tile");
            arrivals.write(PlayerArrived { tile: position.0 });
        }
    }
}

/// Advances every NPC's in-flight step. Decisions are made by the behaviour system beforehand.
pub fn npc_movement_system(delta_time: Res<DeltaTime>, mut npcs: Query<(&mut TilePosition, &mut Motion), With<Npc>>) {
    for (mut position, mut motion) in npcs.iter_mut() {
        advance(&mut position, &mut motion, delta_time.0);
    }
}
