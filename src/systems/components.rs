use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::IVec2;
use rand::{rngs::SmallRng, SeedableRng};

use crate::constants::mechanics;
use crate::map::direction::Direction;
use crate::systems::animation::FrameAnimation;
use crate::systems::movement::{Motion, TilePosition};

/// A tag component for the entity controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct Player;

/// A tag component for computer-controlled chasers.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct Npc;

/// The two NPC behaviours. Re-evaluated every time the NPC is idle on a tile.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NpcBehavior {
    #[default]
    Wander,
    Chase,
}

impl NpcBehavior {
    /// Chase when within [`mechanics::CHASE_DISTANCE`] (inclusive) or in line of sight.
    pub fn evaluate(distance: i32, line_of_sight: bool) -> NpcBehavior {
        if distance <= mechanics::CHASE_DISTANCE || line_of_sight {
            NpcBehavior::Chase
        } else {
            NpcBehavior::Wander
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            NpcBehavior::Wander => mechanics::NPC_WANDER_SPEED,
            NpcBehavior::Chase => mechanics::NPC_CHASE_SPEED,
        }
    }
}

/// An answer option placed on the maze floor.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AnswerTile {
    pub answer_text: String,
    pub answer_index: u32,
    pub tile: IVec2,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub position: TilePosition,
    pub motion: Motion,
    pub animation: FrameAnimation,
}

impl PlayerBundle {
    pub fn new(tile: IVec2) -> Self {
        Self {
            player: Player,
            position: TilePosition(tile),
            motion: Motion::new(Direction::Right, mechanics::PLAYER_SPEED),
            animation: FrameAnimation::default(),
        }
    }
}

#[derive(Bundle)]
pub struct NpcBundle {
    pub npc: Npc,
    pub position: TilePosition,
    pub motion: Motion,
    pub behavior: NpcBehavior,
    pub animation: FrameAnimation,
}

impl NpcBundle {
    pub fn new(tile: IVec2) -> Self {
        Self {
            npc: Npc,
            position: TilePosition(tile),
            motion: Motion::new(Direction::Left, mechanics::NPC_WANDER_SPEED),
            behavior: NpcBehavior::Wander,
            animation: FrameAnimation::default(),
        }
    }
}

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub f32);

/// The engine's random source. Seedable so sessions can be replayed.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self(SmallRng::from_rng(&mut rand::rng()))
    }
}
