//! Spawning and teardown of the maze-stage entities.

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{Or, With},
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::constants::mechanics;
use crate::error::GameError;
use crate::events::StageTransition;
use crate::map::grid::Grid;
use crate::systems::answers::{place_answer_tiles, QuestionBoard};
use crate::systems::components::{AnswerTile, GameRng, Npc, NpcBundle, Player, PlayerBundle};
use crate::systems::input::InputDirections;
use crate::systems::state::GameStage;

/// Per-session spawn parameters.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeSettings {
    pub npc_count: usize,
    pub player_spawn: IVec2,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            npc_count: mechanics::MAX_NPCS,
            player_spawn: mechanics::PLAYER_SPAWN,
        }
    }
}

/// Picks up to `count` distinct tiles from `pool`, removing them from it.
pub fn take_random_tiles<R: Rng + ?Sized>(pool: &mut Vec<IVec2>, count: usize, rng: &mut R) -> SmallVec<[IVec2; 4]> {
    let mut taken = SmallVec::new();
    for _ in 0..count.min(pool.len()) {
        let index = rng.random_range(0..pool.len());
        taken.push(pool.swap_remove(index));
    }
    taken
}

/// Where everything starts when the maze stage is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnLayout {
    pub player: IVec2,
    pub npcs: Vec<IVec2>,
    pub answers: Vec<AnswerTile>,
}

/// Lays out the player, NPCs and answer tiles on distinct tiles.
///
/// NPCs and answers are drawn without replacement from the walkable tiles other than the
/// player's, NPCs first. Either set is truncated if the maze runs out of floor.
pub fn plan_spawns<R: Rng + ?Sized>(grid: &Grid, settings: &MazeSettings, board: &QuestionBoard, rng: &mut R) -> SpawnLayout {
    let player = settings.player_spawn;
    let mut pool: Vec<IVec2> = grid.walkable_tiles().into_iter().filter(|&tile| tile != player).collect();

    let npcs = take_random_tiles(&mut pool, settings.npc_count, rng).into_vec();
    let answers = place_answer_tiles(&board.answers, &mut pool, rng);

    SpawnLayout { player, npcs, answers }
}

/// Spawns the maze on entry and tears it down on exit.
///
/// Teardown despawns every maze entity and forgets pending input, so nothing from a
/// previous session can act on the next one.
#[allow(clippy::too_many_arguments)]
pub fn maze_lifecycle_system(
    mut commands: Commands,
    mut transitions: EventReader<StageTransition>,
    grid: Res<Grid>,
    settings: Res<MazeSettings>,
    board: Res<QuestionBoard>,
    mut rng: ResMut<GameRng>,
    mut input: ResMut<InputDirections>,
    maze_entities: Query<Entity, Or<(With<Player>, With<Npc>, With<AnswerTile>)>>,
    mut errors: EventWriter<GameError>,
) {
    for transition in transitions.read() {
        let entering = matches!(transition.to, GameStage::Maze);
        let leaving = matches!(transition.from, GameStage::Maze) && !entering;

        if leaving {
            let mut despawned = 0;
            for entity in maze_entities.iter() {
                commands.entity(entity).despawn();
                despawned += 1;
            }
            input.clear();
            debug!(despawned, "Maze torn down");
        }

        if entering {
            let layout = plan_spawns(&grid, &settings, &board, &mut rng.0);
            info!(
                player = ?layout.player,
                npcs = layout.npcs.len(),
                answers = layout.answers.len(),
                "Spawning maze entities"
            );

            if grid.is_walkable(layout.player) {
                commands.spawn(PlayerBundle::new(layout.player));
            } else {
                errors.write(GameError::InvalidState(format!(
                    "player spawn {} is not a walkable tile",
                    layout.player
                )));
            }
            for tile in layout.npcs {
                commands.spawn(NpcBundle::new(tile));
            }
            for answer in layout.answers {
                commands.spawn(answer);
            }
        }
    }
}
