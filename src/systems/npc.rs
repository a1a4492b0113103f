use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::trace;

use crate::constants::mechanics;
use crate::map::{
    direction::Direction,
    grid::{manhattan, Grid},
};
use crate::systems::components::{GameRng, Npc, NpcBehavior, Player};
use crate::systems::movement::{try_start_move, Motion, TilePosition};

/// Greedy descent towards `target`.
///
/// Picks the walkable neighbour with the smallest Manhattan distance to the target, but only
/// if it is strictly closer than the current tile. Ties keep the earlier direction in
/// [`Direction::DIRECTIONS`] order. Returns `None` when no neighbour improves the distance.
pub fn chase_direction(grid: &Grid, from: IVec2, target: IVec2) -> Option<Direction> {
    let mut best: Option<Direction> = None;
    let mut best_distance = manhattan(from, target);

    for direction in Direction::DIRECTIONS {
        let next = from + direction.as_ivec2();
        if !grid.is_walkable(next) {
            continue;
        }
        let distance = manhattan(next, target);
        if distance < best_distance {
            best_distance = distance;
            best = Some(direction);
        }
    }

    best
}

/// Samples up to [`mechanics::WANDER_ATTEMPTS`] uniformly random directions, returning the
/// first that leads to a walkable tile.
pub fn wander_direction<R: Rng + ?Sized>(grid: &Grid, from: IVec2, rng: &mut R) -> Option<Direction> {
    (0..mechanics::WANDER_ATTEMPTS)
        .filter_map(|_| Direction::DIRECTIONS.choose(rng).copied())
        .find(|direction| grid.is_walkable(from + direction.as_ivec2()))
}

/// Decides the next step for every idle NPC.
///
/// Mode switches are instantaneous: an NPC may alternate between chasing and wandering on
/// consecutive ticks as the distance crosses the threshold.
pub fn npc_behavior_system(
    grid: Res<Grid>,
    mut rng: ResMut<GameRng>,
    players: Query<&TilePosition, (With<Player>, Without<Npc>)>,
    mut npcs: Query<(&TilePosition, &mut Motion, &mut NpcBehavior), With<Npc>>,
) {
    // Nothing to chase once the maze has been torn down
    let Ok(player) = players.single() else {
        return;
    };

    for (position, mut motion, mut behavior) in npcs.iter_mut() {
        if motion.moving {
            continue;
        }

        let distance = manhattan(position.0, player.0);
        let line_of_sight = grid.has_line_of_sight(position.0, player.0);
        let next_behavior = NpcBehavior::evaluate(distance, line_of_sight);
        if *behavior != next_behavior {
            trace!(tile = ?position.0, distance, line_of_sight, from = ?*behavior, to = ?next_behavior, "NPC behavior changed");
            *behavior = next_behavior;
        }

        let direction = match next_behavior {
            NpcBehavior::Chase => chase_direction(&grid, position.0, player.0),
            NpcBehavior::Wander => wander_direction(&grid, position.0, &mut rng.0),
        };

        if let Some(direction) = direction {
            try_start_move(&grid, position, &mut motion, direction, next_behavior.speed());
        }
    }
}
