use bevy_ecs::system::RunSystemOnce;
use glam::IVec2;
use maze_chase::{
    constants::mechanics,
    map::{direction::Direction, grid::Grid, layout::MapId},
    systems::{
        components::{GameRng, Npc, NpcBehavior},
        movement::{Motion, TilePosition},
        npc::{chase_direction, npc_behavior_system, wander_direction},
    },
};
use pretty_assertions::assert_eq;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;

mod common;

fn npc_state(world: &mut bevy_ecs::world::World) -> (TilePosition, Motion, NpcBehavior) {
    let mut query = world.query::<(&TilePosition, &Motion, &NpcBehavior, &Npc)>();
    let (position, motion, behavior, _) = query.single(world).expect("NPC should exist");
    (*position, *motion, *behavior)
}

#[test]
fn test_chase_threshold_is_inclusive() {
    assert_eq!(NpcBehavior::evaluate(5, false), NpcBehavior::Chase);
    assert_eq!(NpcBehavior::evaluate(6, false), NpcBehavior::Wander);
    assert_eq!(NpcBehavior::evaluate(0, false), NpcBehavior::Chase);
}

#[test]
fn test_line_of_sight_forces_chase() {
    assert_eq!(NpcBehavior::evaluate(17, true), NpcBehavior::Chase);
}

#[test]
fn test_behavior_speeds() {
    assert_eq!(NpcBehavior::Wander.speed(), mechanics::NPC_WANDER_SPEED);
    assert_eq!(NpcBehavior::Chase.speed(), mechanics::NPC_CHASE_SPEED);
}

#[test]
fn test_chase_moves_closer() {
    let grid = Grid::for_map(MapId::One);

    let direction = chase_direction(&grid, IVec2::new(5, 1), IVec2::new(1, 1));
    assert_that(&direction).is_equal_to(Some(Direction::Left));
}

#[test]
fn test_chase_tie_keeps_first_direction() {
    let grid = Grid::for_map(MapId::One);

    // Down and Right both bring the distance from 8 to 7; Down comes first
    let direction = chase_direction(&grid, IVec2::new(1, 1), IVec2::new(5, 5));
    assert_that(&direction).is_equal_to(Some(Direction::Down));
}

#[test]
fn test_chase_holds_when_nothing_improves() {
    let grid = Grid::for_map(MapId::Three);

    // The only open neighbour of (1, 1) is (2, 1), which is farther from (1, 3)
    let direction = chase_direction(&grid, IVec2::new(1, 1), IVec2::new(1, 3));
    assert_that(&direction).is_none();
}

#[test]
fn test_wander_only_picks_walkable_directions() {
    let grid = Grid::for_map(MapId::Three);
    let mut found = false;

    for seed in 0..64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        if let Some(direction) = wander_direction(&grid, IVec2::new(1, 1), &mut rng) {
            assert_eq!(direction, Direction::Right);
            found = true;
        }
    }

    assert_that(&found).is_true();
}

#[test]
fn test_wander_boxed_in_stays_put() {
    let grid = Grid::from_rows(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]]).expect("valid grid");
    let mut rng = SmallRng::seed_from_u64(1);

    assert_that(&wander_direction(&grid, IVec2::new(1, 1), &mut rng)).is_none();
}

#[test]
fn test_behavior_system_chases_nearby_player() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, IVec2::new(1, 1));
    common::spawn_test_npc(&mut world, IVec2::new(4, 1));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let (position, motion, behavior) = npc_state(&mut world);
    assert_eq!(behavior, NpcBehavior::Chase);
    assert_eq!(position.0, IVec2::new(4, 1));
    assert_that(&motion.moving).is_true();
    assert_eq!(motion.direction, Direction::Left);
    assert_eq!(motion.speed, mechanics::NPC_CHASE_SPEED);
}

#[test]
fn test_behavior_system_wanders_when_far() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, IVec2::new(1, 1));
    common::spawn_test_npc(&mut world, IVec2::new(15, 5));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let (position, motion, behavior) = npc_state(&mut world);
    assert_eq!(behavior, NpcBehavior::Wander);
    if motion.moving {
        assert_eq!(motion.speed, mechanics::NPC_WANDER_SPEED);
        let grid = world.resource::<Grid>();
        assert_that(&grid.is_walkable(position.0 + motion.direction.as_ivec2())).is_true();
    }
}

#[test]
fn test_behavior_system_skips_moving_npcs() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, IVec2::new(1, 1));
    let npc = common::spawn_test_npc(&mut world, IVec2::new(4, 1));
    world.entity_mut(npc).insert(Motion {
        direction: Direction::Right,
        moving: true,
        progress: 0.5,
        speed: mechanics::NPC_WANDER_SPEED,
    });

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let (_, motion, behavior) = npc_state(&mut world);
    assert_eq!(behavior, NpcBehavior::Wander);
    assert_eq!(motion.direction, Direction::Right);
    assert_eq!(motion.progress, 0.5);
}

#[test]
fn test_behavior_system_without_player_is_noop() {
    let mut world = common::create_test_world();
    common::spawn_test_npc(&mut world, IVec2::new(4, 1));

    world
        .run_system_once(npc_behavior_system)
        .expect("System should run successfully");

    let (_, motion, _) = npc_state(&mut world);
    assert_that(&motion.moving).is_false();
}

#[test]
fn test_seeded_rng_is_reproducible() {
    let grid = Grid::for_map(MapId::One);
    let mut a = GameRng::seeded(99);
    let mut b = GameRng::seeded(99);

    for _ in 0..16 {
        assert_eq!(
            wander_direction(&grid, IVec2::new(9, 5), &mut a.0),
            wander_direction(&grid, IVec2::new(9, 5), &mut b.0)
        );
    }
}
