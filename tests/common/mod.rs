#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::EventRegistry,
    query::With,
    world::World,
};
use glam::IVec2;
use maze_chase::{
    api::{Answer, GameDefinition, Question},
    error::GameError,
    events::{AnswerSelected, GameEvent, PlayerArrived, StageTransition},
    game::{Game, GameOptions},
    map::{grid::Grid, layout::MapId},
    systems::{
        answers::{AnswerHandler, QuestionBoard},
        components::{DeltaTime, GameRng, GlobalState, NpcBundle, Player, PlayerBundle},
        input::{Bindings, InputDirections},
        movement::{Motion, TilePosition},
        render::{palette, DrawCommand, RenderList},
        spawn::MazeSettings,
        state::{Countdown, GameStage, PauseState},
    },
};

pub const SAMPLE_RESPONSE: &str = r#"{
    "success": true,
    "statusCode": 200,
    "message": "Game fetched successfully",
    "data": {
        "id": "7f0c2a5e",
        "name": "European Capitals",
        "description": "Walk to the right capital",
        "thumbnail_image": "uploads/capitals.png",
        "score_per_question": 10,
        "map_id": "3",
        "countdown": 2,
        "questions": [
            {
                "question_text": "What is the capital of France?",
                "question_index": 0,
                "answers": [
                    { "answer_text": "Paris", "answer_index": 0 },
                    { "answer_text": "Amsterdam", "answer_index": 1 },
                    { "answer_text": "Berlin", "answer_index": 2 }
                ]
            },
            {
                "question_text": "What is the capital of Spain?",
                "question_index": 1,
                "answers": [
                    { "answer_text": "Madrid", "answer_index": 0 },
                    { "answer_text": "Lisbon", "answer_index": 1 }
                ]
            }
        ],
        "is_published": true
    }
}"#;

pub fn answer(text: &str, index: u32) -> Answer {
    Answer {
        answer_text: text.to_string(),
        answer_index: index,
    }
}

/// A one-question definition on `map_id` with a countdown in minutes.
pub fn definition(map_id: MapId, countdown: u32, answers: Vec<Answer>) -> GameDefinition {
    GameDefinition {
        id: "test-game".to_string(),
        name: "Test".to_string(),
        description: String::new(),
        thumbnail_image: None,
        score_per_question: 10,
        map_id,
        countdown,
        questions: vec![Question {
            question_text: "What is the capital of France?".to_string(),
            question_index: 0,
            answers,
        }],
        is_published: true,
    }
}

pub fn capitals() -> Vec<Answer> {
    vec![answer("Paris", 0), answer("Amsterdam", 1), answer("Berlin", 2)]
}

pub fn seeded_options(seed: u64) -> GameOptions {
    GameOptions {
        seed: Some(seed),
        ..GameOptions::default()
    }
}

pub fn create_game(countdown: u32) -> Game {
    Game::new(&definition(MapId::One, countdown, capitals()), seeded_options(42)).expect("map one is valid")
}

/// A single walkable row, three tiles long, with the player spawn on its left end.
pub fn corridor() -> Grid {
    Grid::from_rows(&[[1u8, 1, 1, 1, 1], [1, 0, 0, 0, 1], [1, 1, 1, 1, 1]]).expect("corridor is rectangular")
}

/// Starts the session and ticks through the launch sequence.
///
/// The last tick enters the maze. That frame's time belongs to the launch sequence, so the
/// player is still on its spawn tile and the countdown is untouched afterwards.
pub fn advance_to_maze(game: &mut Game) {
    game.start();
    for dt in [0.1, 0.2, 1.0, 0.15] {
        game.tick(dt);
    }
    assert_eq!(game.stage(), GameStage::Maze);
}

/// Labels of the answer badges in the scene, in draw order.
///
/// A badge is an outline in the badge border colour followed directly by its label.
pub fn badge_labels(list: &RenderList) -> Vec<&str> {
    list.commands
        .windows(2)
        .filter_map(|pair| match pair {
            [DrawCommand::StrokeRect { color, .. }, DrawCommand::Text { text, .. }] if *color == palette::BADGE_BORDER => {
                Some(text.as_str())
            }
            _ => None,
        })
        .collect()
}

pub fn count<F: bevy_ecs::query::QueryFilter>(world: &mut World) -> usize {
    world.query_filtered::<Entity, F>().iter(world).count()
}

pub fn player_position(world: &mut World) -> Option<(TilePosition, Motion)> {
    world
        .query_filtered::<(&TilePosition, &Motion), With<Player>>()
        .iter(world)
        .next()
        .map(|(position, motion)| (*position, *motion))
}

/// A bare world with every engine resource and event registered, on map one.
pub fn create_test_world() -> World {
    let mut world = World::default();

    EventRegistry::register_event::<GameError>(&mut world);
    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<PlayerArrived>(&mut world);
    EventRegistry::register_event::<AnswerSelected>(&mut world);
    EventRegistry::register_event::<StageTransition>(&mut world);

    world.insert_resource(Grid::for_map(MapId::One));
    world.insert_resource(DeltaTime(0.0));
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(Bindings::default());
    world.insert_resource(GameRng::seeded(7));
    world.insert_resource(Countdown::from_seconds(120));
    world.insert_resource(MazeSettings::default());
    world.insert_resource(QuestionBoard {
        question_text: Some("What is the capital of France?".to_string()),
        answers: capitals(),
    });
    world.init_resource::<InputDirections>();
    world.init_resource::<GameStage>();
    world.init_resource::<PauseState>();
    world.init_resource::<AnswerHandler>();
    world.init_resource::<RenderList>();

    world
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.send_event(event);
}

pub fn spawn_test_player(world: &mut World, tile: IVec2) -> Entity {
    world.spawn(PlayerBundle::new(tile)).id()
}

pub fn spawn_test_npc(world: &mut World, tile: IVec2) -> Entity {
    world.spawn(NpcBundle::new(tile)).id()
}
