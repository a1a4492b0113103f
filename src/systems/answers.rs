use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Commands, Query, ResMut},
};
use glam::IVec2;
use rand::Rng;
use tracing::{debug, info};

use crate::api::{Answer, GameDefinition};
use crate::events::{AnswerSelected, PlayerArrived};
use crate::systems::components::AnswerTile;
use crate::systems::spawn::take_random_tiles;

/// The question currently being played and its answer options.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBoard {
    pub question_text: Option<String>,
    pub answers: Vec<Answer>,
}

impl QuestionBoard {
    /// The board for question `index` of a definition; empty when out of range.
    pub fn from_definition(definition: &GameDefinition, index: usize) -> Self {
        definition
            .questions
            .get(index)
            .map(|question| Self {
                question_text: Some(question.question_text.clone()),
                answers: question.answers.clone(),
            })
            .unwrap_or_default()
    }
}

/// Assigns each answer a distinct tile drawn from `pool`.
///
/// Tiles are removed from the pool as they are used, so the caller controls exclusion by
/// leaving occupied tiles out of it. Answers beyond the pool's capacity are not placed.
pub fn place_answer_tiles<R: Rng + ?Sized>(answers: &[Answer], pool: &mut Vec<IVec2>, rng: &mut R) -> Vec<AnswerTile> {
    let tiles = take_random_tiles(pool, answers.len(), rng);
    answers
        .iter()
        .zip(tiles)
        .map(|(answer, tile)| AnswerTile {
            answer_text: answer.answer_text.clone(),
            answer_index: answer.answer_index,
            tile,
        })
        .collect()
}

/// Consumer callback invoked with the index of each selected answer.
#[derive(Resource, Default)]
pub struct AnswerHandler(pub Option<Box<dyn FnMut(u32) + Send + Sync>>);

/// Consumes the answer tile under the player when they arrive on one.
///
/// The tile is despawned in the same frame, so it can never be selected twice. If tiles
/// somehow overlap, only the first in query order is taken.
pub fn answer_collision_system(
    mut commands: Commands,
    mut arrivals: EventReader<PlayerArrived>,
    tiles: Query<(Entity, &AnswerTile)>,
    mut selections: EventWriter<AnswerSelected>,
) {
    for arrival in arrivals.read() {
        let hit = tiles.iter().find(|(_, answer)| answer.tile == arrival.tile);
        if let Some((entity, answer)) = hit {
            debug!(answer_index = answer.answer_index, tile = ?answer.tile, "Player picked up answer tile");
            commands.entity(entity).despawn();
            selections.write(AnswerSelected {
                answer_index: answer.answer_index,
            });
        }
    }
}

/// Forwards selections to the consumer callback.
pub fn answer_dispatch_system(mut selections: EventReader<AnswerSelected>, mut handler: ResMut<AnswerHandler>) {
    for selection in selections.read() {
        info!(answer_index = selection.answer_index, "Answer selected");
        if let Some(callback) = handler.0.as_mut() {
            callback(selection.answer_index);
        }
    }
}
