use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::map::direction::Direction;
use crate::systems::state::GameStage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    /// A movement key was pressed.
    MovePlayer(Direction),
    /// The on-screen directional control changed. `None` releases it.
    Control(Option<Direction>),
    Start,
    Pause,
    Resume,
    TogglePause,
    /// Closes the pause dialog without choosing an action; resumes play.
    DismissPauseDialog,
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// The player finished a step and now occupies `tile`.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerArrived {
    pub tile: IVec2,
}

/// The player reached an answer tile.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerSelected {
    pub answer_index: u32,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct StageTransition {
    pub from: GameStage,
    pub to: GameStage,
}
