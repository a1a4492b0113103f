use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::stage::{MAZE_DELAY, ZOOM_DELAY};
use crate::events::{GameCommand, GameEvent, StageTransition};
use crate::systems::components::{DeltaTime, GlobalState};
use crate::systems::input::InputDirections;

/// A resource to track the overall stage of the session from a high-level perspective.
///
/// The launch delays live inside the stage value itself, so replacing the stage (e.g. on
/// restart) cancels any transition that was still pending.
#[derive(Resource, Debug, PartialEq, Clone, Copy, Default)]
pub enum GameStage {
    /// Entry screen, waiting for the player to press start.
    #[default]
    Start,
    /// Start was pressed; the start button is hidden and the zoom is about to begin.
    Launching {
        /// Seconds since the start action.
        elapsed: f32,
    },
    /// The zoom transition is playing.
    Zoom {
        /// Seconds since the start action.
        elapsed: f32,
    },
    /// The maze is live.
    Maze,
    /// The time budget ran out.
    GameOver,
}

impl GameStage {
    /// Advances the launch timers. Returns `(from, to)` when the stage changes.
    ///
    /// Both delays are measured from the start action, so a long frame can pass through
    /// the zoom and land in the maze at once.
    pub fn tick(&mut self, dt: f32) -> Option<(GameStage, GameStage)> {
        let from = *self;
        let elapsed = match from {
            GameStage::Launching { elapsed } | GameStage::Zoom { elapsed } => elapsed + dt,
            GameStage::Start | GameStage::Maze | GameStage::GameOver => return None,
        };
        let next = if elapsed >= MAZE_DELAY {
            GameStage::Maze
        } else if elapsed >= ZOOM_DELAY {
            GameStage::Zoom { elapsed }
        } else {
            GameStage::Launching { elapsed }
        };

        *self = next;
        (std::mem::discriminant(&from) != std::mem::discriminant(&next)).then_some((from, next))
    }

    pub fn is_maze(&self) -> bool {
        matches!(self, GameStage::Maze)
    }
}

/// Whether play is suspended. The pause dialog is shown exactly while paused.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }
}

/// The session's time budget, in whole seconds.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    initial: Option<u32>,
    remaining: Option<u32>,
    /// Fraction of the current second already elapsed.
    accumulator: f32,
}

impl Countdown {
    /// A countdown starting at `seconds`. Zero means the definition has no time budget.
    pub fn from_seconds(seconds: u32) -> Self {
        let initial = (seconds > 0).then_some(seconds);
        Self {
            initial,
            remaining: initial,
            accumulator: 0.0,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.accumulator = 0.0;
    }

    /// Drops the partially elapsed second, like an interval timer being restarted.
    pub fn discard_partial(&mut self) {
        self.accumulator = 0.0;
    }

    /// Counts down by one for every full second accumulated.
    ///
    /// Returns `true` on the tick the countdown reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        if remaining == 0 {
            return false;
        }

        self.accumulator += dt;
        let mut remaining = remaining;
        while self.accumulator >= 1.0 && remaining > 0 {
            self.accumulator -= 1.0;
            remaining -= 1;
        }
        self.remaining = Some(remaining);
        remaining == 0
    }
}

fn change_stage(stage: &mut GameStage, to: GameStage, transitions: &mut EventWriter<StageTransition>) {
    let from = *stage;
    if from == to {
        return;
    }
    debug!(?from, ?to, "Stage transition");
    *stage = to;
    transitions.write(StageTransition { from, to });
}

/// Handles the session-level commands: start, pause/resume, restart and exit.
#[allow(clippy::too_many_arguments)]
pub fn session_command_system(
    mut events: EventReader<GameEvent>,
    mut stage: ResMut<GameStage>,
    mut pause: ResMut<PauseState>,
    mut countdown: ResMut<Countdown>,
    mut input: ResMut<InputDirections>,
    mut state: ResMut<GlobalState>,
    mut transitions: EventWriter<StageTransition>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::Start => match *stage {
                GameStage::Start | GameStage::GameOver => {
                    info!("Starting session");
                    countdown.reset();
                    change_stage(&mut stage, GameStage::Launching { elapsed: 0.0 }, &mut transitions);
                }
                _ => debug!(stage = ?*stage, "Start ignored, session already running"),
            },
            GameCommand::Pause => {
                if stage.is_maze() && !pause.active() {
                    info!("Game paused");
                    countdown.discard_partial();
                    *pause = PauseState::Active;
                }
            }
            GameCommand::Resume | GameCommand::DismissPauseDialog => {
                if pause.active() {
                    info!("Game resumed");
                    *pause = PauseState::Inactive;
                }
            }
            GameCommand::TogglePause => {
                if pause.active() {
                    info!("Game resumed");
                    *pause = PauseState::Inactive;
                } else if stage.is_maze() {
                    info!("Game paused");
                    countdown.discard_partial();
                    *pause = PauseState::Active;
                }
            }
            GameCommand::Restart => {
                info!("Restarting session");
                *pause = PauseState::Inactive;
                countdown.reset();
                input.clear();
                change_stage(&mut stage, GameStage::Start, &mut transitions);
            }
            GameCommand::Exit => {
                state.exit = true;
            }
            GameCommand::MovePlayer(_) | GameCommand::Control(_) => {}
        }
    }
}

/// Advances the launch sequence towards the maze.
///
/// The frame that enters the maze has its delta zeroed: that time was spent in the launch
/// sequence, so neither movement nor the countdown may consume it.
pub fn stage_system(
    mut delta_time: ResMut<DeltaTime>,
    mut stage: ResMut<GameStage>,
    mut transitions: EventWriter<StageTransition>,
) {
    if let Some((from, to)) = stage.tick(delta_time.0) {
        debug!(?from, ?to, "Stage transition");
        if to.is_maze() {
            delta_time.0 = 0.0;
        }
        transitions.write(StageTransition { from, to });
    }
}

/// Runs the countdown while the maze is live and unpaused; ends the session at zero.
pub fn countdown_system(
    delta_time: Res<DeltaTime>,
    pause: Res<PauseState>,
    mut stage: ResMut<GameStage>,
    mut countdown: ResMut<Countdown>,
    mut transitions: EventWriter<StageTransition>,
) {
    if !stage.is_maze() || pause.active() {
        return;
    }

    if countdown.tick(delta_time.0) {
        info!("Time is up");
        change_stage(&mut stage, GameStage::GameOver, &mut transitions);
    }
}
