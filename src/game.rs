//! The engine entry point: an ECS world plus the per-frame schedule.

use bevy_ecs::event::{event_update_system, EventReader, EventRegistry};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use tracing::{debug, info, warn};

use crate::api::GameDefinition;
use crate::constants::mechanics;
use crate::error::{GameError, GameResult};
use crate::events::{AnswerSelected, GameCommand, GameEvent, PlayerArrived, StageTransition};
use crate::formatter;
use crate::map::grid::Grid;
use crate::map::layout::MapId;
use crate::systems::animation::frame_animation_system;
use crate::systems::answers::{answer_collision_system, answer_dispatch_system, AnswerHandler, QuestionBoard};
use crate::systems::components::{DeltaTime, GameRng, GlobalState};
use crate::systems::input::{direction_input_system, Bindings, InputDirections, Key};
use crate::systems::movement::{npc_movement_system, player_movement_system};
use crate::systems::npc::npc_behavior_system;
use crate::systems::render::{render_system, RenderList};
use crate::systems::spawn::{maze_lifecycle_system, MazeSettings};
use crate::systems::state::{countdown_system, session_command_system, stage_system, Countdown, GameStage, PauseState};

/// Ordering of the per-frame systems.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum FrameSet {
    /// Commands, stage control and maze spawning
    Input,
    /// Movement, collisions and NPC decisions; only while the maze is live and unpaused
    Update,
    /// Countdown and answer callbacks
    Respond,
    /// Scene rebuild; always runs
    Render,
}

/// Session tuning that does not come from the game definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Replaces the definition's map.
    pub map_override: Option<MapId>,
    pub npc_count: usize,
    /// Seed for spawn placement and wandering. Drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            map_override: None,
            npc_count: mechanics::MAX_NPCS,
            seed: None,
        }
    }
}

/// A single maze-chase session.
///
/// Owns every piece of session state. Hosts feed it commands and a frame delta, and read
/// the scene back out of [`Game::render_list`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a session on the definition's map, or the override in `options`.
    pub fn new(definition: &GameDefinition, options: GameOptions) -> GameResult<Game> {
        let map_id = options.map_override.unwrap_or(definition.map_id);
        Self::with_grid(definition, Grid::for_map(map_id), options)
    }

    /// Builds a session on an arbitrary grid.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidState` when the player spawn tile is not walkable.
    pub fn with_grid(definition: &GameDefinition, grid: Grid, options: GameOptions) -> GameResult<Game> {
        let settings = MazeSettings {
            npc_count: options.npc_count.min(mechanics::MAX_NPCS),
            ..MazeSettings::default()
        };
        if !grid.is_walkable(settings.player_spawn) {
            return Err(GameError::InvalidState(format!(
                "player spawn {} is not walkable on this grid",
                settings.player_spawn
            )));
        }

        info!(
            id = %definition.id,
            width = grid.width(),
            height = grid.height(),
            npcs = settings.npc_count,
            countdown = definition.countdown_seconds(),
            "Creating game session"
        );

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<PlayerArrived>(&mut world);
        EventRegistry::register_event::<AnswerSelected>(&mut world);
        EventRegistry::register_event::<StageTransition>(&mut world);

        let rng = match options.seed {
            Some(seed) => {
                debug!(seed, "Using fixed RNG seed");
                GameRng::seeded(seed)
            }
            None => GameRng::from_os(),
        };

        world.insert_resource(RenderList {
            size: RenderList::canvas_size(&grid),
            commands: Vec::new(),
        });
        world.insert_resource(grid);
        world.insert_resource(settings);
        world.insert_resource(rng);
        world.insert_resource(QuestionBoard::from_definition(definition, 0));
        world.insert_resource(Countdown::from_seconds(definition.countdown_seconds()));
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(Bindings::default());
        world.insert_resource(DeltaTime(0.0));
        world.init_resource::<InputDirections>();
        world.init_resource::<GameStage>();
        world.init_resource::<PauseState>();
        world.init_resource::<AnswerHandler>();

        Self::configure_schedule(&mut schedule);

        Ok(Game { world, schedule })
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (
                    direction_input_system,
                    session_command_system,
                    stage_system,
                    maze_lifecycle_system,
                )
                    .chain()
                    .in_set(FrameSet::Input),
                (
                    player_movement_system,
                    answer_collision_system,
                    npc_behavior_system,
                    npc_movement_system,
                    frame_animation_system,
                )
                    .chain()
                    .in_set(FrameSet::Update),
                (countdown_system, answer_dispatch_system, error_report_system)
                    .chain()
                    .in_set(FrameSet::Respond),
                render_system.in_set(FrameSet::Render),
                event_update_system.after(FrameSet::Render),
            ))
            .configure_sets(
                (
                    FrameSet::Input,
                    FrameSet::Update
                        .run_if(|stage: Res<GameStage>, pause: Res<PauseState>| stage.is_maze() && !pause.active()),
                    FrameSet::Respond,
                    FrameSet::Render,
                )
                    .chain(),
            );
    }

    /// Advances the session by `dt` seconds.
    ///
    /// Returns true if the host should exit.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime(dt));

        let start = std::time::Instant::now();
        self.schedule.run(&mut self.world);
        let elapsed = start.elapsed();
        formatter::increment_frame();

        // Flag frames that took longer than the delta they were meant to cover
        let budget_ms = (dt * 1000.0 * 1.2) as u128;
        if budget_ms > 0 && elapsed.as_millis() > budget_ms {
            warn!(elapsed = ?elapsed, budget_ms, "Slow frame");
        }

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    /// Queues a command for the next tick.
    pub fn send(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::Command(command));
    }

    /// Translates a key press through the bindings. Returns whether the key was bound.
    pub fn key_event(&mut self, key: Key) -> bool {
        let command = self.world.resource::<Bindings>().command_for(key);
        match command {
            Some(command) => {
                self.send(command);
                true
            }
            None => false,
        }
    }

    pub fn start(&mut self) {
        self.send(GameCommand::Start);
    }

    pub fn pause(&mut self) {
        self.send(GameCommand::Pause);
    }

    pub fn resume(&mut self) {
        self.send(GameCommand::Resume);
    }

    pub fn restart(&mut self) {
        self.send(GameCommand::Restart);
    }

    /// Registers the callback fired with the index of each answer the player reaches.
    pub fn set_answer_handler(&mut self, handler: impl FnMut(u32) + Send + Sync + 'static) {
        self.world.insert_resource(AnswerHandler(Some(Box::new(handler))));
    }

    /// The scene built during the last tick.
    pub fn render_list(&self) -> &RenderList {
        self.world.resource::<RenderList>()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    /// Seconds left, or `None` when the definition has no time budget.
    pub fn countdown(&self) -> Option<u32> {
        self.world.resource::<Countdown>().remaining()
    }

    pub fn is_paused(&self) -> bool {
        self.world.resource::<PauseState>().active()
    }
}

/// Logs errors reported by systems. None of them are fatal to the session.
fn error_report_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        warn!(%error, "Game error");
    }
}
