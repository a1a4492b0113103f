use std::collections::HashMap;

use bevy_ecs::{
    event::EventReader,
    resource::Resource,
    system::ResMut,
};
use strum_macros::{AsRefStr, EnumString};

use crate::events::{GameCommand, GameEvent};
use crate::map::direction::Direction;

/// Platform-neutral keys the engine understands. Hosts translate their native key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    #[strum(serialize = "w", serialize = "W")]
    W,
    #[strum(serialize = "a", serialize = "A")]
    A,
    #[strum(serialize = "s", serialize = "S")]
    S,
    #[strum(serialize = "d", serialize = "D")]
    D,
    #[strum(serialize = "p", serialize = "P")]
    P,
    #[strum(serialize = "r", serialize = "R")]
    R,
    #[strum(serialize = "q", serialize = "Q")]
    Q,
    Escape,
    Enter,
    #[strum(serialize = " ", serialize = "Space")]
    Space,
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(Key::ArrowUp, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Key::W, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Key::ArrowDown, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Key::S, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Key::ArrowLeft, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Key::A, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Key::ArrowRight, GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert(Key::D, GameCommand::MovePlayer(Direction::Right));

        // Session actions
        key_bindings.insert(Key::Enter, GameCommand::Start);
        key_bindings.insert(Key::Space, GameCommand::Start);
        key_bindings.insert(Key::P, GameCommand::TogglePause);
        key_bindings.insert(Key::Escape, GameCommand::TogglePause);
        key_bindings.insert(Key::R, GameCommand::Restart);
        key_bindings.insert(Key::Q, GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    /// The command bound to a key, if any.
    pub fn command_for(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    /// Looks up a key by its name (`"ArrowUp"`, `"w"`, ...).
    pub fn command_for_name(&self, name: &str) -> Option<GameCommand> {
        name.parse::<Key>().ok().and_then(|key| self.command_for(key))
    }
}

/// The two independent direction sources feeding the player.
///
/// Only the latest request per source is kept; nothing is queued.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputDirections {
    /// Last movement key pressed.
    pub keyboard: Option<Direction>,
    /// Last on-screen control signal. Takes priority over the keyboard.
    pub external: Option<Direction>,
}

impl InputDirections {
    /// `external ?? keyboard ?? current`.
    pub fn resolve(&self, current: Direction) -> Direction {
        self.external.or(self.keyboard).unwrap_or(current)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Records movement commands into the direction sources.
pub fn direction_input_system(mut events: EventReader<GameEvent>, mut directions: ResMut<InputDirections>) {
    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::MovePlayer(direction)) => {
                directions.keyboard = Some(*direction);
            }
            GameEvent::Command(GameCommand::Control(direction)) => {
                directions.external = *direction;
            }
            _ => {}
        }
    }
}
