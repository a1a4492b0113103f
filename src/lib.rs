//! Maze chase: a real-time tile engine where the player walks a maze to pick answer tiles
//! while NPCs wander and give chase.

pub mod api;
#[cfg(feature = "sdl")]
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod systems;
