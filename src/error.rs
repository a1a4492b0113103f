//! Centralized error types for the maze chase engine.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the maze chase engine.
///
/// This is the primary error type that should be used in public APIs.
/// It is also an ECS event, so systems can report inconsistent state without panicking.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors related to grid construction.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Grid has no cells")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    NotRectangular { row: usize, expected: usize, found: usize },
}

/// Errors raised while obtaining a game definition.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Server reported failure: {0}")]
    Rejected(String),

    #[error("Malformed game definition: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Could not read definition file: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Either MAZE_CHASE_GAME_ID or MAZE_CHASE_DEFINITION_PATH must be set")]
    MissingSource,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
