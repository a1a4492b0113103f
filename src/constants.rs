//! This module contains all the constants used in the game.

use std::time::Duration;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 24;

/// Movement tuning, in tiles per second.
pub mod mechanics {
    use glam::IVec2;

    /// The player's fixed speed.
    pub const PLAYER_SPEED: f32 = 5.0;
    /// NPC speed while wandering.
    pub const NPC_WANDER_SPEED: f32 = 1.0;
    /// NPC speed while chasing the player.
    pub const NPC_CHASE_SPEED: f32 = 2.0;
    /// Manhattan distance (inclusive) at which an NPC starts chasing.
    pub const CHASE_DISTANCE: i32 = 5;
    /// Random direction samples an NPC gets per tick while wandering.
    pub const WANDER_ATTEMPTS: u32 = 8;
    /// Maximum number of NPCs spawned into the maze.
    pub const MAX_NPCS: usize = 4;
    /// The tile the player is spawned on.
    pub const PLAYER_SPAWN: IVec2 = IVec2::new(1, 1);
}

/// Walk-cycle animation timing.
pub mod animation {
    /// Seconds each walk-cycle frame is shown.
    pub const FRAME_DURATION: f32 = 0.15;
    /// Number of frames in the walk cycle.
    pub const FRAME_COUNT: u8 = 2;
}

/// Stage sequencing delays, measured from the start action.
pub mod stage {
    /// When the zoom transition begins.
    pub const ZOOM_DELAY: f32 = 0.2;
    /// When the maze appears.
    pub const MAZE_DELAY: f32 = 1.4;
}

pub mod ui {
    /// Labels longer than this are elided.
    pub const LABEL_MAX_CHARS: usize = 8;
    /// Answer badge size as a fraction of a tile.
    pub const BADGE_SCALE: f32 = 0.9;
    /// Player/NPC marker diameter as a fraction of a tile.
    pub const MARKER_SCALE: f32 = 0.8;
    /// Hearts shown in the HUD.
    pub const HEART_COUNT: u8 = 3;
    /// Shown in place of the question when the definition has none.
    pub const LOADING_QUESTION: &str = "Loading question...";
}
