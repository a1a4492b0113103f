//! Per-frame scene building.
//!
//! The engine does not own a window. Every frame it rebuilds a [`RenderList`] of simple
//! primitives, and the host presents that list onto whatever [`Surface`] it has.

use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::{UVec2, Vec2};

use crate::constants::{
    stage::{MAZE_DELAY, ZOOM_DELAY},
    ui, TILE_SIZE,
};
use crate::map::grid::Grid;
use crate::systems::answers::QuestionBoard;
use crate::systems::components::{AnswerTile, Npc, Player};
use crate::systems::formatting::{format_countdown, truncate_label};
use crate::systems::movement::{render_center, Motion, TilePosition};
use crate::systems::state::{Countdown, GameStage, PauseState};

/// RGBA colour.
pub type Rgba = [u8; 4];

pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [20, 28, 20, 255];
    pub const BADGE_FILL: Rgba = [255, 215, 0, 204];
    pub const BADGE_BORDER: Rgba = [139, 69, 19, 230];
    pub const BADGE_TEXT: Rgba = [0, 0, 0, 255];
    pub const NPC: Rgba = [255, 0, 0, 230];
    pub const PLAYER: Rgba = [0, 160, 255, 242];
    pub const HUD_TEXT: Rgba = [255, 255, 255, 255];
    pub const HUD_PANEL: Rgba = [0, 0, 0, 153];
    pub const HEART: Rgba = [220, 40, 60, 255];
    pub const OVERLAY: Rgba = [0, 0, 0, 178];
    pub const ZOOM: Rgba = [60, 110, 60, 255];
}

/// Height of the HUD band above the board, in pixels.
pub const HUD_TOP: f32 = 48.0;
/// Height of the HUD band below the board, in pixels.
pub const HUD_BOTTOM: f32 = 32.0;

/// An axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// A square of side `size` centred on `center`.
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self {
            origin: center - Vec2::splat(size / 2.0),
            size: Vec2::splat(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect { rect: Rect, color: Rgba },
    StrokeRect { rect: Rect, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    /// Text centred on `center`.
    Text { center: Vec2, text: String, color: Rgba },
}

/// Anything the host can paint primitives onto.
pub trait Surface {
    type Error;

    fn clear(&mut self, color: Rgba) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), Self::Error>;
    fn stroke_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), Self::Error>;
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), Self::Error>;
    fn text(&mut self, center: Vec2, text: &str, color: Rgba) -> Result<(), Self::Error>;
}

/// The scene for the current frame.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RenderList {
    /// Canvas size in pixels.
    pub size: UVec2,
    pub commands: Vec<DrawCommand>,
}

impl RenderList {
    /// Canvas size needed to show `grid` with the HUD bands.
    pub fn canvas_size(grid: &Grid) -> UVec2 {
        UVec2::new(
            grid.width() as u32 * TILE_SIZE,
            grid.height() as u32 * TILE_SIZE + (HUD_TOP + HUD_BOTTOM) as u32,
        )
    }

    /// Paints every command, in order, onto `surface`.
    pub fn present<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => surface.clear(*color)?,
                DrawCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color)?,
                DrawCommand::StrokeRect { rect, color } => surface.stroke_rect(*rect, *color)?,
                DrawCommand::FillCircle { center, radius, color } => surface.fill_circle(*center, *radius, *color)?,
                DrawCommand::Text { center, text, color } => surface.text(*center, text, *color)?,
            }
        }
        Ok(())
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

const BOARD_OFFSET: Vec2 = Vec2::new(0.0, HUD_TOP);

fn draw_board(list: &mut RenderList, grid: &Grid) {
    let palette = grid.palette();
    let tile = TILE_SIZE as f32;
    for (position, walkable) in grid.iter_cells() {
        let origin = BOARD_OFFSET + position.as_vec2() * tile;
        list.push(DrawCommand::FillRect {
            rect: Rect::new(origin, Vec2::splat(tile)),
            color: if walkable { palette.floor } else { palette.wall },
        });
    }
}

fn draw_answer_tile(list: &mut RenderList, answer: &AnswerTile) {
    let tile = TILE_SIZE as f32;
    let center = BOARD_OFFSET + (answer.tile.as_vec2() + Vec2::splat(0.5)) * tile;
    let rect = Rect::centered(center, tile * ui::BADGE_SCALE);

    list.push(DrawCommand::FillRect {
        rect,
        color: palette::BADGE_FILL,
    });
    list.push(DrawCommand::StrokeRect {
        rect,
        color: palette::BADGE_BORDER,
    });
    list.push(DrawCommand::Text {
        center,
        text: truncate_label(&answer.answer_text),
        color: palette::BADGE_TEXT,
    });
}

fn draw_marker(list: &mut RenderList, position: &TilePosition, motion: &Motion, color: Rgba) {
    list.push(DrawCommand::FillCircle {
        center: BOARD_OFFSET + render_center(position, motion),
        radius: TILE_SIZE as f32 * ui::MARKER_SCALE / 2.0,
        color,
    });
}

fn draw_hud(list: &mut RenderList, countdown: &Countdown, board: &QuestionBoard) {
    let width = list.size.x as f32;
    let height = list.size.y as f32;

    list.push(DrawCommand::Text {
        center: Vec2::new(28.0, 12.0),
        text: format_countdown(countdown.remaining()),
        color: palette::HUD_TEXT,
    });

    let question = board.question_text.as_deref().unwrap_or(ui::LOADING_QUESTION);
    list.push(DrawCommand::FillRect {
        rect: Rect::new(Vec2::new(0.0, 24.0), Vec2::new(width, 22.0)),
        color: palette::HUD_PANEL,
    });
    list.push(DrawCommand::Text {
        center: Vec2::new(width / 2.0, 35.0),
        text: question.to_string(),
        color: palette::HUD_TEXT,
    });

    for i in 0..ui::HEART_COUNT {
        let x = width - 12.0 - f32::from(i) * 20.0;
        list.push(DrawCommand::FillCircle {
            center: Vec2::new(x, height - HUD_BOTTOM / 2.0),
            radius: 7.0,
            color: palette::HEART,
        });
    }
}

fn draw_overlay(list: &mut RenderList, lines: &[&str]) {
    let size = list.size.as_vec2();
    list.push(DrawCommand::FillRect {
        rect: Rect::new(Vec2::ZERO, size),
        color: palette::OVERLAY,
    });
    let top = size.y / 2.0 - (lines.len() as f32 - 1.0) * 8.0;
    for (i, line) in lines.iter().enumerate() {
        list.push(DrawCommand::Text {
            center: Vec2::new(size.x / 2.0, top + i as f32 * 16.0),
            text: (*line).to_string(),
            color: palette::HUD_TEXT,
        });
    }
}

/// Rebuilds the whole scene. Runs every frame, including while paused, so a paused scene
/// stays on screen unchanged.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    grid: Res<Grid>,
    stage: Res<GameStage>,
    pause: Res<PauseState>,
    countdown: Res<Countdown>,
    board: Res<QuestionBoard>,
    answers: Query<&AnswerTile>,
    npcs: Query<(&TilePosition, &Motion), With<Npc>>,
    players: Query<(&TilePosition, &Motion), With<Player>>,
    mut list: ResMut<RenderList>,
) {
    list.commands.clear();
    list.size = RenderList::canvas_size(&grid);
    list.push(DrawCommand::Clear(palette::BACKGROUND));

    match *stage {
        GameStage::Start => {
            draw_overlay(&mut list, &["MAZE CHASE", "Press ENTER to start"]);
        }
        GameStage::Launching { .. } => {
            draw_overlay(&mut list, &["MAZE CHASE"]);
        }
        GameStage::Zoom { elapsed } => {
            // Scale from 1.0 to 1.8 across the zoom window
            let t = ((elapsed - ZOOM_DELAY) / (MAZE_DELAY - ZOOM_DELAY)).clamp(0.0, 1.0);
            let scale = 1.0 + 0.8 * t;
            let size = list.size.as_vec2();
            let zoomed = size * scale;
            list.push(DrawCommand::FillRect {
                rect: Rect::new((size - zoomed) / 2.0, zoomed),
                color: palette::ZOOM,
            });
        }
        GameStage::Maze => {
            draw_board(&mut list, &grid);
            for answer in answers.iter() {
                draw_answer_tile(&mut list, answer);
            }
            for (position, motion) in npcs.iter() {
                draw_marker(&mut list, position, motion, palette::NPC);
            }
            for (position, motion) in players.iter() {
                draw_marker(&mut list, position, motion, palette::PLAYER);
            }
            draw_hud(&mut list, &countdown, &board);

            if pause.active() {
                draw_overlay(&mut list, &["PAUSED", "P: resume", "R: restart", "Q: quit"]);
            }
        }
        GameStage::GameOver => {
            draw_board(&mut list, &grid);
            draw_hud(&mut list, &countdown, &board);
            draw_overlay(&mut list, &["TIME'S UP", "Press ENTER to play again"]);
        }
    }
}
