//! Desktop host: an SDL2 window that drives a [`Game`] and paints its scene.

use std::time::{Duration, Instant};

use glam::Vec2;
use sdl2::event::{Event, WindowEvent};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info, trace, warn};

use crate::constants::LOOP_TIME;
use crate::error::{GameError, GameResult};
use crate::game::Game;
use crate::systems::input::Key;
use crate::systems::render::{Rect, Rgba, Surface};

/// Width of a glyph in the built-in gfx font.
const GLYPH_SIZE: i16 = 8;

fn color([r, g, b, a]: Rgba) -> Color {
    Color::RGBA(r, g, b, a)
}

/// Maps SDL key codes onto engine keys.
fn translate_key(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::Up => Key::ArrowUp,
        Keycode::Down => Key::ArrowDown,
        Keycode::Left => Key::ArrowLeft,
        Keycode::Right => Key::ArrowRight,
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::P => Key::P,
        Keycode::R => Key::R,
        Keycode::Q => Key::Q,
        Keycode::Escape => Key::Escape,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Space => Key::Space,
        _ => return None,
    };
    Some(key)
}

impl Surface for Canvas<Window> {
    type Error = GameError;

    fn clear(&mut self, rgba: Rgba) -> GameResult<()> {
        self.set_draw_color(color(rgba));
        Canvas::clear(self);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, rgba: Rgba) -> GameResult<()> {
        let end = rect.origin + rect.size - Vec2::ONE;
        self.box_(
            rect.origin.x as i16,
            rect.origin.y as i16,
            end.x as i16,
            end.y as i16,
            color(rgba),
        )
        .map_err(GameError::Sdl)
    }

    fn stroke_rect(&mut self, rect: Rect, rgba: Rgba) -> GameResult<()> {
        let end = rect.origin + rect.size - Vec2::ONE;
        self.rectangle(
            rect.origin.x as i16,
            rect.origin.y as i16,
            end.x as i16,
            end.y as i16,
            color(rgba),
        )
        .map_err(GameError::Sdl)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, rgba: Rgba) -> GameResult<()> {
        self.filled_circle(center.x as i16, center.y as i16, radius.round() as i16, color(rgba))
            .map_err(GameError::Sdl)
    }

    fn text(&mut self, center: Vec2, text: &str, rgba: Rgba) -> GameResult<()> {
        let width = text.chars().count() as i16 * GLYPH_SIZE;
        let x = center.x as i16 - width / 2;
        let y = center.y as i16 - GLYPH_SIZE / 2;
        self.string(x, y, text, color(rgba)).map_err(GameError::Sdl)
    }
}

/// Main application wrapper that owns the window and runs the frame loop.
pub struct App {
    pub game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    last_tick: Instant,
    focused: bool,
    // Dropping the context shuts down every subsystem
    _sdl_context: Sdl,
}

impl App {
    /// Opens a window sized for the game's canvas, scaled by `scale`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails.
    pub fn new(game: Game, scale: f32) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        let size = game.render_list().size;
        let (width, height) = (
            (size.x as f32 * scale).round() as u32,
            (size.y as f32 * scale).round() as u32,
        );
        trace!(width, height, scale, "Creating game window");
        let window = video_subsystem
            .window("Maze Chase", width, height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(size.x, size.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas.set_blend_mode(BlendMode::Blend);
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        Ok(App {
            game,
            canvas,
            event_pump,
            last_tick: Instant::now(),
            focused: true,
            _sdl_context: sdl_context,
        })
    }

    /// Runs one frame: input, tick, present, then sleep off the rest of the frame.
    ///
    /// Returns `false` once the game or the window asks to exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => {
                    info!("Exit requested");
                    return false;
                }
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = translate_key(keycode) {
                        self.game.key_event(key);
                    }
                }
                _ => {}
            }
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        if self.game.tick(dt) {
            info!("Exit requested");
            return false;
        }

        if let Err(e) = self.game.render_list().present(&mut self.canvas) {
            warn!(error = %e, "Failed to draw frame");
        }
        self.canvas.present();

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                if self.focused {
                    spin_sleep::sleep(time);
                } else {
                    // Plain sleep is enough in the background
                    std::thread::sleep(time);
                }
            }
        }

        true
    }
}
