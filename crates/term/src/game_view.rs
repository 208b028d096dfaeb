//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::time::Duration;

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, Shape, EMPTY, FLOOR, WALL};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Host-side values shown next to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    /// Play time, excluding paused time
    pub elapsed: Duration,
}

const FIELD_BG: Rgb = Rgb::new(240, 240, 240);
const BORDER: Rgb = Rgb::new(20, 20, 20);
const GRID_DOT: Rgb = Rgb::new(200, 200, 200);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Renders snapshots with each field cell `cell_w` columns wide.
pub struct GameView {
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keep blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Widest supported cell, keeps the field within `u16` columns
    pub const MAX_CELL_W: u16 = 4;

    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, Self::MAX_CELL_W),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::new(' ', Style::new(Rgb::default(), PANEL_BG)));

        let field = &snap.field;
        let field_w = field.width() as u16 * self.cell_w;
        let field_h = field.height() as u16;

        let start_x = viewport.width.saturating_sub(field_w + 16) / 2;
        let start_y = viewport.height.saturating_sub(field_h) / 2;

        for (row, cells) in field.rows().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                let glyph = field_glyph(cell);
                let x = start_x + col as u16 * self.cell_w;
                fb.fill_rect(x, start_y + row as u16, self.cell_w, 1, glyph);
            }
        }

        let panel_x = start_x + field_w + 2;
        self.draw_panel(fb, snap, hud, panel_x, start_y);

        let banner = if snap.game_over {
            Some("GAME OVER")
        } else if snap.paused {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = banner {
            let text_w = text.chars().count() as u16;
            let x = start_x + field_w.saturating_sub(text_w) / 2;
            let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, start_y + field_h / 2, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &Hud, x: u16, y: u16) {
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_str(x, y, "NEXT", label);
        let preview_h = self.draw_preview(fb, &snap.next, x, y + 1);

        let mut y = y + 2 + preview_h;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &number.to_string(), value);
            y += 3;
        }

        fb.put_str(x, y, "TIME", label);
        fb.put_str(x, y + 1, &format_play_time(hud.elapsed), value);
    }

    /// Draw the next piece's pattern; returns the rows used
    fn draw_preview(&self, fb: &mut FrameBuffer, next: &PieceSnapshot, x: u16, y: u16) -> u16 {
        // Skip blank pattern rows so 3x3 and 4x4 patterns line up
        let rows: Vec<&Vec<Cell>> = next
            .pattern
            .iter()
            .filter(|row| row.iter().any(|&c| c != EMPTY))
            .collect();
        for (dy, row) in rows.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                let glyph = if cell == EMPTY {
                    Glyph::new(' ', Style::new(Rgb::default(), PANEL_BG))
                } else {
                    field_glyph(cell)
                };
                fb.fill_rect(x + dx as u16 * self.cell_w, y + dy as u16, self.cell_w, 1, glyph);
            }
        }
        rows.len() as u16
    }
}

/// `MM:SS` play time
pub fn format_play_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn field_glyph(cell: Cell) -> Glyph {
    match cell {
        EMPTY => Glyph::new('·', Style::new(GRID_DOT, FIELD_BG)),
        WALL | FLOOR => Glyph::new(' ', Style::new(BORDER, BORDER)),
        v => match Shape::from_value(v) {
            Some(shape) => {
                let color = shape_color(shape);
                Glyph::new('█', Style::new(color, FIELD_BG))
            }
            None => Glyph::new('?', Style::default()),
        },
    }
}

fn shape_color(shape: Shape) -> Rgb {
    match shape {
        Shape::I => Rgb::new(220, 40, 40),
        Shape::J => Rgb::new(255, 165, 0),
        Shape::L => Rgb::new(85, 85, 255),
        Shape::O => Rgb::new(85, 255, 85),
        Shape::S => Rgb::new(255, 0, 255),
        Shape::T => Rgb::new(230, 230, 0),
        Shape::Z => Rgb::new(0, 182, 190),
    }
}
