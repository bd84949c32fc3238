//! Rendering layer: all terminal output lives here.
//!
//! Draw directives arrive in playfield pixels; this module scales them onto
//! the terminal grid and draws each entity as a coloured placeholder block.
//! No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_shooter::entities::{BoundingBox, Vector2};
use space_shooter::scene::{Anchor, DrawDirective, Sprite, TextColor, TextSize};
use space_shooter::Renderer;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_SHOT_PLAYER: Color = Color::White;
const C_SHOT_ENEMY: Color = Color::Red;
const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_ACCENT: Color = Color::Green;
const C_BUTTON: Color = Color::DarkGreen;
const C_BUTTON_HOVER: Color = Color::Green;
const C_HEALTH: Color = Color::Green;
const C_HEALTH_LOST: Color = Color::Red;
const C_BORDER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Pixel ↔ cell mapping ──────────────────────────────────────────────────────

/// Maps the playfield onto the terminal, keeping the last row for hints.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn current(width: f32, height: f32) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            cols: cols.max(1),
            rows: rows.saturating_sub(1).max(1),
            width,
            height,
        })
    }

    fn col(&self, x: f32) -> i32 {
        (x * self.cols as f32 / self.width).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y * self.rows as f32 / self.height).floor() as i32
    }

    /// Cell span `(col0, row0, col1, row1)`, end-exclusive, at least 1x1.
    fn cells(&self, b: &BoundingBox) -> (i32, i32, i32, i32) {
        let (c0, r0) = (self.col(b.left()), self.row(b.top()));
        let c1 = self.col(b.right()).max(c0 + 1);
        let r1 = self.row(b.bottom()).max(r0 + 1);
        (c0, r0, c1, r1)
    }

    fn visible(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }

    /// Centre of a terminal cell, in playfield pixels.
    pub fn to_playfield(&self, col: u16, row: u16) -> Vector2 {
        Vector2::new(
            (col as f32 + 0.5) * self.width / self.cols as f32,
            (row as f32 + 0.5) * self.height / self.rows as f32,
        )
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    width: f32,
    height: f32,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: f32, height: f32) -> Self {
        Self { out, width, height }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    /// Render one complete frame.
    fn render(&mut self, frame: &[DrawDirective]) -> std::io::Result<()> {
        let view = Viewport::current(self.width, self.height)?;
        let out = &mut self.out;

        for directive in frame {
            match directive {
                DrawDirective::Background => {
                    out.queue(style::ResetColor)?;
                    out.queue(terminal::Clear(terminal::ClearType::All))?;
                }
                // No translucency in a terminal; the cleared backdrop stands in.
                DrawDirective::Overlay { .. } => {}
                DrawDirective::Entity { sprite, bounds } => draw_entity(out, &view, *sprite, bounds)?,
                DrawDirective::Text {
                    text,
                    position,
                    anchor,
                    size,
                    color,
                } => draw_text(out, &view, text, *position, *anchor, *size, *color)?,
                DrawDirective::HealthBar { bounds, fill, .. } => {
                    draw_health_bar(out, &view, bounds, *fill)?
                }
                DrawDirective::Button {
                    label,
                    bounds,
                    highlighted,
                } => draw_button(out, &view, label, bounds, *highlighted)?,
            }
        }

        draw_controls_hint(out, &view)?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, view.rows))?;
        out.flush()?;
        Ok(())
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(
    out: &mut W,
    view: &Viewport,
    sprite: Sprite,
    bounds: &BoundingBox,
) -> std::io::Result<()> {
    let (glyph, color) = match sprite {
        Sprite::Player => ("█", C_PLAYER),
        Sprite::Enemy => ("▓", C_ENEMY),
        Sprite::PlayerProjectile => ("║", C_SHOT_PLAYER),
        Sprite::EnemyProjectile => ("↓", C_SHOT_ENEMY),
    };
    out.queue(style::SetForegroundColor(color))?;

    match sprite {
        // Shots are a single glyph at their centre cell.
        Sprite::PlayerProjectile | Sprite::EnemyProjectile => {
            let c = bounds.center();
            let (col, row) = (view.col(c.x), view.row(c.y));
            if view.visible(col, row) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(glyph))?;
            }
        }
        Sprite::Player | Sprite::Enemy => {
            let (c0, r0, c1, r1) = view.cells(bounds);
            for row in r0..r1 {
                for col in c0..c1 {
                    if view.visible(col, row) {
                        out.queue(cursor::MoveTo(col as u16, row as u16))?;
                        out.queue(Print(glyph))?;
                    }
                }
            }
        }
    }
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(
    out: &mut W,
    view: &Viewport,
    text: &str,
    position: Vector2,
    anchor: Anchor,
    size: TextSize,
    color: TextColor,
) -> std::io::Result<()> {
    let len = text.chars().count() as i32;
    let row = view.row(position.y);
    let col = match anchor {
        Anchor::Center => view.col(position.x) - len / 2,
        Anchor::TopLeft => view.col(position.x),
    };
    if !view.visible(col.max(0), row) {
        return Ok(());
    }
    let fg = match (size, color) {
        (_, TextColor::Accent) => C_ACCENT,
        (TextSize::Title, TextColor::Primary) => C_TITLE,
        (TextSize::Body, TextColor::Primary) => C_TEXT,
    };
    out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
    out.queue(style::SetForegroundColor(fg))?;
    if size == TextSize::Title {
        out.queue(style::SetAttribute(style::Attribute::Bold))?;
    }
    out.queue(Print(text))?;
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_health_bar<W: Write>(
    out: &mut W,
    view: &Viewport,
    bounds: &BoundingBox,
    fill: f32,
) -> std::io::Result<()> {
    let (c0, r0, c1, _) = view.cells(bounds);
    if !view.visible(c0.max(0), r0) {
        return Ok(());
    }
    let width = (c1 - c0).max(1) as usize;
    let filled = ((fill.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);

    out.queue(cursor::MoveTo(c0.max(0) as u16, r0 as u16))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print("["))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_HEALTH_LOST))?;
    out.queue(Print("░".repeat(width - filled)))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print("]"))?;
    Ok(())
}

// ── Buttons ───────────────────────────────────────────────────────────────────

fn draw_button<W: Write>(
    out: &mut W,
    view: &Viewport,
    label: &str,
    bounds: &BoundingBox,
    highlighted: bool,
) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.cells(bounds);
    let width = (c1 - c0).max(1) as usize;
    let label_row = r0 + (r1 - r0 - 1) / 2;

    out.queue(style::SetBackgroundColor(if highlighted {
        C_BUTTON_HOVER
    } else {
        C_BUTTON
    }))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    for row in r0..r1 {
        if !view.visible(c0.max(0), row) {
            continue;
        }
        let line = if row == label_row {
            format!("{label:^width$}")
        } else {
            " ".repeat(width)
        };
        out.queue(cursor::MoveTo(c0.max(0) as u16, row as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   ENTER / TAB : Menu   Q : Quit",
    ))?;
    Ok(())
}
