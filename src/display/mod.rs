//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game. No game logic is performed; this module only scales the
//! simulation's pixel coordinates onto terminal cells and draws them in a
//! fixed order: background, bullets, ship, aliens, pickups, HUD, and the
//! play button while the game is inactive.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::Game;
use crate::entities::{Entity, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_BULLET: Color = Color::Red;
const C_POWERUP: Color = Color::Magenta;
const C_BUTTON: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

const BUTTON_LABEL: &str = "[  PLAY  ]";

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps the simulation viewport onto the bordered play area of the terminal.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    sim_width: f32,
    sim_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, game: &Game) -> Self {
        Self {
            cols,
            rows,
            sim_width: game.settings.screen_width,
            sim_height: game.settings.screen_height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    pub fn col(&self, x: f32) -> u16 {
        let c = (x / self.sim_width * self.inner_cols()).floor().max(0.0) as u16;
        1 + c.min(self.cols.saturating_sub(3))
    }

    pub fn row(&self, y: f32) -> u16 {
        let r = (y / self.sim_height * self.inner_rows()).floor().max(0.0) as u16;
        2 + r.min(self.rows.saturating_sub(5))
    }

    /// Width of a body in cells, at least one.
    pub fn span(&self, width: f32) -> usize {
        ((width / self.sim_width * self.inner_cols()).round() as usize).max(1)
    }

    /// Top-left cell and width of the play button.
    pub fn play_button(&self) -> (u16, u16, u16) {
        let w = BUTTON_LABEL.chars().count() as u16;
        ((self.cols / 2).saturating_sub(w / 2), self.rows / 2, w)
    }

    pub fn play_button_contains(&self, col: u16, row: u16) -> bool {
        let (bx, by, bw) = self.play_button();
        row == by && col >= bx && col < bx + bw
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, view)?;

    for bullet in &game.projectiles.bullets {
        draw_body(out, view, &bullet.body, '║', C_BULLET)?;
    }
    draw_ship(out, view, game)?;
    for alien in &game.formation.aliens {
        draw_alien(out, view, &alien.body)?;
    }
    for item in &game.powerups.items {
        draw_body(out, view, &item.body, '✦', C_POWERUP)?;
    }

    draw_hud(out, view, game)?;
    draw_controls_hint(out, view)?;

    if game.status == GameStatus::Inactive {
        draw_play_button(out, view, game)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_body<W: Write>(
    out: &mut W,
    view: &Viewport,
    body: &Entity,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let cx = body.x + body.width / 2.0;
    out.queue(cursor::MoveTo(view.col(cx), view.row(body.y)))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_ship<W: Write>(out: &mut W, view: &Viewport, game: &Game) -> std::io::Result<()> {
    //   ▲       ← tip, at the ship's center column
    //  /|\      ← wings, on the row below when there is room
    let body = &game.ship.body;
    let tip_col = view.col(body.x + body.width / 2.0);
    let tip_row = view.row(body.y);
    out.queue(style::SetForegroundColor(C_SHIP))?;
    out.queue(cursor::MoveTo(tip_col, tip_row))?;
    out.queue(Print("▲"))?;

    let wing_row = tip_row + 1;
    if wing_row < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(tip_col.saturating_sub(1).max(1), wing_row))?;
        out.queue(Print("/|\\"))?;
    }
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, view: &Viewport, body: &Entity) -> std::io::Result<()> {
    let sprite = match view.span(body.width) {
        1 => "▼".to_string(),
        2 => "<>".to_string(),
        n => format!("<{}>", "▼".repeat(n - 2)),
    };
    out.queue(style::SetForegroundColor(C_ALIEN))?;
    out.queue(cursor::MoveTo(view.col(body.x), view.row(body.y)))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, game: &Game) -> std::io::Result<()> {
    let stats = &game.stats;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score: {:>8}   High: {:>8}",
        stats.score, stats.high_score
    )))?;

    let level_str = format!("[ LEVEL {} ]", stats.level);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let ships: String = "▲".repeat(stats.ships_left as usize);
    let lives_text = format!("Ships: {}", ships);
    let rx = view
        .cols
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   SPACE : Shoot   P / click : Play   Q : Quit"))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_play_button<W: Write>(out: &mut W, view: &Viewport, game: &Game) -> std::io::Result<()> {
    let (bx, by, _) = view.play_button();
    out.queue(cursor::MoveTo(bx, by))?;
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(Print(BUTTON_LABEL))?;

    if game.stats.score > 0 {
        let last = format!("Last score: {}", game.stats.score);
        let col = (view.cols / 2).saturating_sub(last.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, by + 2))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(&last))?;
    }
    Ok(())
}
