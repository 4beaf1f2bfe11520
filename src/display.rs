//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; arena coordinates are scaled
//! onto the terminal grid and translated into terminal commands.

use std::io::Write;

use arcade_shooter::compute::hud_lines;
use arcade_shooter::entities::{GameEvent, GameState, GameStatus, Rect, Weapon};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Yellow;
const C_BULLET: Color = Color::Cyan;
const C_BULLET_HEAVY: Color = Color::Red;
const C_LIFE_DROP: Color = Color::Cyan;
const C_HIT: Color = Color::Yellow;
const C_STAR: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const STAR_COUNT: u32 = 40;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps arena coordinates onto terminal cells.  Row 0 is the HUD and the last
/// row the controls hint; the playfield is everything between.
struct Viewport {
    cols: u16,
    rows: u16,
    arena_w: f32,
    arena_h: f32,
}

impl Viewport {
    fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Self {
            cols,
            rows,
            arena_w: state.tuning.arena.width,
            arena_h: state.tuning.arena.height,
        }
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// Terminal cell for an arena point, or `None` when it is off-screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.arena_w || y >= self.arena_h {
            return None;
        }
        let col = (x / self.arena_w * self.cols as f32) as u16;
        let row = (y / self.arena_h * self.play_rows() as f32) as u16 + 1;
        Some((col.min(self.cols.saturating_sub(1)), row))
    }

    /// Width of a box in cells, at least one.
    fn span(&self, rect: &Rect) -> u16 {
        ((rect.w / self.arena_w * self.cols as f32).round() as u16).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, state);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_starfield(out, &view, state)?;
    draw_hud(out, &view, state)?;

    for (_, drop) in state.life_drop.iter() {
        draw_glyph(out, &view, &drop.rect, "♥", C_LIFE_DROP)?;
    }
    for (_, drop) in state.weapon_drop.iter() {
        let (glyph, color) = weapon_badge(drop.weapon);
        draw_glyph(out, &view, &drop.rect, glyph, color)?;
    }
    for (_, enemy) in state.enemies.iter() {
        let sprite = if enemy.phase < 0.5 { "«▼»" } else { "»▼«" };
        draw_glyph(out, &view, &enemy.rect, sprite, C_ENEMY)?;
    }
    for (_, bullet) in state.bullets.iter() {
        let (glyph, color) = match bullet.weapon {
            Weapon::Heavy => ("█", C_BULLET_HEAVY),
            Weapon::Single | Weapon::Burst => ("║", C_BULLET),
        };
        draw_glyph(out, &view, &bullet.rect, glyph, color)?;
    }

    draw_player(out, &view, state)?;
    draw_hits(out, &view, state)?;
    draw_controls_hint(out, &view)?;

    if state.status == GameStatus::Ended {
        draw_game_over(out, &view, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_starfield<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    let play_rows = view.play_rows() as u32;
    let offset = (state.scroll / view.arena_h * play_rows as f32) as u32;
    out.queue(style::SetForegroundColor(C_STAR))?;
    for i in 0..STAR_COUNT {
        let col = (i * 37 + 11) % view.cols.max(1) as u32;
        let row = (i * 53 + offset) % play_rows + 1;
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print("·"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let [score, lives, weapon] = hud_lines(state);
    out.queue(style::SetForegroundColor(C_HUD))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(&score))?;

    let mid = (view.cols / 2).saturating_sub(lives.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mid, 0))?;
    out.queue(Print(&lives))?;

    let right = view.cols.saturating_sub(weapon.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(right, 0))?;
    let (_, color) = weapon_badge(state.player.weapon);
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&weapon))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn weapon_badge(weapon: Weapon) -> (&'static str, Color) {
    match weapon {
        Weapon::Single => ("S", Color::Cyan),
        Weapon::Burst => ("B", Color::Magenta),
        Weapon::Heavy => ("H", Color::Red),
    }
}

/// Draw `glyph` centred on the box.
fn draw_glyph<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(rect.center_x(), rect.center_y()) else {
        return Ok(());
    };
    let half = glyph.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(col.saturating_sub(half), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    // Hull spans the ship's width, nose on top:
    //    ▲
    //  ▄███▄
    let rect = &state.player.rect;
    let Some((left, row)) = view.cell(rect.x, rect.center_y()) else {
        return Ok(());
    };
    let span = view.span(rect);
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    let hull = if span >= 3 {
        format!("▄{}▄", "█".repeat(span as usize - 2))
    } else {
        "█".repeat(span as usize)
    };
    out.queue(cursor::MoveTo(left, row))?;
    out.queue(Print(hull))?;

    if row > 1 {
        out.queue(cursor::MoveTo(left + span / 2, row - 1))?;
        out.queue(Print("▲"))?;
    }
    Ok(())
}

/// One-frame flash wherever a bullet destroyed an enemy this tick.
fn draw_hits<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HIT))?;
    for event in state.events() {
        if let GameEvent::Hit { x, y } = event {
            if let Some((col, row)) = view.cell(*x, *y) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("✶"))?;
            }
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
