/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `FrameSnapshot`.
/// No game logic is performed; this module only scales play-area units onto
/// terminal cells and translates the snapshot into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::entities::{PowerUpKind, Rect};
use space_shooter::snapshot::FrameSnapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Green;
const C_HUD_DOUBLE: Color = Color::Yellow;
const C_SHIP: Color = Color::White;
const C_SHIELD_RING: Color = Color::Blue;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_POWER_UP_DOUBLE: Color = Color::Yellow;
const C_POWER_UP_SHIELD: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps play-area coordinates onto the terminal.
///
/// Layout: row 0 HUD, row 1 top border, rows `2 .. rows-2` play field,
/// row `rows-2` bottom border, row `rows-1` controls hint.  Columns 0 and
/// `cols-1` are the side walls.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    area_width: i32,
    area_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, area_width: i32, area_height: i32) -> Self {
        Self {
            cols,
            rows,
            area_width: area_width.max(1),
            area_height: area_height.max(1),
        }
    }

    fn field_cols(&self) -> i32 {
        i32::from(self.cols.saturating_sub(2))
    }

    fn field_rows(&self) -> i32 {
        i32::from(self.rows.saturating_sub(4))
    }

    /// Terminal cell for a play-area point, or `None` if it falls outside
    /// the visible field.
    pub fn to_cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.area_width || y >= self.area_height {
            return None;
        }
        let col = 1 + x * self.field_cols() / self.area_width;
        let row = 2 + y * self.field_rows() / self.area_height;
        Some((col as u16, row as u16))
    }

    fn center_cell(&self, rect: &Rect) -> Option<(u16, u16)> {
        self.to_cell(rect.center_x(), rect.center_y())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &FrameSnapshot,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, snap, view)?;

    for enemy in &snap.enemies {
        draw_sprite(out, view, enemy, "<▼>", C_ENEMY)?;
    }
    for (rect, kind) in &snap.power_ups {
        let (glyph, color) = match kind {
            PowerUpKind::DoubleBullet => ("[D]", C_POWER_UP_DOUBLE),
            PowerUpKind::Shield => ("[S]", C_POWER_UP_SHIELD),
        };
        draw_sprite(out, view, rect, glyph, color)?;
    }
    for bullet in &snap.bullets {
        draw_sprite(out, view, bullet, "║", C_BULLET)?;
    }

    draw_ship(out, snap, view)?;
    draw_controls_hint(out, view)?;

    if snap.game_over {
        draw_game_over(out, snap, view)?;
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

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &FrameSnapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", snap.score)))?;

    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("  Health: {}", "♥".repeat(snap.health as usize))))?;

    // Active power-ups — right-aligned, shield first
    let mut timers: Vec<(String, Color)> = Vec::new();
    if snap.ship.shield {
        timers.push((format!("Shield: {} sec", snap.ship.shield_secs), C_HUD_SHIELD));
    }
    if snap.ship.double_bullet {
        timers.push((
            format!("Double Bullet: {} sec", snap.ship.double_bullet_secs),
            C_HUD_DOUBLE,
        ));
    }
    let total: usize = timers.iter().map(|(t, _)| t.chars().count() + 2).sum();
    let mut col = view.cols.saturating_sub(total as u16 + 1);
    for (text, color) in &timers {
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
        col += text.chars().count() as u16 + 2;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw a one-row glyph centred on the entity's cell.
fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.center_cell(rect) else {
        return Ok(());
    };
    let half = glyph.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(col.saturating_sub(half).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_ship<W: Write>(out: &mut W, snap: &FrameSnapshot, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← nose
    //  /|\      ← wings + fuselage
    let Some((col, row)) = view.center_cell(&snap.ship.rect) else {
        return Ok(());
    };
    let left = col.saturating_sub(1).max(1);

    out.queue(style::SetForegroundColor(C_SHIP))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    let wing_row = row + 1;
    if wing_row < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(left, wing_row))?;
        out.queue(Print("/|\\"))?;
    }

    if snap.ship.shield {
        out.queue(style::SetForegroundColor(C_SHIELD_RING))?;
        out.queue(cursor::MoveTo(left.saturating_sub(1).max(1), row))?;
        out.queue(Print("("))?;
        out.queue(cursor::MoveTo((left + 3).min(view.cols.saturating_sub(2)), row))?;
        out.queue(Print(")"))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &FrameSnapshot,
    view: &Viewport,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", snap.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
