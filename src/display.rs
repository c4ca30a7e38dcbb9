/// Rendering layer: all terminal I/O lives here.
///
/// The engine draws into a `CellGrid`; this module turns that grid into
/// terminal commands, two field rows per terminal line using half blocks,
/// and adds the HUD, the starfield and the outcome overlay.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::rng::RandomSource;
use space_invaders::surface::{CellGrid, Message, Presenter, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FIELD: Color = Color::Black;
const C_STAR: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Terminal row of the first field line; row 0 holds the HUD.
const FIELD_TOP: u16 = 1;

// ── Starfield ─────────────────────────────────────────────────────────────────

/// Background decoration: one star per field row at a random column.
/// Generated once per game and never touched by gameplay.
pub struct Starfield {
    stars: Vec<(i32, i32)>,
}

impl Starfield {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R, width: u32, height: u32) -> Self {
        let stars = (0..height as i32)
            .map(|y| (rng.random_int(width) as i32, y))
            .collect();
        Self { stars }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for &(x, y) in &self.stars {
            surface.set_cell(x, y, C_STAR, ' ');
        }
    }
}

// ── Outcome overlay ───────────────────────────────────────────────────────────

/// Holds the outcome message until the next game starts.
#[derive(Default)]
pub struct Overlay {
    message: Option<Message>,
}

impl Overlay {
    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Presenter for Overlay {
    fn show_message(&mut self, message: &Message) {
        self.message = Some(message.clone());
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    grid: &CellGrid,
    score: u32,
    overlay: Option<&Message>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, grid, score)?;
    draw_field(out, grid)?;
    draw_controls_hint(out, grid)?;

    if let Some(message) = overlay {
        draw_message(out, grid, message)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, last_row(grid)))?;
    out.flush()?;
    Ok(())
}

fn field_lines(grid: &CellGrid) -> u16 {
    grid.height().div_ceil(2) as u16
}

fn last_row(grid: &CellGrid) -> u16 {
    FIELD_TOP + field_lines(grid)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: &CellGrid, score: u32) -> std::io::Result<()> {
    let title = "SPACE INVADERS";
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", score)))?;

    let tx = (grid.width() as u16).saturating_sub(title.len() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;
    Ok(())
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// Each terminal line shows two field rows: the upper one as the
/// foreground of `▀`, the lower one as its background.
fn draw_field<W: Write>(out: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    for line in 0..field_lines(grid) {
        out.queue(cursor::MoveTo(0, FIELD_TOP + line))?;
        let top_y = line as i32 * 2;
        for x in 0..grid.width() as i32 {
            let top = grid.get(x, top_y).copied().unwrap_or_default();
            let bottom = grid.get(x, top_y + 1).copied().unwrap_or_default();
            if top.glyph != ' ' {
                out.queue(style::SetForegroundColor(top.color))?;
                out.queue(style::SetBackgroundColor(C_FIELD))?;
                out.queue(Print(top.glyph))?;
            } else if bottom.glyph != ' ' {
                out.queue(style::SetForegroundColor(bottom.color))?;
                out.queue(style::SetBackgroundColor(C_FIELD))?;
                out.queue(Print(bottom.glyph))?;
            } else {
                out.queue(style::SetForegroundColor(top.color))?;
                out.queue(style::SetBackgroundColor(bottom.color))?;
                out.queue(Print('▀'))?;
            }
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, last_row(grid)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Outcome overlay ───────────────────────────────────────────────────────────

fn draw_message<W: Write>(
    out: &mut W,
    grid: &CellGrid,
    message: &Message,
) -> std::io::Result<()> {
    // Terminal text has one size; `message.size` only matters to hosts
    // that can scale fonts.
    let inner = 20usize;
    let text = format!("{:^inner$}", message.text);
    let lines = [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{}║", text),
        format!("╚{}╝", "═".repeat(inner)),
    ];
    let hint = "SPACE - Play Again  Q - Quit";

    let cx = grid.width() as u16 / 2;
    let start_row = FIELD_TOP + (field_lines(grid) / 2).saturating_sub(2);

    out.queue(style::SetBackgroundColor(message.background))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(message.accent))?;
        out.queue(Print(line))?;
    }

    let hint_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    out.queue(style::ResetColor)?;

    Ok(())
}
