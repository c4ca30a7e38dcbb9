/// Drawing and presentation collaborators.
///
/// The engine writes colored cells to a `Surface` and reports outcomes as a
/// `Message`; what ends up on screen is up to the host.
use crossterm::style::Color;

pub trait Surface {
    /// Paint one cell.  Out-of-bounds coordinates must be ignored: entities
    /// are routinely partly off the field while bouncing or exploding.
    fn set_cell(&mut self, x: i32, y: i32, color: Color, glyph: char);
}

/// Shows a terminal-state message to the player.  Must not block.
pub trait Presenter {
    fn show_message(&mut self, message: &Message);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub background: Color,
    pub text: String,
    pub accent: Color,
    pub size: u16,
}

// ── Cell grid ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub color: Color,
    pub glyph: char,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            color: Color::Black,
            glyph: ' ',
        }
    }
}

/// An in-memory field of cells, drawn into once per frame and then flushed
/// by the host.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.cells.fill(Cell { color, glyph: ' ' });
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Surface for CellGrid {
    fn set_cell(&mut self, x: i32, y: i32, color: Color, glyph: char) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { color, glyph };
        }
    }
}
