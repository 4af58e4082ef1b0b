//! Terminal cell-grid backend for the animation canvas.

use rain_core::{Canvas, GLYPH_SIZE};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// One cell of the intensity buffer.
#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Glyph last stamped into this cell.
    glyph: char,
    /// Fill color the glyph was stamped with.
    color: Color,
    /// Remaining brightness, decayed by every fade pass.
    intensity: f32,
}

impl Cell {
    const EMPTY: Self = Self {
        glyph: ' ',
        color: Color::Reset,
        intensity: 0.0,
    };
}

/// A [`Canvas`] over a grid of terminal cells, one glyph per cell.
///
/// A raster canvas fades old frames by compositing a translucent black
/// rectangle over them; a terminal has no alpha, so each cell carries an
/// intensity that every fade pass multiplies down and that scales the
/// foreground color at paint time. Positions arrive in pixel-equivalent
/// units and map to cells at the current font size per axis, with glyph
/// y being a text baseline (a glyph drawn at y = 16 lands on row 0, and
/// y = 0 sits above the surface and paints nothing).
#[derive(Debug)]
pub struct TermCanvas {
    /// Grid width in cells.
    cols: u16,
    /// Grid height in cells.
    rows: u16,
    /// Cell buffer, row-major.
    cells: Vec<Cell>,
    /// Current fill color.
    fill: Color,
    /// Current font size, which doubles as the cell pitch.
    font_size: u32,
}

impl Default for TermCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl TermCanvas {
    /// Cells dimmer than this paint as blank.
    const MIN_VISIBLE: f32 = 0.02;

    /// Create an empty zero-sized canvas.
    pub fn new() -> Self {
        Self {
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            fill: Color::Reset,
            font_size: GLYPH_SIZE,
        }
    }

    /// Resize the cell grid. As with a raster surface, this discards the
    /// contents and resets fill and font state.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::EMPTY; usize::from(cols) * usize::from(rows)];
        self.fill = Color::Reset;
        self.font_size = GLYPH_SIZE;
    }

    /// Render the buffer as one [`Line`] of spans per terminal row.
    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|y| {
                let spans: Vec<Span> = (0..self.cols).map(|x| self.cell_span(x, y)).collect();
                Line::from(spans)
            })
            .collect()
    }

    fn cell_span(&self, x: u16, y: u16) -> Span<'static> {
        let cell = self.cells[usize::from(y) * usize::from(self.cols) + usize::from(x)];
        if cell.intensity < Self::MIN_VISIBLE {
            return Span::raw(" ");
        }
        Span::styled(
            cell.glyph.to_string(),
            Style::new().fg(dim(cell.color, cell.intensity)),
        )
    }
}

impl Canvas for TermCanvas {
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, _color: Color, alpha: f32) {
        // Compositing a translucent rect over a cell decays its brightness
        // toward the rect color; with the black veil the animation uses,
        // that is a pure fade.
        let pitch = self.font_size.max(1);
        let x0 = x / pitch;
        let y0 = y / pitch;
        let x1 = (x + width).div_ceil(pitch).min(u32::from(self.cols));
        let y1 = (y + height).div_ceil(pitch).min(u32::from(self.rows));

        for row in y0..y1 {
            for col in x0..x1 {
                let idx = row as usize * usize::from(self.cols) + col as usize;
                self.cells[idx].intensity *= 1.0 - alpha;
            }
        }
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_font(&mut self, size: u32, _family: &str) {
        self.font_size = size;
    }

    fn draw_glyph(&mut self, glyph: char, x: u32, y: u32) {
        let pitch = self.font_size.max(1);
        if y < pitch {
            // Baseline above the top edge.
            return;
        }
        let col = x / pitch;
        let row = y / pitch - 1;
        if col >= u32::from(self.cols) || row >= u32::from(self.rows) {
            return;
        }
        let idx = row as usize * usize::from(self.cols) + col as usize;
        self.cells[idx] = Cell {
            glyph,
            color: self.fill,
            intensity: 1.0,
        };
    }
}

/// Scale an RGB color toward black by the cell intensity.
fn dim(color: Color, intensity: f32) -> Color {
    let scale = |c: u8| (f32::from(c) * intensity) as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r), scale(g), scale(b)),
        other => other,
    }
}
