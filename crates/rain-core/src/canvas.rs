//! Drawing primitives the animator paints through.

use ratatui::style::Color;

/// Raster drawing primitives, in the shape of a 2D canvas context: a stored
/// fill color and font, plus rectangle and glyph painting.
///
/// Implementations are assumed infallible; the animator has no error paths.
pub trait Canvas {
    /// Fill a rectangle with `color` blended at `alpha` over the existing
    /// contents. An alpha well below 1.0 dims rather than clears, which is
    /// what produces the rain trails.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color, alpha: f32);

    /// Set the fill color used by subsequent glyph draws.
    fn set_fill(&mut self, color: Color);

    /// Set the font (glyph size and family) used by subsequent glyph draws.
    fn set_font(&mut self, size: u32, family: &str);

    /// Draw a single glyph with its baseline at `(x, y)`.
    fn draw_glyph(&mut self, glyph: char, x: u32, y: u32);
}
