//! The digital rain animator (stateful).

use std::time::Duration;

use rand::Rng;
use ratatui::style::Color;

use crate::canvas::Canvas;
use crate::chars::RAIN_CHARS;
use crate::surface::Surface;

/// Width and height of one glyph cell, in pixel-equivalent units.
pub const GLYPH_SIZE: u32 = 16;

/// Fixed repaint period (~30 frames per second).
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Alpha of the black overlay that fades previous frames into a trail.
const FADE_ALPHA: f32 = 0.05;

/// A column past the bottom edge resets only when a uniform draw exceeds
/// this, so resets stay staggered (~2.5% chance per tick).
const RESET_THRESHOLD: f64 = 0.975;

/// Fill color for rain glyphs.
const RAIN_COLOR: Color = Color::Rgb(0, 255, 0);

/// Owns the drawing surface dimensions and the per-column fall counters.
#[derive(Debug, Default)]
pub struct RainAnimator {
    /// Current surface dimensions.
    surface: Surface,
    /// Fall row of each column's leading glyph, in glyph-height units.
    drops: Vec<u32>,
}

impl RainAnimator {
    /// Create an animator with an empty surface and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the surface to the viewport. Resizing a raster surface also
    /// invalidates any fill/font state previously set on its canvas, so
    /// every tick re-sets both before drawing.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    /// Recompute the column count from the surface width and replace every
    /// fall counter, starting each column one glyph-row below the top.
    /// Must be called after every [`resize_surface`](Self::resize_surface).
    pub fn init_columns(&mut self) {
        let columns = (self.surface.width / GLYPH_SIZE) as usize;
        self.drops = vec![1; columns];
    }

    /// Repaint one frame: fade the previous frame, draw one random glyph
    /// per column, and advance every fall counter by one row.
    pub fn tick<C: Canvas, R: Rng>(&mut self, canvas: &mut C, rng: &mut R) {
        canvas.fill_rect(
            0,
            0,
            self.surface.width,
            self.surface.height,
            Color::Black,
            FADE_ALPHA,
        );

        canvas.set_fill(RAIN_COLOR);
        canvas.set_font(GLYPH_SIZE, "monospace");

        for i in 0..self.drops.len() {
            let glyph = RAIN_CHARS[rng.random_range(0..RAIN_CHARS.len())];
            let y = self.drops[i] * GLYPH_SIZE;
            canvas.draw_glyph(glyph, i as u32 * GLYPH_SIZE, y);

            // The reset draw is only taken once the column is past the
            // bottom edge; columns above it always keep falling.
            if y > self.surface.height && rng.random::<f64>() > RESET_THRESHOLD {
                self.drops[i] = 0;
            }
            self.drops[i] += 1;
        }
    }

    /// Current surface dimensions.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Fall counters, one per column.
    pub fn drops(&self) -> &[u32] {
        &self.drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Canvas double that records every call the animator makes.
    #[derive(Debug, Default)]
    struct RecordingCanvas {
        fills: Vec<(u32, u32, u32, u32, Color, f32)>,
        glyphs: Vec<(char, u32, u32)>,
        fill_color: Option<Color>,
        font: Option<(u32, String)>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color, alpha: f32) {
            self.fills.push((x, y, width, height, color, alpha));
        }

        fn set_fill(&mut self, color: Color) {
            self.fill_color = Some(color);
        }

        fn set_font(&mut self, size: u32, family: &str) {
            self.font = Some((size, family.to_string()));
        }

        fn draw_glyph(&mut self, glyph: char, x: u32, y: u32) {
            self.glyphs.push((glyph, x, y));
        }
    }

    /// Generator that always yields the same word, pinning the uniform f64
    /// draw to 0.0 (`FixedRng(0)`, reset never fires) or just under 1.0
    /// (`FixedRng(u64::MAX)`, reset always fires once eligible).
    struct FixedRng(u64);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.0.to_le_bytes();
            for (d, b) in dest.iter_mut().zip(bytes.iter().cycle()) {
                *d = *b;
            }
        }
    }

    fn animator(width: u32, height: u32) -> RainAnimator {
        let mut animator = RainAnimator::new();
        animator.resize_surface(width, height);
        animator.init_columns();
        animator
    }

    #[test]
    fn column_count_tracks_surface_width() {
        let mut animator = RainAnimator::new();
        for (width, expected) in [(0, 0), (15, 0), (16, 1), (320, 20), (505, 31), (640, 40)] {
            animator.resize_surface(width, 100);
            animator.init_columns();
            assert_eq!(animator.drops().len(), expected, "width {width}");
        }
    }

    #[test]
    fn init_columns_starts_every_column_one_row_below_the_top() {
        let animator = animator(320, 100);
        assert_eq!(animator.drops(), vec![1u32; 20]);
    }

    #[test]
    fn tick_advances_every_column_by_one_row() {
        let mut animator = animator(320, 100);
        let mut canvas = RecordingCanvas::default();
        let mut rng = StdRng::seed_from_u64(7);

        // All counters sit well above the bottom edge, so no reset draw is
        // ever taken and each tick advances every column exactly once.
        animator.tick(&mut canvas, &mut rng);
        assert_eq!(animator.drops(), vec![2u32; 20]);
        animator.tick(&mut canvas, &mut rng);
        assert_eq!(animator.drops(), vec![3u32; 20]);
    }

    #[test]
    fn columns_never_reset_above_the_bottom_edge() {
        let mut animator = animator(320, 100);
        let mut canvas = RecordingCanvas::default();
        // Reset draw always exceeds the threshold, but must not be taken
        // while drops[i] * 16 <= 100, i.e. until a counter passes 6.
        let mut rng = FixedRng(u64::MAX);

        for expected in 2..=7 {
            animator.tick(&mut canvas, &mut rng);
            assert_eq!(animator.drops(), vec![expected; 20]);
        }

        // 7 * 16 = 112 > 100: every column is now eligible and resets to 0,
        // then the unconditional increment lands it back on row 1.
        animator.tick(&mut canvas, &mut rng);
        assert_eq!(animator.drops(), vec![1u32; 20]);
    }

    #[test]
    fn reset_never_fires_when_the_draw_stays_below_threshold() {
        let mut animator = animator(320, 100);
        let mut canvas = RecordingCanvas::default();
        let mut rng = FixedRng(0);

        // Even far past the bottom edge a column keeps advancing while the
        // uniform draw stays below 0.975.
        for _ in 0..20 {
            animator.tick(&mut canvas, &mut rng);
        }
        assert_eq!(animator.drops(), vec![21u32; 20]);
    }

    #[test]
    fn glyphs_come_from_the_two_symbol_alphabet() {
        let mut animator = animator(320, 100);
        let mut canvas = RecordingCanvas::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            animator.tick(&mut canvas, &mut rng);
        }

        assert_eq!(canvas.glyphs.len(), 50 * 20);
        assert!(
            canvas
                .glyphs
                .iter()
                .all(|(glyph, _, _)| RAIN_CHARS.contains(glyph))
        );
    }

    #[test]
    fn first_tick_draws_one_glyph_per_column_across_the_top_row() {
        let mut animator = animator(320, 100);
        let mut canvas = RecordingCanvas::default();
        let mut rng = FixedRng(0);

        animator.tick(&mut canvas, &mut rng);

        // Fade pass covers the whole surface at low alpha, then fill and
        // font are re-set for the glyph draws.
        assert_eq!(canvas.fills, vec![(0, 0, 320, 100, Color::Black, 0.05)]);
        assert_eq!(canvas.fill_color, Some(Color::Rgb(0, 255, 0)));
        assert_eq!(canvas.font, Some((16, "monospace".to_string())));

        // One draw per column at x = 0, 16, ..., 304, all on baseline 16.
        assert_eq!(canvas.glyphs.len(), 20);
        for (i, (glyph, x, y)) in canvas.glyphs.iter().enumerate() {
            assert!(RAIN_CHARS.contains(glyph));
            assert_eq!(*x, i as u32 * 16);
            assert_eq!(*y, 16);
        }
        assert_eq!(animator.drops(), vec![2u32; 20]);
    }

    #[test]
    fn resize_discards_fall_progress() {
        let mut animator = animator(320, 100);
        let mut canvas = RecordingCanvas::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..3 {
            animator.tick(&mut canvas, &mut rng);
        }
        assert_eq!(animator.drops(), vec![4u32; 20]);

        animator.resize_surface(640, 100);
        animator.init_columns();
        assert_eq!(animator.drops(), vec![1u32; 40]);
    }
}
