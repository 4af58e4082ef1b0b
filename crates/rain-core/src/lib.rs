//! Digital rain animation core.
//!
//! This crate models the classic falling-glyph effect: a drawing surface
//! sized to the viewport, one fall counter per column, and a fixed-period
//! repaint that draws a random glyph per column while a low-alpha black
//! overlay fades the previous frames into a trail. Rendering goes through
//! the [`Canvas`] trait so the terminal backend (and tests) supply the
//! actual drawing primitives.

mod animator;
mod canvas;
mod chars;
mod surface;

pub use animator::{GLYPH_SIZE, RainAnimator, TICK_INTERVAL};
pub use canvas::Canvas;
pub use chars::RAIN_CHARS;
pub use surface::Surface;
