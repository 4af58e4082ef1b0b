//! Character constants for the rain animation.

/// Symbol alphabet rain glyphs are picked from.
pub const RAIN_CHARS: &[char] = &['0', '1'];
