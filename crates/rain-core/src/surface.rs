//! Drawing surface dimensions.

/// Dimensions of the 2D drawing surface, in pixel-equivalent units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Surface {
    /// Surface width.
    pub width: u32,
    /// Surface height.
    pub height: u32,
}

impl Surface {
    /// Create a surface with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Match the surface to new viewport dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
