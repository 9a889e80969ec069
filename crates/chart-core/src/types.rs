// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (report raster size, paddings).

/// Report surface width in pixels, half of 1920.
pub const WIDTH: i32 = 1920 / 2;
/// Report surface height in pixels, half of 1080.
pub const HEIGHT: i32 = 1080 / 2;

/// Screen margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    /// Room for the title on top, tick labels on the left and bottom,
    /// and the legend strip under the x axis.
    fn default() -> Self {
        Self::new(72, 24, 40, 72)
    }
}
