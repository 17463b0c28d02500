// File: crates/traffic-core/src/types.rs
// Summary: Shared surface sizes and paddings for rendered charts and overlays.

use crate::geometry::RectI32;

/// Default surface width in pixels.
pub const WIDTH: i32 = 800;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 400;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
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

    pub const fn uniform(px: u32) -> Self {
        Self::new(px, px, px, px)
    }

    /// Plot area left inside a `width` x `height` surface. Never inverted.
    pub fn plot_rect(&self, width: i32, height: i32) -> RectI32 {
        let left = self.left as i32;
        let top = self.top as i32;
        let right = (width - self.right as i32).max(left + 1);
        let bottom = (height - self.bottom as i32).max(top + 1);
        RectI32::from_ltrb(left, top, right, bottom)
    }
}

impl Default for Insets {
    fn default() -> Self {
        // room for count labels on the left and time labels below
        Self::new(56, 20, 20, 40)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_subtracts_insets() {
        let r = Insets::new(10, 20, 5, 15).plot_rect(100, 50);
        assert_eq!(r, RectI32::from_ltrb(10, 5, 80, 35));
    }

    #[test]
    fn plot_rect_never_inverts() {
        let r = Insets::uniform(40).plot_rect(50, 50);
        assert!(r.width() >= 1 && r.height() >= 1);
    }
}
