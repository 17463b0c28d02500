// File: crates/traffic-core/src/scale.rs
// Summary: Linear value-to-pixel transforms used by the chart renderer.

/// Maps a value range onto a pixel range; pixel range may run backwards (y axes).
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub v0: f64,
    pub v1: f64,
    pub px0: f32,
    pub px1: f32,
}

impl LinearScale {
    pub fn new(v0: f64, v1: f64, px0: f32, px1: f32) -> Self {
        let v1 = if (v1 - v0).abs() < 1e-12 { v0 + 1.0 } else { v1 };
        Self { v0, v1, px0, px1 }
    }

    /// Horizontal scale: `min` at `left`, `max` at `right`.
    pub fn horizontal(min: f64, max: f64, left: i32, right: i32) -> Self {
        Self::new(min, max, left as f32, right as f32)
    }

    /// Vertical scale: `min` at `bottom`, `max` at `top`.
    pub fn vertical(min: f64, max: f64, top: i32, bottom: i32) -> Self {
        Self::new(min, max, bottom as f32, top as f32)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        self.px0 + ((v - self.v0) / (self.v1 - self.v0)) as f32 * (self.px1 - self.px0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        self.v0 + ((px - self.px0) / (self.px1 - self.px0)) as f64 * (self.v1 - self.v0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_scale_grows_upward() {
        let s = LinearScale::vertical(0.0, 10.0, 20, 120);
        assert_eq!(s.to_px(0.0), 120.0);
        assert_eq!(s.to_px(10.0), 20.0);
        assert_eq!(s.to_px(5.0), 70.0);
        assert!((s.from_px(70.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let s = LinearScale::horizontal(3.0, 3.0, 0, 100);
        assert_eq!(s.to_px(3.0), 0.0);
        assert_eq!(s.to_px(4.0), 100.0);
    }
}
