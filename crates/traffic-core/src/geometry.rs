// File: crates/traffic-core/src/geometry.rs
// Summary: Pixel geometry for detection overlays: rectangles, image sizes and source-to-canvas projection.
// Notes:
// - Detector rectangles arrive as `{x1, y1, x2, y2}` where (x1, y1) is the top-left
//   corner and (x2, y2) is the box extent (width, height) from that corner.
// - Projection is a per-axis linear scale about the origin, so extents and
//   corners scale by the same factors.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::observation::parse_payload;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Detected object in the source image's native pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rectangle {
    pub const fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Rectangle remapped into destination canvas pixels; same field layout as [`Rectangle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectedRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl ProjectedRect {
    pub const fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Absolute corners for stroking.
    pub const fn to_corners(&self) -> RectI32 {
        RectI32::from_ltwh(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Pixel dimensions that are never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl ImageSize {
    /// `None` while either dimension is still unknown (zero).
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self { width: NonZeroU32::new(width)?, height: NonZeroU32::new(height)? })
    }

    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height).ok_or(Error::InvalidImageSize { width, height })
    }

    pub const fn width(&self) -> u32 { self.width.get() }
    pub const fn height(&self) -> u32 { self.height.get() }
}

/// Per-axis scale from a source image onto a destination canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Projector {
    pub fn new(source: ImageSize, dest: ImageSize) -> Self {
        Self {
            scale_x: f64::from(dest.width()) / f64::from(source.width()),
            scale_y: f64::from(dest.height()) / f64::from(source.height()),
        }
    }

    pub fn project(&self, rect: &Rectangle) -> ProjectedRect {
        let sx = |v: i64| scale_px(v, self.scale_x);
        let sy = |v: i64| scale_px(v, self.scale_y);
        ProjectedRect { x1: sx(rect.x1), y1: sy(rect.y1), x2: sx(rect.x2), y2: sy(rect.y2) }
    }

    pub fn project_all(&self, rects: &[Rectangle]) -> Vec<ProjectedRect> {
        rects.iter().map(|r| self.project(r)).collect()
    }
}

/// Round half away from zero, saturating at the i32 range.
fn scale_px(v: i64, scale: f64) -> i32 {
    let px = (v as f64 * scale).round();
    clamp(px, f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// One-shot projection of a single rectangle.
pub fn project(rect: &Rectangle, source: ImageSize, dest: ImageSize) -> ProjectedRect {
    Projector::new(source, dest).project(rect)
}

/// Decode the host's rectangle payload (`[{"x1":..,"y1":..,"x2":..,"y2":..}, ...]`).
/// Malformed payloads are empty; malformed entries are skipped.
pub fn decode_rectangles(payload: &str) -> Vec<Rectangle> {
    match parse_payload(payload) {
        Some(v) => decode_rectangles_value(&v),
        None => Vec::new(),
    }
}

pub fn decode_rectangles_value(value: &Value) -> Vec<Rectangle> {
    let Some(entries) = value.as_array() else {
        log::debug!("rectangle payload is not an array; treating as empty");
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|e| serde_json::from_value::<Rectangle>(e.clone()).ok())
        .collect()
}
