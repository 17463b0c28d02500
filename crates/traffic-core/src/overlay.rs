// File: crates/traffic-core/src/overlay.rs
// Summary: Strokes projected detection rectangles onto a canvas-sized raster surface.

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::chart::{encode_png, raster_surface, write_png, RenderOptions};
use crate::geometry::{ImageSize, ProjectedRect};

/// Full redraw: clear, then stroke every rectangle. Returns PNG bytes.
pub fn render_rectangles_png(rects: &[ProjectedRect], canvas_size: ImageSize, opts: &RenderOptions) -> Result<Vec<u8>> {
    let width = i32::try_from(canvas_size.width())
        .with_context(|| format!("canvas width {} exceeds the raster limit", canvas_size.width()))?;
    let height = i32::try_from(canvas_size.height())
        .with_context(|| format!("canvas height {} exceeds the raster limit", canvas_size.height()))?;
    let mut surface = raster_surface(width, height)?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::TRANSPARENT);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_color(opts.theme.overlay_stroke);

    for r in rects {
        let c = r.to_corners();
        let rect = skia::Rect::from_ltrb(c.left as f32, c.top as f32, c.right as f32, c.bottom as f32);
        canvas.draw_rect(rect, &stroke);
    }

    encode_png(&mut surface)
}

pub fn render_rectangles_to_png(
    rects: &[ProjectedRect],
    canvas_size: ImageSize,
    opts: &RenderOptions,
    output_png_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let bytes = render_rectangles_png(rects, canvas_size, opts)?;
    write_png(output_png_path.as_ref(), &bytes)
}
