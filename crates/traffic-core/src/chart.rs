// File: crates/traffic-core/src/chart.rs
// Summary: Time chart built from an aggregation and its headless PNG rendering using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use skia_safe as skia;

use crate::aggregate::Aggregation;
use crate::grid::{format_tick, linspace, time_ticks};
use crate::scale::LinearScale;
use crate::series::Series;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;
use crate::window::Window;
use crate::Axis;

pub const SERIES_LABEL: &str = "Number of Cars";

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
    pub max_ticks: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            max_ticks: 8,
        }
    }
}

/// Line chart of one aggregated series against a time axis.
pub struct TimeChart {
    pub window: Window,
    pub series: Series,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl TimeChart {
    /// Axes autoscale to the data; y begins at zero.
    pub fn from_aggregation(agg: &Aggregation) -> Self {
        let series = Series::from_aggregation(SERIES_LABEL, agg);
        let view = ViewState::from_series(&series);
        Self::with_view(agg.window, series, view)
    }

    /// x axis pinned to the trailing window ending at `now`.
    pub fn for_window(agg: &Aggregation, now: DateTime<Utc>) -> Self {
        let series = Series::from_aggregation(SERIES_LABEL, agg);
        let view = ViewState::for_window(&series, agg.window, now);
        Self::with_view(agg.window, series, view)
    }

    fn with_view(window: Window, series: Series, view: ViewState) -> Self {
        Self {
            window,
            series,
            x_axis: Axis::time("Time", view.x_min, view.x_max, window.unit()),
            y_axis: Axis::new(SERIES_LABEL, view.y_min, view.y_max),
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.data_xy.len()
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        write_png(output_png_path.as_ref(), &bytes)
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = raster_surface(opts.width, opts.height)?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);

        let plot = opts.insets.plot_rect(opts.width, opts.height);
        let sx = LinearScale::horizontal(self.x_axis.min, self.x_axis.max, plot.left, plot.right);
        let sy = LinearScale::vertical(self.y_axis.min, self.y_axis.max, plot.top, plot.bottom);

        // Grid & axes
        let x_ticks = match self.x_axis.unit {
            Some(unit) => time_ticks(self.x_axis.min, self.x_axis.max, unit, opts.max_ticks),
            None => Vec::new(),
        };
        let y_ticks = linspace(self.y_axis.min, self.y_axis.max, 6);
        draw_grid(canvas, &opts.theme, plot.left, plot.top, plot.right, plot.bottom, &x_ticks, &y_ticks, &sx, &sy);
        draw_axes(canvas, &opts.theme, plot.left, plot.top, plot.right, plot.bottom);
        if opts.draw_labels {
            draw_labels(canvas, opts, self, &x_ticks, &y_ticks, &sx, &sy);
        }

        draw_line_series(canvas, &opts.theme, &self.series, &sx, &sy);

        encode_png(&mut surface)
    }
}

// ---- helpers ----------------------------------------------------------------

pub(crate) fn raster_surface(width: i32, height: i32) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((width.max(1), height.max(1)))
        .ok_or_else(|| anyhow::anyhow!("failed to create {width}x{height} raster surface"))
}

pub(crate) fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

pub(crate) fn write_png(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write '{}'", path.display()))
}

#[allow(clippy::too_many_arguments)]
fn draw_grid(
    canvas: &skia::Canvas,
    theme: &Theme,
    l: i32, t: i32, r: i32, b: i32,
    x_ticks: &[i64],
    y_ticks: &[f64],
    sx: &LinearScale,
    sy: &LinearScale,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals on time ticks
    for &x in x_ticks {
        let px = sx.to_px(x as f64);
        canvas.draw_line((px, t as f32), (px, b as f32), &paint);
    }
    // horizontals
    for &y in y_ticks {
        let py = sy.to_px(y);
        canvas.draw_line((l as f32, py), (r as f32, py), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, theme: &Theme, l: i32, t: i32, r: i32, b: i32) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    canvas.draw_line((l as f32, b as f32), (r as f32, b as f32), &axis_paint);
    canvas.draw_line((l as f32, t as f32), (l as f32, b as f32), &axis_paint);
}

fn draw_labels(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    chart: &TimeChart,
    x_ticks: &[i64],
    y_ticks: &[f64],
    sx: &LinearScale,
    sy: &LinearScale,
) {
    let plot = opts.insets.plot_rect(opts.width, opts.height);
    let mut paint_text = skia::Paint::default();
    paint_text.set_color(opts.theme.tick);
    let mut font = skia::Font::default();
    font.set_size(12.0);

    if let Some(unit) = chart.x_axis.unit {
        for &x in x_ticks {
            let caption = format_tick(x, unit);
            canvas.draw_str(&caption, (sx.to_px(x as f64) - 16.0, plot.bottom as f32 + 16.0), &font, &paint_text);
        }
    }
    for &y in y_ticks {
        let caption = format!("{}", y.round() as i64);
        canvas.draw_str(&caption, (plot.left as f32 - 36.0, sy.to_px(y) + 4.0), &font, &paint_text);
    }

    paint_text.set_color(opts.theme.axis_label);
    font.set_size(14.0);
    canvas.draw_str(&chart.series.label, (plot.left as f32, plot.top as f32 - 4.0), &font, &paint_text);
}

fn draw_line_series(canvas: &skia::Canvas, theme: &Theme, series: &Series, sx: &LinearScale, sy: &LinearScale) {
    let data = &series.data_xy;
    let Some(&(x0, y0)) = data.first() else { return };

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_color(theme.line_stroke);

    // a single bucket still shows up as a dot
    if data.len() == 1 {
        stroke.set_style(skia::paint::Style::Fill);
        canvas.draw_circle((sx.to_px(x0), sy.to_px(y0)), 3.0, &stroke);
        return;
    }

    let mut path = skia::Path::new();
    path.move_to((sx.to_px(x0), sy.to_px(y0)));
    for &(x, y) in data.iter().skip(1) {
        path.line_to((sx.to_px(x), sy.to_px(y)));
    }

    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(1.0);
    canvas.draw_path(&path, &stroke);
}
