// File: crates/traffic-demo/src/main.rs
// Summary: Demo loads a car count history (CSV or JSON payload), aggregates it for a window
//          and renders the statistics chart plus an optional detection overlay to PNGs.
// Usage:   traffic-demo <history.csv|history.json> [hour|day|week|month|year]
//                       [rectangles.json <natural WxH> <canvas WxH>]

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use traffic_core::overlay::render_rectangles_to_png;
use traffic_core::widget::badge;
use traffic_core::{
    decode_series, parse_timestamp, CameraOverlayView, Observation, StatisticsStore,
    StatisticsView, Window,
};

fn main() -> Result<()> {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("traffic_core"), my_code_level)
        .filter(Some("traffic_demo"), my_code_level)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(input) = args.first() else {
        anyhow::bail!("usage: traffic-demo <history.csv|history.json> [window] [rectangles.json NWxNH CWxCH]");
    };
    let path = PathBuf::from(input);
    let window = args.get(1).map(|t| Window::from_token(t)).unwrap_or_default();

    let history = load_history(&path).with_context(|| format!("failed to load '{}'", path.display()))?;
    if history.is_empty() {
        anyhow::bail!("no observations loaded; check the header is `time,nr_cars`");
    }
    println!("Loaded {} observations", history.len());

    // Evaluate relative to the newest sample so old captures still chart.
    let now = history.iter().map(|o| o.timestamp).max().unwrap_or_else(Utc::now);
    let location = path.file_stem().and_then(|s| s.to_str()).unwrap_or("camera").to_string();

    let mut store = StatisticsStore::new();
    for o in &history {
        if let Err(e) = store.insert(&location, o.timestamp, o.count) {
            log::warn!("skipping sample: {e}");
        }
    }
    if let Some(latest) = store.series(&location).last() {
        let measure = store.measure(&location, latest.count);
        let b = badge(measure);
        println!("Traffic at {}: {} ({})", location, b.text, b.color);
    }

    let mut view = StatisticsView::new(location.clone()).with_window(window);
    let chart = view.set_data(store.payload(&location), now);
    let out = out_name_with(&path, window.token());
    chart.render_to_png(&Default::default(), &out)?;
    println!("Wrote {} ({} window, {} points)", out.display(), window.label(), chart.point_count());

    if let Some(agg) = view.aggregation() {
        println!("{}", agg.to_chart_json()?);
    }

    if let [_, _, rects, natural, canvas, ..] = args.as_slice() {
        render_overlay(&path, Path::new(rects), natural, canvas)?;
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Row {
    time: String,
    nr_cars: i64,
}

/// `.csv` files carry `time,nr_cars` rows; anything else is read as the attribute payload.
fn load_history(path: &Path) -> Result<Vec<Observation>> {
    let is_csv = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        let text = std::fs::read_to_string(path)?;
        return Ok(decode_series(&text));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<Row>().enumerate() {
        let row = match rec {
            Ok(row) => row,
            Err(e) => {
                log::warn!("row {}: {e}", i + 1);
                continue;
            }
        };
        match parse_timestamp(&row.time) {
            Some(ts) => out.push(Observation::new(ts, row.nr_cars)),
            None => log::warn!("row {}: unreadable time '{}'", i + 1, row.time),
        }
    }
    out.sort_by_key(|o| o.timestamp);
    Ok(out)
}

fn render_overlay(input: &Path, rects: &Path, natural: &str, canvas: &str) -> Result<()> {
    let (nw, nh) = parse_size(natural)?;
    let (cw, ch) = parse_size(canvas)?;
    let payload = std::fs::read_to_string(rects).with_context(|| format!("failed to read '{}'", rects.display()))?;

    let mut overlay = CameraOverlayView::new();
    overlay.set_rectangles(&payload);
    overlay.image_loaded(nw, nh);
    overlay.resize_canvas(cw, ch);
    let drawn = overlay.redraw().to_vec();
    let Some(size) = overlay.canvas_size() else {
        anyhow::bail!("canvas size must be non-zero, got {canvas}");
    };

    let out = out_name_with(input, "overlay");
    render_rectangles_to_png(&drawn, size, &Default::default(), &out)?;
    println!("Wrote {} ({} rectangles)", out.display(), drawn.len());
    Ok(())
}

/// `640x360` -> (640, 360)
fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

/// Produce output file name like target/out/traffic_<stem>_<suffix>.png; the writers create the directory.
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("traffic");
    let mut out = PathBuf::from("target/out");
    out.push(format!("traffic_{}_{}.png", stem, suffix));
    out
}

