// File: crates/traffic-core/src/widget.rs
// Summary: Per-widget state: statistics view (owned chart handle), camera overlay view,
//          navigation mode and the camera card selection.
// Notes:
// - Each widget owns its derived state exclusively; nothing here is shared.
// - A chart is always torn down before its replacement is built.

use chrono::{DateTime, FixedOffset, Utc};

use crate::aggregate::{aggregate_with_offset, utc_offset, Aggregation};
use crate::chart::TimeChart;
use crate::config::CardConfig;
use crate::geometry::{decode_rectangles, ImageSize, ProjectedRect, Projector, Rectangle};
use crate::observation::decode_series_in;
use crate::statistics::TrafficMeasure;
use crate::window::Window;

/// Statistics chart for one camera.
pub struct StatisticsView {
    name: String,
    data: String,
    window: Window,
    offset: FixedOffset,
    aggregation: Option<Aggregation>,
    chart: Option<TimeChart>,
    builds: usize,
}

impl StatisticsView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: String::new(),
            window: Window::default(),
            offset: utc_offset(),
            aggregation: None,
            chart: None,
            builds: 0,
        }
    }

    /// Opens on the card's configured window.
    pub fn from_config(name: impl Into<String>, config: &CardConfig) -> Self {
        Self::new(name).with_window(config.window)
    }

    /// Initial window; nothing is built until data arrives.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Bucket boundaries and offset-less timestamps follow this wall clock instead of UTC.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// New snapshot from the host; rebuilds from the full series.
    pub fn set_data(&mut self, payload: impl Into<String>, now: DateTime<Utc>) -> &TimeChart {
        self.data = payload.into();
        self.rebuild(now)
    }

    pub fn select_window(&mut self, window: Window, now: DateTime<Utc>) -> &TimeChart {
        self.window = window;
        self.rebuild(now)
    }

    /// Selector input; unknown tokens select the hour window.
    pub fn select_token(&mut self, token: &str, now: DateTime<Utc>) -> &TimeChart {
        self.select_window(Window::from_token(token), now)
    }

    pub fn rebuild(&mut self, now: DateTime<Utc>) -> &TimeChart {
        self.teardown();
        let series = decode_series_in(&self.data, self.offset);
        let agg = aggregate_with_offset(&series, self.window, now, self.offset);
        let chart = TimeChart::from_aggregation(&agg);
        self.builds += 1;
        log::info!(
            "{}: built {} chart with {} points from {} observations",
            self.name,
            self.window,
            agg.points.len(),
            series.len()
        );
        self.aggregation = Some(agg);
        &*self.chart.insert(chart)
    }

    /// Release the current chart. Returns whether one was live.
    pub fn teardown(&mut self) -> bool {
        self.aggregation = None;
        match self.chart.take() {
            Some(chart) => {
                log::info!("{}: tearing down {} chart", self.name, chart.window);
                true
            }
            None => false,
        }
    }

    pub fn chart(&self) -> Option<&TimeChart> {
        self.chart.as_ref()
    }

    pub fn aggregation(&self) -> Option<&Aggregation> {
        self.aggregation.as_ref()
    }

    /// How many charts this view has built over its lifetime.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

impl Drop for StatisticsView {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Big camera image with detection rectangles drawn over it.
#[derive(Default)]
pub struct CameraOverlayView {
    rectangles: Vec<Rectangle>,
    natural: Option<ImageSize>,
    canvas: Option<ImageSize>,
    drawn: Vec<ProjectedRect>,
}

impl CameraOverlayView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rectangles(&mut self, payload: &str) {
        self.rectangles = decode_rectangles(payload);
    }

    /// Natural size of the loaded image; zero means not loaded yet.
    pub fn image_loaded(&mut self, width: u32, height: u32) {
        self.natural = ImageSize::new(width, height);
    }

    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.canvas = ImageSize::new(width, height);
    }

    /// Available only once both sizes are known and non-zero.
    pub fn projector(&self) -> Option<Projector> {
        Some(Projector::new(self.natural?, self.canvas?))
    }

    pub fn canvas_size(&self) -> Option<ImageSize> {
        self.canvas
    }

    /// Clear and re-project the full rectangle set.
    pub fn redraw(&mut self) -> &[ProjectedRect] {
        self.drawn.clear();
        match self.projector() {
            Some(p) => self.drawn = p.project_all(&self.rectangles),
            None if !self.rectangles.is_empty() => {
                log::warn!("deferring {} rectangles until image and canvas sizes are known", self.rectangles.len());
            }
            None => {}
        }
        &self.drawn
    }

    pub fn drawn(&self) -> &[ProjectedRect] {
        &self.drawn
    }
}

/// Which face of the big view is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Image,
    Statistics,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Image => "Image",
            ViewMode::Statistics => "Statistics",
        }
    }

    pub fn can_go_left(self) -> bool {
        self == ViewMode::Statistics
    }

    pub fn can_go_right(self) -> bool {
        self == ViewMode::Image
    }

    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Image => ViewMode::Statistics,
            ViewMode::Statistics => ViewMode::Image,
        }
    }
}

/// Colored label next to a camera in the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub color: &'static str,
    pub text: &'static str,
}

pub fn badge(measure: TrafficMeasure) -> Badge {
    match measure {
        TrafficMeasure::Low => Badge { color: "#00ff00", text: "low" },
        TrafficMeasure::Medium => Badge { color: "#ffff00", text: "medium" },
        TrafficMeasure::High => Badge { color: "#ff8800", text: "high" },
        TrafficMeasure::Critical => Badge { color: "#ff0000", text: "critical" },
        TrafficMeasure::Unknown => Badge { color: "#ffffff", text: "SOMETHING WENT WRONG" },
    }
}

/// Badge for a raw attribute label; an absent label reads as low traffic.
pub fn badge_for_label(label: Option<&str>) -> Badge {
    let measure = match label.unwrap_or("low") {
        "low" => TrafficMeasure::Low,
        "medium" => TrafficMeasure::Medium,
        "high" => TrafficMeasure::High,
        "critical" => TrafficMeasure::Critical,
        _ => TrafficMeasure::Unknown,
    };
    badge(measure)
}

/// Camera list selection plus the big view's mode.
pub struct CameraCard {
    config: CardConfig,
    selected: usize,
    mode: ViewMode,
}

impl CameraCard {
    pub fn new(config: CardConfig) -> Self {
        Self { config, selected: 0, mode: ViewMode::default() }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Out-of-range indices leave the selection unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.config.cameras.len() {
            return false;
        }
        self.selected = index;
        true
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_camera(&self) -> Option<&str> {
        self.config.cameras.get(self.selected).map(String::as_str)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Statistics view for the selected camera, opened on the configured window.
    pub fn statistics_view(&self) -> Option<StatisticsView> {
        self.selected_camera().map(|name| StatisticsView::from_config(name, &self.config))
    }

    pub fn navigate(&mut self) -> ViewMode {
        self.mode = self.mode.toggle();
        self.mode
    }
}
