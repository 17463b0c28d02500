// File: crates/traffic-core/src/lib.rs
// Summary: Core library entry point; exports the aggregation/projection kernels, widget state and chart rendering.

pub mod error;
pub mod observation;
pub mod window;
pub mod aggregate;
pub mod geometry;
pub mod statistics;
pub mod config;
pub mod widget;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod scale;
pub mod view;
pub mod theme;
pub mod chart;
pub mod overlay;

pub use error::{Error, Result};
pub use observation::{decode_series, decode_series_in, parse_timestamp, parse_timestamp_in, Observation};
pub use window::{BucketWidth, TimeUnit, Window};
pub use aggregate::{aggregate, aggregate_with_offset, round_half_up_mean, AggregatedPoint, Aggregation, ChartPoint};
pub use geometry::{decode_rectangles, project, ImageSize, ProjectedRect, Projector, Rectangle};
pub use statistics::{classify, StatisticsStore, TrafficMeasure};
pub use config::CardConfig;
pub use widget::{CameraCard, CameraOverlayView, StatisticsView, ViewMode};
pub use series::Series;
pub use axis::Axis;
pub use view::ViewState;
pub use theme::Theme;
pub use chart::{RenderOptions, TimeChart};
pub use overlay::render_rectangles_png;
