//! Chart configurations, canvas ownership and panel models.
//!
//! Builders turn application state into [`ChartConfig`] values; a
//! [`Canvas`] owns the single live chart for its slot and releases it
//! before a replacement is built. [`render_svg`] rasterizes a config to
//! SVG and runs the overlays registered by [`install_overlays`].

mod canvas;
mod chart;
mod overlay;
mod palette;
mod panels;
mod svg;


pub use canvas::{Canvas, CanvasId, Canvases, ChartHandle, ChartRegistry};
pub use chart::{
    AxisWindow, ChartConfig, ChartKind, DataValue, Dataset, DatasetRole, PointStyle,
    cluster_result, k_comparison, point_map,
};
pub use overlay::{CentroidLabels, Overlay, install_overlays, installed};
pub use palette::{CLUSTER_COLORS, cluster_color};
pub use panels::{
    ClusterCard, HospitalEntry, MetricCard, MetricClass, Orientation, QualityPanel, StatsPanel,
    classify, cluster_cards, hospital_entries, metric_cards,
};
pub use svg::{Frame, render_svg};
