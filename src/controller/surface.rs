use crate::render::{ChartHandle, ClusterCard, HospitalEntry, MetricCard, QualityPanel, StatsPanel};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("surface region unavailable: {0}")]
pub struct SurfaceError(pub String);

/// The addressable regions the controller writes to
///
/// Every method except the hospital panel ones is infallible from the
/// controller's point of view; the side panel is optional and its
/// failures are only logged.
pub trait Surface {
    /// Blocking user-facing message
    fn notify(&mut self, message: &str);

    fn set_busy(&mut self, busy: bool);

    /// Reflect a corrected k back into the k input
    fn set_k_input(&mut self, k: usize);

    fn show_stats(&mut self, stats: &StatsPanel);

    fn show_metrics(&mut self, cards: &[MetricCard]);

    fn show_quality(&mut self, panel: &QualityPanel);

    fn show_cluster_summary(&mut self, cards: &[ClusterCard]);

    fn clear_cluster_summary(&mut self);

    fn show_hospital_panel(&mut self, entries: &[HospitalEntry]) -> Result<(), SurfaceError>;

    fn clear_hospital_panel(&mut self) -> Result<(), SurfaceError>;

    /// `current` is 1-based
    fn show_iteration_label(&mut self, current: usize, total: usize);

    /// Draw (or redraw) the live chart of one canvas
    fn present_chart(&mut self, chart: &ChartHandle);

    /// Hide the metrics, quality and comparison sections
    fn hide_sections(&mut self);
}
