use super::palette::cluster_color;
use crate::service::{ClusteringResult, Metrics, Point};
use crate::state::{SpaceDims, cluster_counts};
use std::fmt;

pub const SILHOUETTE_GOOD: f64 = 0.7;
pub const SILHOUETTE_WARNING: f64 = 0.5;
pub const DAVIES_BOULDIN_GOOD: f64 = 0.5;
pub const DAVIES_BOULDIN_WARNING: f64 = 1.0;

/// Which direction of a metric is the desirable one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricClass {
    Good,
    Warning,
    Poor,
}

impl MetricClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricClass::Good => "good",
            MetricClass::Warning => "warning",
            MetricClass::Poor => "poor",
        }
    }
}

impl fmt::Display for MetricClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(value: f64, good: f64, warning: f64, orientation: Orientation) -> MetricClass {
    match orientation {
        Orientation::HigherIsBetter if value >= good => MetricClass::Good,
        Orientation::HigherIsBetter if value >= warning => MetricClass::Warning,
        Orientation::LowerIsBetter if value <= good => MetricClass::Good,
        Orientation::LowerIsBetter if value <= warning => MetricClass::Warning,
        _ => MetricClass::Poor,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
    /// None for metrics without thresholds
    pub class: Option<MetricClass>,
}

pub fn metric_cards(metrics: &Metrics) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Silhouette Score",
            value: format!("{:.3}", metrics.silhouette_score),
            caption: "Cohesion vs separation (-1 to 1)",
            class: Some(classify(
                metrics.silhouette_score,
                SILHOUETTE_GOOD,
                SILHOUETTE_WARNING,
                Orientation::HigherIsBetter,
            )),
        },
        MetricCard {
            title: "Davies-Bouldin",
            value: format!("{:.3}", metrics.davies_bouldin_index),
            caption: "Separation (lower is better)",
            class: Some(classify(
                metrics.davies_bouldin_index,
                DAVIES_BOULDIN_GOOD,
                DAVIES_BOULDIN_WARNING,
                Orientation::LowerIsBetter,
            )),
        },
        MetricCard {
            title: "Inertia",
            value: format!("{:.1}", metrics.inertia),
            caption: "Sum of squared distances",
            class: None,
        },
        MetricCard {
            title: "Mean distance",
            value: format!("{:.2}", metrics.mean_distance),
            caption: "Units to the nearest hospital",
            class: None,
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityPanel {
    pub title: String,
    pub score_badge: String,
    pub details: Vec<String>,
    pub recommendation: String,
}

impl QualityPanel {
    pub fn from_result(result: &ClusteringResult) -> Self {
        let quality = &result.metrics.quality;
        Self {
            title: format!(
                "Assessment for k={} (optimal: k={})",
                result.summary.requested_k, result.summary.optimal_k
            ),
            score_badge: format!("{}/8", quality.total_score),
            details: quality.details.clone(),
            recommendation: quality.recommendation.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsPanel {
    pub width: u32,
    pub height: u32,
    pub houses: usize,
    /// Requested k of the current result, 0 without one
    pub hospitals: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterCard {
    /// 1-based
    pub number: usize,
    pub count: usize,
    pub color: &'static str,
}

pub fn cluster_cards(labels: &[usize], k: usize) -> Vec<ClusterCard> {
    cluster_counts(labels, k)
        .into_iter()
        .enumerate()
        .map(|(cluster, count)| ClusterCard {
            number: cluster + 1,
            count,
            color: cluster_color(cluster),
        })
        .collect()
}

/// One line of the hospital side panel
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalEntry {
    /// 1-based
    pub number: usize,
    pub location: Point,
    pub houses: usize,
}

impl fmt::Display for HospitalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} ({:.1}, {:.1}) - {} houses",
            self.number, self.location.x, self.location.y, self.houses
        )
    }
}

pub fn hospital_entries(centroids: &[Point], labels: &[usize]) -> Vec<HospitalEntry> {
    let counts = cluster_counts(labels, centroids.len());
    centroids
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (location, houses))| HospitalEntry {
            number: i + 1,
            location: *location,
            houses,
        })
        .collect()
}

impl StatsPanel {
    pub fn new(dims: SpaceDims, houses: usize, result: Option<&ClusteringResult>) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            houses,
            hospitals: result.map_or(0, |r| r.summary.requested_k),
        }
    }
}
