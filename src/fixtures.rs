// shared builders for unit tests
use crate::service::{ClusteringResult, ClusteringSummary, Metrics, Point, QualityAssessment};

pub fn grid_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new((i % 10) as f64 * 10.0 + 5.0, (i / 10) as f64 * 10.0 + 5.0))
        .collect()
}

pub fn metrics(silhouette: f64, davies_bouldin: f64) -> Metrics {
    Metrics {
        silhouette_score: silhouette,
        davies_bouldin_index: davies_bouldin,
        inertia: 1520.3,
        mean_distance: 7.1,
        quality: QualityAssessment {
            total_score: 6.0,
            details: vec!["Compact clusters".to_string(), "Good separation".to_string()],
            recommendation: "Keep k".to_string(),
        },
    }
}

/// Result whose centroids drift by one unit per iteration
pub fn result_with(iterations: usize, k: usize, labels: Vec<usize>) -> ClusteringResult {
    let centroid_history = (0..iterations)
        .map(|it| {
            (0..k)
                .map(|c| Point::new(10.0 * c as f64 + it as f64, 10.0 * c as f64 + it as f64))
                .collect()
        })
        .collect();

    ClusteringResult {
        centroid_history,
        labels,
        summary: ClusteringSummary {
            requested_k: k,
            optimal_k: k.max(2) - 1,
        },
        metrics: metrics(0.72, 0.45),
    }
}

/// Labels `i % k` for `n` points
pub fn round_robin_labels(n: usize, k: usize) -> Vec<usize> {
    (0..n).map(|i| i % k).collect()
}
