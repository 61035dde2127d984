// the service contract: Spanish names on the wire, English names in Rust
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A house or hospital location, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    #[serde(rename = "n_vecindarios")]
    pub count: u32,
    #[serde(rename = "tamano_espacio")]
    pub space_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "vecindarios")]
    pub points: Vec<Point>,
}

#[derive(Debug, Serialize)]
pub struct ClusteringRequest<'a> {
    #[serde(rename = "vecindarios")]
    pub points: &'a [Point],
    pub k: usize,
    #[serde(rename = "tamano_espacio")]
    pub space_size: u32,
}

#[derive(Debug, Serialize)]
pub struct KAnalysisRequest<'a> {
    #[serde(rename = "vecindarios")]
    pub points: &'a [Point],
    pub k_max: usize,
    #[serde(rename = "tamano_espacio")]
    pub space_size: u32,
}

/// Full response of a clustering request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClusteringResult {
    /// Centroid snapshots, one entry per algorithm iteration
    #[serde(rename = "historial_centroides")]
    pub centroid_history: Vec<Vec<Point>>,
    /// Final cluster index of every point, in point order
    #[serde(rename = "etiquetas")]
    pub labels: Vec<usize>,
    #[serde(rename = "resumen")]
    pub summary: ClusteringSummary,
    #[serde(rename = "metricas")]
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClusteringSummary {
    #[serde(rename = "k_usuario")]
    pub requested_k: usize,
    #[serde(rename = "k_optimo")]
    pub optimal_k: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metrics {
    pub silhouette_score: f64,
    /// Lower is better
    pub davies_bouldin_index: f64,
    #[serde(rename = "inercia")]
    pub inertia: f64,
    #[serde(rename = "distancia_promedio")]
    pub mean_distance: f64,
    #[serde(rename = "evaluacion_calidad")]
    pub quality: QualityAssessment,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityAssessment {
    /// Score out of 8
    #[serde(rename = "puntuacion_total")]
    pub total_score: f64,
    #[serde(rename = "detalles")]
    pub details: Vec<String>,
    #[serde(rename = "recomendacion")]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KAnalysis {
    #[serde(rename = "resultados")]
    pub results: Vec<KScore>,
    #[serde(rename = "k_optimo")]
    pub optimal_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KScore {
    pub k: usize,
    #[serde(rename = "inercia")]
    pub inertia: f64,
    pub silhouette: f64,
}

/// Ways a clustering response can disagree with the point set it was computed for
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultShapeError {
    #[error("centroid history is empty")]
    EmptyHistory,

    #[error("iteration {iteration} has {found} centroids, expected {expected}")]
    CentroidCountMismatch {
        iteration: usize,
        found: usize,
        expected: usize,
    },

    #[error("{labels} labels for {points} points")]
    LabelCountMismatch { labels: usize, points: usize },

    #[error("label {label} at position {position} is not below k={k}")]
    LabelOutOfRange {
        position: usize,
        label: usize,
        k: usize,
    },
}

impl ClusteringResult {
    /// Number of clusters, taken from the first centroid snapshot
    pub fn k(&self) -> usize {
        self.centroid_history.first().map_or(0, Vec::len)
    }

    /// Check that every iteration has k centroids and every label indexes one of them
    pub fn validate(&self, point_count: usize) -> Result<(), ResultShapeError> {
        let k = match self.centroid_history.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(ResultShapeError::EmptyHistory),
        };

        for (iteration, centroids) in self.centroid_history.iter().enumerate() {
            if centroids.len() != k {
                return Err(ResultShapeError::CentroidCountMismatch {
                    iteration,
                    found: centroids.len(),
                    expected: k,
                });
            }
        }

        if self.labels.len() != point_count {
            return Err(ResultShapeError::LabelCountMismatch {
                labels: self.labels.len(),
                points: point_count,
            });
        }

        if let Some((position, &label)) = self.labels.iter().enumerate().find(|(_, l)| **l >= k) {
            return Err(ResultShapeError::LabelOutOfRange { position, label, k });
        }

        Ok(())
    }
}
