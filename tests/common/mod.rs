#![allow(dead_code)]

use hospital_kmeans::controller::{Surface, SurfaceError};
use hospital_kmeans::render::{
    CanvasId, ChartHandle, ClusterCard, HospitalEntry, MetricCard, QualityPanel, StatsPanel,
};
use hospital_kmeans::service::{
    ClusteringRequest, ClusteringResult, ClusteringService, ClusteringSummary, GenerateRequest,
    GenerateResponse, KAnalysis, KAnalysisRequest, KScore, Metrics, Point, QualityAssessment,
    ServiceError,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

pub const FAKE_URL: &str = "http://fake-service.test";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Generate { count: u32, space_size: u32 },
    Compute { k: usize, points: usize, space_size: u32 },
    Analyze { k_max: usize, points: usize },
}

/// In-process stand-in for the clustering service
#[derive(Default)]
pub struct FakeService {
    pub calls: RefCell<Vec<Call>>,
    /// Popped once per call; no delay when empty
    pub delays: RefCell<VecDeque<Duration>>,
    /// Returned (once) instead of a response
    pub server_error: RefCell<Option<(u16, String)>>,
    pub iterations: usize,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            iterations: 4,
            ..Self::default()
        }
    }

    pub fn with_delays(delays: &[u64]) -> Self {
        let service = Self::new();
        service
            .delays
            .borrow_mut()
            .extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
        service
    }

    pub fn fail_next(&self, status: u16, body: &str) {
        *self.server_error.borrow_mut() = Some((status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    async fn respond(&self, call: Call) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(call);
        let delay = self.delays.borrow_mut().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.server_error.borrow_mut().take() {
            Some((status, body)) => Err(ServiceError::Server { status, body }),
            None => Ok(()),
        }
    }
}

impl ClusteringService for FakeService {
    fn base_url(&self) -> &str {
        FAKE_URL
    }

    async fn generate_points(
        &self,
        req: &GenerateRequest,
    ) -> Result<GenerateResponse, ServiceError> {
        self.respond(Call::Generate {
            count: req.count,
            space_size: req.space_size,
        })
        .await?;

        let size = req.space_size as f64;
        let points = (0..req.count)
            .map(|i| {
                let i = i as f64;
                Point::new((i * 37.0) % size, (i * 53.0) % size)
            })
            .collect();
        Ok(GenerateResponse { points })
    }

    async fn compute_clustering(
        &self,
        req: &ClusteringRequest<'_>,
    ) -> Result<ClusteringResult, ServiceError> {
        self.respond(Call::Compute {
            k: req.k,
            points: req.points.len(),
            space_size: req.space_size,
        })
        .await?;

        let centroid_history = (0..self.iterations)
            .map(|it| {
                req.points
                    .iter()
                    .take(req.k)
                    .map(|p| Point::new(p.x + it as f64, p.y))
                    .collect()
            })
            .collect();

        Ok(ClusteringResult {
            centroid_history,
            labels: (0..req.points.len()).map(|i| i % req.k).collect(),
            summary: ClusteringSummary {
                requested_k: req.k,
                optimal_k: 3,
            },
            metrics: Metrics {
                silhouette_score: 0.75,
                davies_bouldin_index: 0.8,
                inertia: 2048.0,
                mean_distance: 9.5,
                quality: QualityAssessment {
                    total_score: 5.0,
                    details: vec!["Balanced clusters".to_string()],
                    recommendation: "Try k=3".to_string(),
                },
            },
        })
    }

    async fn analyze_optimal_k(
        &self,
        req: &KAnalysisRequest<'_>,
    ) -> Result<KAnalysis, ServiceError> {
        self.respond(Call::Analyze {
            k_max: req.k_max,
            points: req.points.len(),
        })
        .await?;

        let results = (2..=req.k_max.max(2))
            .map(|k| KScore {
                k,
                inertia: 1000.0 / k as f64,
                silhouette: 0.4 + 0.01 * k as f64,
            })
            .collect();
        Ok(KAnalysis {
            results,
            optimal_k: 3,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Presented {
    pub canvas: CanvasId,
    pub title: String,
    pub revision: u64,
}

/// Surface that remembers everything it was asked to show
#[derive(Default)]
pub struct RecordingSurface {
    pub notices: Vec<String>,
    pub busy: Vec<bool>,
    pub k_inputs: Vec<usize>,
    pub stats: Vec<StatsPanel>,
    pub metrics: Vec<Vec<MetricCard>>,
    pub quality: Vec<QualityPanel>,
    pub summaries: Vec<Vec<ClusterCard>>,
    pub summary_clears: usize,
    pub hospital_panels: Vec<Vec<HospitalEntry>>,
    pub iteration_labels: Vec<(usize, usize)>,
    pub presented: Vec<Presented>,
    pub hidden: usize,
    pub broken_side_panel: bool,
}

impl RecordingSurface {
    pub fn last_presented(&self, canvas: CanvasId) -> Option<&Presented> {
        self.presented.iter().rev().find(|p| p.canvas == canvas)
    }
}

impl Surface for RecordingSurface {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy.push(busy);
    }

    fn set_k_input(&mut self, k: usize) {
        self.k_inputs.push(k);
    }

    fn show_stats(&mut self, stats: &StatsPanel) {
        self.stats.push(*stats);
    }

    fn show_metrics(&mut self, cards: &[MetricCard]) {
        self.metrics.push(cards.to_vec());
    }

    fn show_quality(&mut self, panel: &QualityPanel) {
        self.quality.push(panel.clone());
    }

    fn show_cluster_summary(&mut self, cards: &[ClusterCard]) {
        self.summaries.push(cards.to_vec());
    }

    fn clear_cluster_summary(&mut self) {
        self.summary_clears += 1;
    }

    fn show_hospital_panel(&mut self, entries: &[HospitalEntry]) -> Result<(), SurfaceError> {
        if self.broken_side_panel {
            return Err(SurfaceError("side panel missing".to_string()));
        }
        self.hospital_panels.push(entries.to_vec());
        Ok(())
    }

    fn clear_hospital_panel(&mut self) -> Result<(), SurfaceError> {
        if self.broken_side_panel {
            return Err(SurfaceError("side panel missing".to_string()));
        }
        Ok(())
    }

    fn show_iteration_label(&mut self, current: usize, total: usize) {
        self.iteration_labels.push((current, total));
    }

    fn present_chart(&mut self, chart: &ChartHandle) {
        self.presented.push(Presented {
            canvas: chart.canvas(),
            title: chart.config().title().to_string(),
            revision: chart.revision(),
        });
    }

    fn hide_sections(&mut self) {
        self.hidden += 1;
    }
}
