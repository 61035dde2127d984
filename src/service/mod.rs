pub mod client;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{
    CLUSTERING_PATH, ClusteringService, GENERATE_PATH, HttpServiceClient, K_ANALYSIS_PATH,
    ServiceError,
};
pub use types::{
    ClusteringRequest, ClusteringResult, ClusteringSummary, GenerateRequest, GenerateResponse,
    KAnalysis, KAnalysisRequest, KScore, Metrics, Point, QualityAssessment, ResultShapeError,
};
