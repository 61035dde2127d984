// Public API exports
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod repl;
pub mod service;
pub mod state;
pub mod validate;

#[cfg(test)]
mod fixtures;

// Re-export main types for convenience
pub use config::{Config, ConfigError, DEFAULT_OUT_DIR, DEFAULT_SERVICE_URL};
pub use controller::{Controller, Outcome, Surface, SurfaceError, TerminalSurface};
pub use error::AppError;

pub use service::{
    ClusteringResult, ClusteringService, HttpServiceClient, KAnalysis, Point, ServiceError,
};

pub use state::{AppState, IterationCursor, SpaceDims, ViewState, cluster_counts};

pub use render::{CanvasId, ChartConfig, render_svg};

pub use validate::{GenerateParams, suggested_k_max, validate_k};
