use super::types::*;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const GENERATE_PATH: &str = "/generar-vecindarios";
pub const CLUSTERING_PATH: &str = "/calcular-hospitales";
pub const K_ANALYSIS_PATH: &str = "/analizar-k-optimo";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err)
        }
    }
}

/// The remote clustering service, as seen by the controller
#[allow(async_fn_in_trait)]
pub trait ClusteringService {
    /// Address quoted in transport error messages
    fn base_url(&self) -> &str;

    async fn generate_points(
        &self,
        req: &GenerateRequest,
    ) -> Result<GenerateResponse, ServiceError>;

    async fn compute_clustering(
        &self,
        req: &ClusteringRequest<'_>,
    ) -> Result<ClusteringResult, ServiceError>;

    async fn analyze_optimal_k(
        &self,
        req: &KAnalysisRequest<'_>,
    ) -> Result<KAnalysis, ServiceError>;
}

pub struct HttpServiceClient {
    http: Client,
    endpoint: String,
}

impl HttpServiceClient {
    /// Client with the transport's default timeout behavior
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(endpoint, None)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ServiceError::Transport)?;

        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Ok(Self { http, endpoint })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn post<Req, Res>(&self, path: &str, req: &Req) -> Result<Res, ServiceError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl ClusteringService for HttpServiceClient {
    fn base_url(&self) -> &str {
        &self.endpoint
    }

    async fn generate_points(
        &self,
        req: &GenerateRequest,
    ) -> Result<GenerateResponse, ServiceError> {
        self.post(GENERATE_PATH, req).await
    }

    async fn compute_clustering(
        &self,
        req: &ClusteringRequest<'_>,
    ) -> Result<ClusteringResult, ServiceError> {
        self.post(CLUSTERING_PATH, req).await
    }

    async fn analyze_optimal_k(
        &self,
        req: &KAnalysisRequest<'_>,
    ) -> Result<KAnalysis, ServiceError> {
        self.post(K_ANALYSIS_PATH, req).await
    }
}
