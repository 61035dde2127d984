use crate::service::{ResultShapeError, ServiceError};
use thiserror::Error;

/// Failures reported to the user by the controller
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or out-of-range input; no request was issued
    #[error("{0}")]
    Validation(String),

    /// The action needs state that does not exist yet; no request was issued
    #[error("{0}")]
    Precondition(String),

    #[error("could not reach the service at {address}: {reason}")]
    Transport { address: String, reason: String },

    #[error("server error: {status} - {body}")]
    Server { status: u16, body: String },

    /// The service answered, but the payload was unusable
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        AppError::Precondition(msg.into())
    }

    /// Attach the configured service address to a transport failure
    pub fn from_service(err: ServiceError, address: &str) -> Self {
        match err {
            ServiceError::Transport(e) => AppError::Transport {
                address: address.to_string(),
                reason: e.to_string(),
            },
            ServiceError::Server { status, body } => AppError::Server { status, body },
            ServiceError::Decode(msg) => AppError::InvalidResponse(msg),
        }
    }

    /// Whether a request reached the network for this failure
    pub fn request_issued(&self) -> bool {
        !matches!(self, AppError::Validation(_) | AppError::Precondition(_))
    }
}

impl From<ResultShapeError> for AppError {
    fn from(err: ResultShapeError) -> Self {
        AppError::InvalidResponse(err.to_string())
    }
}
