use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ValidationError),

    #[error("Check API request failed: {0}")]
    UpstreamError(String),

    #[error("Check API returned status {0}")]
    UpstreamStatus(u16),

    #[error("Check not found: {0}")]
    CheckNotFound(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::UpstreamError(err.to_string())
    }
}
