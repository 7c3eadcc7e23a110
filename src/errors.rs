// errors.rs
use astra::Response;
use std::path::PathBuf;
use thiserror::Error;

use crate::dataset::DatasetError;
use crate::predictor::PredictionError;

/// Errors originating from the request side: routing, bad input, or a
/// recoverable failure that a route chose not to render inline.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),

    #[error("Dataset Error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

/// Anything that stops the dashboard from serving at all.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse model artifact {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("model backend unavailable: {0}")]
    Backend(String),

    #[error("inconsistent catalog: {0}")]
    Catalog(String),
}
