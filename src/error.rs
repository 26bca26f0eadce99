use crate::store::error::StoreError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Latest measurement date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidAnchorDate(String),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Invalid configuration")]
    Config(#[from] config::ConfigError),

    #[error("Failed to bind HTTP listener on '{0}'")]
    Bind(String, #[source] std::io::Error),

    #[error("HTTP server terminated with an error")]
    Serve(#[source] std::io::Error),
}
