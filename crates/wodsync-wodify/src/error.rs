//! Wodify-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WodifyError {
    #[error("Wodify API key rejected")]
    InvalidApiKey,

    #[error("Wodify API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
