use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    // 2xx 但 success: false
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}
