use thiserror::Error;

/// Failure of a single gateway round trip. Covers transport errors,
/// non-JSON bodies and non-2xx statuses; callers log it and leave their
/// local state untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
}
