//! Error type for the meetings service client.

use thiserror::Error;

/// Failures talking to the meetings service.
///
/// Every non-2xx response maps to [`ApiError::Server`] no matter the
/// status code; callers surface a generic notice and never retry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
}
