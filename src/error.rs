//! Errors raised while querying GitHub.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// An error raised by [`RunsQueryClient`](crate::RunsQueryClient).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum QueryError {
    /// The primary rate limit was hit and the retry budget is spent.
    #[error("request quota exhausted for request {method} {url} (retry after {retry_after}s)")]
    RateLimited {
        /// The throttled method.
        method: Method,
        /// The throttled URL.
        url: String,
        /// The delay suggested by GitHub, in seconds.
        retry_after: u64,
    },

    /// GitHub flagged the request under its abuse (secondary) rate limit.
    #[error("abuse detected for request {method} {url} (retry after {retry_after}s)")]
    AbuseDetected {
        /// The throttled method.
        method: Method,
        /// The throttled URL.
        url: String,
        /// The delay suggested by GitHub, in seconds.
        retry_after: u64,
    },

    /// GitHub answered with any other non-success status.
    #[error("{method} {url} failed with {status}: {message}")]
    Status {
        /// The failed method.
        method: Method,
        /// The failed URL.
        url: String,
        /// The response status.
        status: StatusCode,
        /// The error message from the response body, if any.
        message: String,
    },

    /// The request could not be sent, or the response could not be decoded.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A [`Result`](std::result::Result) whose error is a [`QueryError`].
pub type Result<T> = std::result::Result<T, QueryError>;
