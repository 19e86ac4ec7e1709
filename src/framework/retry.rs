use std::time::Duration;

use reqwest::Method;
use tracing::{error, info, warn};

use super::{State, Throttle, ThrottleKind};
use crate::error::QueryError;

/// Decides how often a throttled request may be retried.
///
/// Each request counts its own retries, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after hitting the primary rate limit.
    pub primary_limit_retries: u8,
    /// Retries allowed after abuse detection.
    pub abuse_limit_retries: u8,
}

impl Default for RetryPolicy {
    /// Retries once on the primary rate limit and never on abuse detection.
    fn default() -> Self {
        Self {
            primary_limit_retries: 1,
            abuse_limit_retries: 0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const NEVER: Self = Self {
        primary_limit_retries: 0,
        abuse_limit_retries: 0,
    };

    /// Decides whether retrying is allowed for a throttled request that has already been retried
    /// `retry` times.
    ///
    /// Returns [`State::Retry`] with GitHub's suggested delay, or [`State::Stop`] with the error
    /// to propagate.
    pub fn retry_if_possible<T>(
        &self,
        throttle: Throttle,
        method: &Method,
        url: &str,
        retry: u8,
    ) -> State<T> {
        let allowed = match throttle.kind {
            ThrottleKind::Primary => {
                warn!("request quota exhausted for request {method} {url}");
                self.primary_limit_retries
            }
            ThrottleKind::Abuse => {
                info!("abuse detected for request {method} {url}");
                self.abuse_limit_retries
            }
        };

        if retry < allowed {
            info!(
                "retrying after {} seconds… ({} / {allowed})",
                throttle.retry_after,
                retry + 1
            );
            return State::Retry(Duration::from_secs(throttle.retry_after));
        }

        let method = method.clone();
        let url = url.to_owned();
        let retry_after = throttle.retry_after;
        match throttle.kind {
            ThrottleKind::Primary => {
                if allowed > 0 {
                    error!("retried for too many times ({allowed}), stopping!");
                }
                State::Stop(QueryError::RateLimited {
                    method,
                    url,
                    retry_after,
                })
            }
            ThrottleKind::Abuse => State::Stop(QueryError::AbuseDetected {
                method,
                url,
                retry_after,
            }),
        }
    }
}
