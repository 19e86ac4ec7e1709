use chrono::{DateTime, Utc};
use reqwest::{StatusCode, header::HeaderMap};

/// The delay assumed when GitHub flags abuse without a `retry-after` header.
const DEFAULT_ABUSE_DELAY: u64 = 60;

/// The throttling condition GitHub signalled.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleKind {
    /// The request quota of the current window is exhausted.
    Primary,
    /// The request pattern tripped the abuse (secondary) rate limit.
    Abuse,
}

/// A throttled response and the delay GitHub suggests before trying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    /// Which limit was hit.
    pub kind: ThrottleKind,
    /// Seconds to wait.
    pub retry_after: u64,
}

impl Throttle {
    /// Classifies a non-success response. Returns [`None`] if the response is not a throttle.
    ///
    /// Abuse is recognised from the error message of a `403`/`429`; the primary limit from a
    /// `429`, or a `403` with no remaining quota.
    pub fn detect(
        status: StatusCode,
        headers: &HeaderMap,
        message: &str,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
            return None;
        }

        let retry_after = header_u64(headers, "retry-after");
        let message = message.to_ascii_lowercase();

        if message.contains("secondary rate") || message.contains("abuse") {
            return Some(Self {
                kind: ThrottleKind::Abuse,
                retry_after: retry_after.unwrap_or(DEFAULT_ABUSE_DELAY),
            });
        }

        let quota_exhausted = header_u64(headers, "x-ratelimit-remaining") == Some(0);
        if status == StatusCode::TOO_MANY_REQUESTS || quota_exhausted {
            let until_reset = header_u64(headers, "x-ratelimit-reset")
                .and_then(|reset| i64::try_from(reset).ok())
                .map(|reset| u64::try_from(reset - now.timestamp()).unwrap_or(0));
            return Some(Self {
                kind: ThrottleKind::Primary,
                retry_after: retry_after.or(until_reset).unwrap_or(0),
            });
        }

        None
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
