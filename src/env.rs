//! Defines the environment variables to use.
//!
//! Every variable is read once, on first access.

#![cfg(feature = "env")]

use crate::{config::DEFAULT_API_URL, static_lazy_lock};

use std::env;

/// Parses an environment variable from [`String`] to something else, wrapping any error in [`anyhow::Error`].
#[macro_export]
macro_rules! parse_env {
    ($key:expr => |$var:ident| $expr:expr) => {
        std::env::var($key)
            .map_err(|e| anyhow::anyhow!(e))
            .and_then(|$var| $expr)
    };
    ($key:expr => |$var:ident| $expr:expr; anyhow) => {
        $crate::parse_env!($key => |$var| $expr.map_err(|e| anyhow::anyhow!(e)))
    };
}

pub use crate::parse_env;

#[cfg(feature = "env_github_token")]
static_lazy_lock! {
    /// The GitHub token, if set.
    pub GITHUB_TOKEN: Option<String> = env::var("GITHUB_TOKEN").ok().filter(|token| !token.is_empty());
}

static_lazy_lock! {
    /// The base URL of the GitHub REST API. Defaults to [`DEFAULT_API_URL`].
    pub GITHUB_API_URL: String = env::var("GITHUB_API_URL").unwrap_or_else(|_| String::from(DEFAULT_API_URL));
}

static_lazy_lock! {
    /// How many times a request may be retried after hitting the primary rate limit.
    pub MAX_RETRIES: u8 = parse_env!("MAX_RETRIES" => |s| s.parse::<u8>(); anyhow).unwrap_or(1);
}

static_lazy_lock! {
    /// The run filter policy name, either `status` or `time-window`.
    pub RUNS_FILTER_POLICY: Option<String> = env::var("RUNS_FILTER_POLICY").ok();
}

static_lazy_lock! {
    /// The lookback of the `time-window` policy, in hours.
    pub RUNS_LOOKBACK_HOURS: u32 = parse_env!("RUNS_LOOKBACK_HOURS" => |s| s.parse::<u32>(); anyhow).unwrap_or(3);
}
