//! Configuration of a [`RunsQueryClient`](crate::RunsQueryClient).

use std::time::Duration;

use crate::{framework::RetryPolicy, workflow::filter::RunFilterPolicy};

/// The public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The largest page GitHub serves.
pub const MAX_PER_PAGE: u8 = 100;

/// Everything a [`RunsQueryClient`](crate::RunsQueryClient) can be tuned with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The base URL of the GitHub REST API.
    pub base_url: String,
    /// How active or recent runs are selected.
    pub filter_policy: RunFilterPolicy,
    /// How throttled requests are retried.
    pub retry_policy: RetryPolicy,
    /// Items requested per page, clamped to `1..=100`.
    pub per_page: u8,
    /// The `User-Agent` header sent with every request.
    pub user_agent: String,
    /// An overall timeout for each request. [`None`] keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_URL),
            filter_policy: RunFilterPolicy::default(),
            retry_policy: RetryPolicy::default(),
            per_page: MAX_PER_PAGE,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// The page size actually requested.
    pub fn effective_per_page(&self) -> u8 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

#[cfg(feature = "env")]
mod from_env {
    use chrono::Duration;

    use super::ClientConfig;
    use crate::{env, error::Result, framework::RetryPolicy, workflow::filter::RunFilterPolicy};

    impl ClientConfig {
        /// Reads the configuration from the environment, falling back to defaults.
        ///
        /// See: [`crate::env`]
        ///
        /// # Errors
        ///
        /// Returns [`QueryError::Config`](crate::QueryError::Config) if `RUNS_FILTER_POLICY`
        /// names an unknown policy.
        pub fn from_env() -> Result<Self> {
            Ok(Self {
                base_url: env::GITHUB_API_URL.clone(),
                filter_policy: filter_policy(
                    env::RUNS_FILTER_POLICY.as_deref(),
                    *env::RUNS_LOOKBACK_HOURS,
                )?,
                retry_policy: RetryPolicy {
                    primary_limit_retries: *env::MAX_RETRIES,
                    ..RetryPolicy::default()
                },
                ..Self::default()
            })
        }
    }

    pub(super) fn filter_policy(name: Option<&str>, lookback_hours: u32) -> Result<RunFilterPolicy> {
        match name.map(str::parse::<RunFilterPolicy>).transpose()? {
            None => Ok(RunFilterPolicy::default()),
            Some(RunFilterPolicy::TimeWindow { .. }) => Ok(RunFilterPolicy::TimeWindow {
                lookback: Duration::hours(i64::from(lookback_hours)),
            }),
            Some(policy) => Ok(policy),
        }
    }
}
