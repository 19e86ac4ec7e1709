//! Queries GitHub Actions for workflow runs that are still queued or in progress.
//!
//! The entry point is [`RunsQueryClient`], which lists the workflows of a repository and the
//! active (or recently created) runs of one workflow. Every page request goes through a
//! [`RetryPolicy`](framework::RetryPolicy) that retries once on the primary rate limit and
//! never on abuse detection.

pub mod auth;
pub mod client;
pub mod config;
pub mod env;
pub mod error;
pub mod framework;
pub mod workflow;

pub use auth::Token;
pub use client::RunsQueryClient;
pub use config::ClientConfig;
pub use error::{QueryError, Result};
pub use workflow::{
    RunDigest, RunStatus, Workflow, WorkflowRun,
    filter::{QueryFilter, RunFilterPolicy, RunSelector},
};

/// A shorthand to define a statically allocated variable using a [`std::sync::LazyLock`].
///
/// # Examples
///
/// ```rust
/// use runs_query::static_lazy_lock;
///
/// static_lazy_lock! {
///     /// A static greeting.
///     pub GREETING: String = String::from("a static variable");
/// }
///
/// assert_eq!(GREETING.as_str(), "a static variable");
/// ```
#[macro_export]
macro_rules! static_lazy_lock {
    ($(#[$meta:meta])* $vis:vis $name:ident: $type:ty = $expr:expr $(;)?) => {
        $(#[$meta])*
        $vis static $name: $crate::__priv_macro_use::LazyLock<$type> =
            $crate::__priv_macro_use::LazyLock::new(|| $expr);
    };
}

#[doc(hidden)]
pub mod __priv_macro_use {
    pub use std::sync::LazyLock;
}
