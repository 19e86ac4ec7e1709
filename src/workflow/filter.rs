//! Filters for listing workflow runs, and the policies that pick them.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use super::RunStatus;
use crate::error::{QueryError, Result};

/// Narrows a workflow run listing to a status or a creation time. GitHub never receives both.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSelector {
    /// Only runs with this status.
    Status(RunStatus),
    /// Only runs created strictly after this instant.
    CreatedAfter(DateTime<Utc>),
}

impl RunSelector {
    /// Returns the query parameter for this selector.
    pub fn query_pair(&self) -> (&'static str, String) {
        match self {
            Self::Status(status) => ("status", status.as_str().to_owned()),
            Self::CreatedAfter(instant) => (
                "created",
                format!(">{}", instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ),
        }
    }
}

/// The parameters of a single "list workflow runs" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    /// The repository owner.
    pub owner: String,
    /// The repository name.
    pub repo: String,
    /// The numeric id of the workflow.
    pub workflow_id: u64,
    /// Absent means all branches.
    pub branch: Option<String>,
    /// Absent means runs of any status and age.
    pub selector: Option<RunSelector>,
}

impl QueryFilter {
    /// Creates a filter matching every run of a workflow.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, workflow_id: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            workflow_id,
            branch: None,
            selector: None,
        }
    }

    /// Narrows the filter to a branch. [`None`] or an empty name keeps all branches.
    #[must_use]
    pub fn branch(mut self, branch: Option<&str>) -> Self {
        self.branch = branch.filter(|name| !name.is_empty()).map(str::to_owned);
        self
    }

    /// Derives a copy of this filter selecting a status.
    #[must_use]
    pub fn with_status(&self, status: RunStatus) -> Self {
        Self {
            selector: Some(RunSelector::Status(status)),
            ..self.clone()
        }
    }

    /// Derives a copy of this filter selecting runs created after an instant.
    #[must_use]
    pub fn created_after(&self, instant: DateTime<Utc>) -> Self {
        Self {
            selector: Some(RunSelector::CreatedAfter(instant)),
            ..self.clone()
        }
    }

    /// Returns the query parameters of this filter. `owner`, `repo` and `workflow_id` are path
    /// segments and never appear here.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(branch) = &self.branch {
            pairs.push(("branch", branch.clone()));
        }
        if let Some(selector) = &self.selector {
            pairs.push(selector.query_pair());
        }
        pairs
    }
}

/// How active or recent runs are selected.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunFilterPolicy {
    /// Lists `in_progress` runs, then `queued` runs, regardless of age.
    #[default]
    Status,
    /// Lists runs of any status created within the lookback window.
    TimeWindow {
        /// How far back from now runs are listed.
        lookback: Duration,
    },
}

impl RunFilterPolicy {
    /// The lookback of [`RunFilterPolicy::TimeWindow`] unless configured otherwise.
    pub const DEFAULT_LOOKBACK: Duration = Duration::hours(3);

    /// A [`RunFilterPolicy::TimeWindow`] with the [default lookback](Self::DEFAULT_LOOKBACK).
    pub const fn time_window() -> Self {
        Self::TimeWindow {
            lookback: Self::DEFAULT_LOOKBACK,
        }
    }

    /// Expands a base filter into the sequence of filters to query, in result order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Config`] if the lookback reaches before the earliest representable
    /// instant.
    pub fn filters(&self, base: &QueryFilter, now: DateTime<Utc>) -> Result<Vec<QueryFilter>> {
        match self {
            Self::Status => Ok(vec![
                base.with_status(RunStatus::InProgress),
                base.with_status(RunStatus::Queued),
            ]),
            Self::TimeWindow { lookback } => {
                let since = now.checked_sub_signed(*lookback).ok_or_else(|| {
                    QueryError::Config(format!(
                        "lookback of {}h from {now} is out of range",
                        lookback.num_hours()
                    ))
                })?;
                Ok(vec![base.created_after(since)])
            }
        }
    }
}

impl Display for RunFilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => f.write_str("status"),
            Self::TimeWindow { lookback } => {
                write!(f, "time-window ({}m)", lookback.num_minutes())
            }
        }
    }
}

impl FromStr for RunFilterPolicy {
    type Err = QueryError;

    /// Parses `status` or `time-window`; the latter uses the default lookback.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "time-window" | "time_window" => Ok(Self::time_window()),
            other => Err(QueryError::Config(format!(
                "unknown run filter policy `{other}`, expected `status` or `time-window`"
            ))),
        }
    }
}
