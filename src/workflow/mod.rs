//! Data models of GitHub Actions workflows.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod filter;

/// Represents a GitHub Actions workflow from GitHub REST API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub state: String,
    /// Every other field, exactly as GitHub sent it.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} at {})", self.name, self.id, self.path)
    }
}

/// Represents a GitHub Actions workflow run from GitHub REST API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub head_branch: Option<String>,
    /// The raw status. Kept as a string so values outside [`RunStatus`] pass through.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Every other field, exactly as GitHub sent it.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowRun {
    /// Parses the raw status, if it is a known one.
    pub fn run_status(&self) -> Option<RunStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether the run is still waiting for or consuming runner capacity.
    pub fn is_active(&self) -> bool {
        self.run_status().is_some_and(RunStatus::is_active)
    }
}

/// The projection of a [`WorkflowRun`] written to the logs.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RunDigest<'a> {
    pub status: Option<&'a str>,
    pub conclusion: Option<&'a str>,
    pub id: u64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a WorkflowRun> for RunDigest<'a> {
    fn from(run: &'a WorkflowRun) -> Self {
        Self {
            status: run.status.as_deref(),
            conclusion: run.conclusion.as_deref(),
            id: run.id,
            created_at: run.created_at,
        }
    }
}

/// The statuses GitHub accepts when filtering workflow runs.
#[non_exhaustive]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// `in_progress`: a runner is executing the run.
    InProgress,
    /// `queued`: waiting for a runner.
    Queued,
    /// `completed`: finished, see the conclusion.
    Completed,
    /// `action_required`
    ActionRequired,
    /// `cancelled`
    Cancelled,
    /// `failure`
    Failure,
    /// `neutral`
    Neutral,
    /// `skipped`
    Skipped,
    /// `stale`
    Stale,
    /// `success`
    Success,
    /// `timed_out`
    TimedOut,
    /// `requested`: created but not yet queued.
    Requested,
    /// `waiting`: held by a deployment protection rule.
    Waiting,
}

impl RunStatus {
    /// All statuses, in the order GitHub documents them.
    pub const ALL: [Self; 13] = [
        Self::Completed,
        Self::ActionRequired,
        Self::Cancelled,
        Self::Failure,
        Self::Neutral,
        Self::Skipped,
        Self::Stale,
        Self::Success,
        Self::TimedOut,
        Self::InProgress,
        Self::Queued,
        Self::Requested,
        Self::Waiting,
    ];

    /// The wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Queued => "queued",
            Self::Completed => "completed",
            Self::ActionRequired => "action_required",
            Self::Cancelled => "cancelled",
            Self::Failure => "failure",
            Self::Neutral => "neutral",
            Self::Skipped => "skipped",
            Self::Stale => "stale",
            Self::Success => "success",
            Self::TimedOut => "timed_out",
            Self::Requested => "requested",
            Self::Waiting => "waiting",
        }
    }

    /// Whether a run with this status is queued or running.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            Self::InProgress | Self::Queued | Self::Requested | Self::Waiting
        )
    }
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unknown [`RunStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown workflow run status `{0}`")]
pub struct UnknownRunStatus(pub String);

impl FromStr for RunStatus {
    type Err = UnknownRunStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownRunStatus(s.to_owned()))
    }
}
