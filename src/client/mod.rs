//! The GitHub Actions client.
//!
//! See: [`RunsQueryClient`]

mod paginate;
mod request;


use chrono::{DateTime, Utc};
use tracing::{debug, info};
use url::Url;

use crate::{
    auth::Token,
    config::ClientConfig,
    error::{QueryError, Result},
    workflow::{RunDigest, Workflow, WorkflowRun, filter::QueryFilter},
};

use paginate::{RunsPage, WorkflowsPage};

/// Lists the workflows of a repository and the active or recent runs of a workflow.
///
/// The client holds nothing but its configuration: every call is independent. Page requests
/// are sent one after another and each is retried according to the configured
/// [`RetryPolicy`](crate::framework::RetryPolicy).
///
/// # Examples
///
/// ```no_run
/// use runs_query::RunsQueryClient;
///
/// # async fn run() -> runs_query::Result<()> {
/// let client = RunsQueryClient::new("ghp_token")?;
/// let runs = client
///     .list_active_or_recent_runs("octocat", "hello-world", Some("main"), 42)
///     .await?;
/// if !runs.is_empty() {
///     println!("waiting for {} runs", runs.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RunsQueryClient {
    http: reqwest::Client,
    token: Token,
    base_url: Url,
    config: ClientConfig,
    clock: fn() -> DateTime<Utc>,
}

impl RunsQueryClient {
    /// Creates a client with the default [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: impl Into<Token>) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_config(token: impl Into<Token>, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(QueryError::Config(format!(
                "`{base_url}` cannot be used as an API base url"
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            token: token.into(),
            base_url,
            config,
            clock: Utc::now,
        })
    }

    /// Creates a client from `GITHUB_TOKEN` and the rest of the environment.
    ///
    /// See: [`ClientConfig::from_env`]
    ///
    /// # Errors
    ///
    /// Returns an error if `GITHUB_TOKEN` is not set or the environment is otherwise unusable.
    #[cfg(feature = "env_github_token")]
    pub fn from_env() -> Result<Self> {
        let token = crate::env::GITHUB_TOKEN.clone().ok_or_else(|| {
            QueryError::Config(String::from("GITHUB_TOKEN not set in environment"))
        })?;
        Self::with_config(token, ClientConfig::from_env()?)
    }

    /// Replaces the clock used to compute time windows and rate limit resets.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the configuration of this client.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Lists every workflow of a repository, in the order GitHub returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails, including throttled requests the retry
    /// policy gives up on.
    pub async fn list_workflows(&self, owner: &str, repo: &str) -> Result<Vec<Workflow>> {
        let url = self.first_page(&["repos", owner, repo, "actions", "workflows"], &[])?;
        debug!("listing workflows of {owner}/{repo}…");

        let workflows = self.paginate::<WorkflowsPage>(url).await?;
        debug!("listed {} workflows of {owner}/{repo}", workflows.len());
        Ok(workflows)
    }

    /// Lists the runs of a workflow matching a single filter, across all pages.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn list_runs(&self, filter: &QueryFilter) -> Result<Vec<WorkflowRun>> {
        let workflow_id = filter.workflow_id.to_string();
        let url = self.first_page(
            &[
                "repos",
                filter.owner.as_str(),
                filter.repo.as_str(),
                "actions",
                "workflows",
                workflow_id.as_str(),
                "runs",
            ],
            &filter.query_pairs(),
        )?;

        self.paginate::<RunsPage>(url).await
    }

    /// Lists the active or recent runs of a workflow, as selected by the configured
    /// [`RunFilterPolicy`](crate::RunFilterPolicy). A [`None`] or empty `branch` means all
    /// branches.
    ///
    /// With the status policy, `in_progress` runs come before `queued` runs. The number of runs
    /// and a digest of each are logged once per call.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails. Partial results are discarded.
    pub async fn list_active_or_recent_runs(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        workflow_id: u64,
    ) -> Result<Vec<WorkflowRun>> {
        let base = QueryFilter::new(owner, repo, workflow_id).branch(branch);
        let filters = self.config.filter_policy.filters(&base, (self.clock)())?;
        debug!(
            "listing runs of workflow {workflow_id} in {owner}/{repo} by {} policy…",
            self.config.filter_policy
        );

        let mut runs = Vec::new();
        for filter in &filters {
            runs.extend(self.list_runs(filter).await?);
        }

        let digest: Vec<RunDigest<'_>> = runs.iter().map(RunDigest::from).collect();
        let digest = serde_json::to_string_pretty(&digest)
            .unwrap_or_else(|err| format!("<unserializable digest: {err}>"));
        info!(
            count = runs.len(),
            "found {} runs of workflow {workflow_id} in {owner}/{repo}: {digest}",
            runs.len()
        );

        Ok(runs)
    }

    /// Whether the workflow has any active or recent run.
    ///
    /// See: [`Self::list_active_or_recent_runs`]
    ///
    /// # Errors
    ///
    /// Returns an error if listing the runs fails.
    pub async fn has_active_or_recent_runs(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        workflow_id: u64,
    ) -> Result<bool> {
        self.list_active_or_recent_runs(owner, repo, branch, workflow_id)
            .await
            .map(|runs| !runs.is_empty())
    }

    /// Builds the URL of the first page of a listing.
    fn first_page(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| QueryError::Config(format!("`{}` cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("per_page", &self.config.effective_per_page().to_string())
            .extend_pairs(query);
        Ok(url)
    }
}
