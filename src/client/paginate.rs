use futures::{Stream, TryStreamExt as _, stream};
use reqwest::header::{self, HeaderMap};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;
use url::Url;

use super::RunsQueryClient;
use crate::{
    error::{QueryError, Result},
    workflow::{Workflow, WorkflowRun},
};

/// One page of a paginated GitHub listing.
pub(super) trait Page: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Debug, Deserialize)]
pub(super) struct WorkflowsPage {
    workflows: Vec<Workflow>,
}

impl Page for WorkflowsPage {
    type Item = Workflow;

    fn into_items(self) -> Vec<Workflow> {
        self.workflows
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RunsPage {
    workflow_runs: Vec<WorkflowRun>,
}

impl Page for RunsPage {
    type Item = WorkflowRun;

    fn into_items(self) -> Vec<WorkflowRun> {
        self.workflow_runs
    }
}

impl RunsQueryClient {
    /// Streams every page of a listing, following `Link: <…>; rel="next"` until it is absent.
    pub(super) fn pages<P>(&self, first: Url) -> impl Stream<Item = Result<Vec<P::Item>>>
    where
        P: Page,
    {
        stream::try_unfold((Some(first), 1_u32), move |(next, index)| async move {
            let Some(url) = next else {
                return Ok::<_, QueryError>(None);
            };

            let response = self.get(&url).await?;
            let next = next_link(response.headers())?;
            let items = response.json::<P>().await?.into_items();
            debug!("fetched page {index} with {} items from {url}", items.len());

            Ok(Some((items, (next, index + 1))))
        })
    }

    /// Fetches every page of a listing and concatenates them in page order.
    pub(super) async fn paginate<P>(&self, first: Url) -> Result<Vec<P::Item>>
    where
        P: Page,
    {
        self.pages::<P>(first).try_concat().await
    }
}

/// Finds the `rel="next"` target of a `Link` header.
fn next_link(headers: &HeaderMap) -> Result<Option<Url>> {
    let Some(link) = headers
        .get(header::LINK)
        .and_then(|value| value.to_str().ok())
    else {
        return Ok(None);
    };

    link.split(',')
        .find_map(|entry| {
            let (target, params) = entry.split_once(';')?;
            params
                .split(';')
                .any(|param| param.trim() == r#"rel="next""#)
                .then(|| target.trim().trim_start_matches('<').trim_end_matches('>'))
        })
        .map(Url::parse)
        .transpose()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue, LINK};

    use super::next_link;

    #[test]
    fn follows_only_the_next_relation() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                r#"<https://api.github.com/repositories/1/actions/workflows?page=1>; rel="prev", <https://api.github.com/repositories/1/actions/workflows?page=3>; rel="next", <https://api.github.com/repositories/1/actions/workflows?page=5>; rel="last""#,
            ),
        );

        assert_eq!(
            next_link(&headers).unwrap().unwrap().as_str(),
            "https://api.github.com/repositories/1/actions/workflows?page=3"
        );
    }

    #[test]
    fn last_page_has_no_next() {
        let mut headers = HeaderMap::new();
        assert!(next_link(&headers).unwrap().is_none());

        headers.insert(
            LINK,
            HeaderValue::from_static(
                r#"<https://api.github.com/repositories/1/actions/workflows?page=1>; rel="first""#,
            ),
        );
        assert!(next_link(&headers).unwrap().is_none());
    }

    #[test]
    fn malformed_next_target_is_an_error() {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_static(r#"<not a url>; rel="next""#));
        assert!(next_link(&headers).is_err());
    }
}
