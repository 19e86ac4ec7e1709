use reqwest::{Method, RequestBuilder, Response, header};
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use super::RunsQueryClient;
use crate::{
    error::{QueryError, Result},
    framework::{State, Throttle},
};

/// The error body GitHub returns with non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl RunsQueryClient {
    /// Builds a request for GitHub REST API.
    pub(super) fn request_builder(&self, url: Url) -> RequestBuilder {
        self.http
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .bearer_auth(self.token.as_str())
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Sends a `GET` request, retrying throttled attempts as the retry policy allows.
    pub(super) async fn get(&self, url: &Url) -> Result<Response> {
        let mut retry: u8 = 0;

        loop {
            match self.attempt(url, retry).await {
                State::Success(response) => return Ok(response),
                State::Retry(delay) => {
                    retry += 1;
                    tokio::time::sleep(delay).await;
                }
                State::Stop(err) => return Err(err),
            }
        }
    }

    async fn attempt(&self, url: &Url, retry: u8) -> State<Response> {
        debug!("requesting {url}…");

        let response = match self.request_builder(url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                error!("failed to request {url}: {err}");
                return State::Stop(err.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return State::Success(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_else(|err| {
            debug!("failed to read error body from {url}: {err}");
            String::new()
        });
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.message)
            .unwrap_or(body);

        match Throttle::detect(status, &headers, &message, (self.clock)()) {
            Some(throttle) => self.config.retry_policy.retry_if_possible(
                throttle,
                &Method::GET,
                url.as_str(),
                retry,
            ),
            None => {
                error!("failed to request {url}: {status} {message}");
                State::Stop(QueryError::Status {
                    method: Method::GET,
                    url: url.to_string(),
                    status,
                    message,
                })
            }
        }
    }
}
