use std::time::Duration;

use crate::error::QueryError;

/// A state that controls the flow of a request.
#[non_exhaustive]
#[derive(Debug)]
pub enum State<T> {
    /// The control flow should exit with a value.
    Success(T),
    /// The control flow should retry after a delay.
    ///
    /// See: [`RetryPolicy::retry_if_possible`](super::RetryPolicy::retry_if_possible)
    Retry(Duration),
    /// The control flow should exit immediately with an error.
    Stop(QueryError),
}

impl<T> State<T> {
    /// Maps the value if [`self`] is [`State::Success`].
    pub fn map<F, R>(self, f: F) -> State<R>
    where
        F: FnOnce(T) -> R,
    {
        match self {
            State::Success(value) => State::Success(f(value)),
            State::Retry(delay) => State::Retry(delay),
            State::Stop(err) => State::Stop(err),
        }
    }
}

impl<T> From<Result<T, QueryError>> for State<T> {
    fn from(result: Result<T, QueryError>) -> Self {
        match result {
            Ok(value) => State::Success(value),
            Err(err) => State::Stop(err),
        }
    }
}
