//! Presentation state for fetched data.

use crate::ApiError;
use serde::Serialize;

/// Result of loading data for display.
///
/// A failed or malformed fetch is `Failed`, never an empty `Ready`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Failed(message) => FetchState::Failed(message),
            FetchState::Ready(data) => FetchState::Ready(f(data)),
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> From<Result<T, ApiError>> for FetchState<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(err) => FetchState::Failed(err.user_message()),
        }
    }
}
