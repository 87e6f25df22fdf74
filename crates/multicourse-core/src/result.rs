//! Three-state wrapper for values a screen is waiting on.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Loading, loaded, or failed.
///
/// Screens keep one of these per asynchronous value; use cases return plain
/// [`CoreResult`] and the view-model lifts it with [`LoadState::from`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LoadState<T> {
    #[default]
    Loading,
    Success(T),
    #[serde(serialize_with = "serialize_error")]
    Error(CoreError),
}

fn serialize_error<S: serde::Serializer>(err: &CoreError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&err.to_string())
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            LoadState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Success(v) => LoadState::Success(f(v)),
            LoadState::Error(e) => LoadState::Error(e),
        }
    }
}

impl<T> From<CoreResult<T>> for LoadState<T> {
    fn from(result: CoreResult<T>) -> Self {
        match result {
            Ok(v) => LoadState::Success(v),
            Err(e) => LoadState::Error(e),
        }
    }
}
