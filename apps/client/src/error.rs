//! Client-level errors.
//!
//! Screen-level failures never reach this type: view-models keep
//! [`CoreError`] inside their state and map it to a message. `ClientError`
//! only covers bootstrap, where the binary cannot continue.

use multicourse_api::ApiError;
use multicourse_core::navigation::NavigationError;
use multicourse_core::CoreError;
use multicourse_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Navigation state error: {0}")]
    Navigation(#[from] NavigationError),
}

pub type ClientResult<T> = Result<T, ClientError>;
