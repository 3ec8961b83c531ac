use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Why a candidate relay was rejected, or why selection could not run.
///
/// Everything except `NotInitialized`, `Directory` and `InvalidConfig` is recorded per
/// candidate and never aborts the selection attempt.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SelectionError {
    #[error("RelaySelectionManager not initialized")]
    NotInitialized,
    #[error("Relay not ready: {0}")]
    NotReady(String),
    #[error("{0}")]
    FilterRejection(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Known relays directory error: {0}")]
    Directory(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ConfigError> for SelectionError {
    fn from(err: ConfigError) -> Self {
        SelectionError::InvalidConfig(err.to_string())
    }
}

impl From<reqwest::Error> for SelectionError {
    fn from(err: reqwest::Error) -> Self {
        SelectionError::Transport(err.to_string())
    }
}
