use serde::Serialize;
use thiserror::Error;

use super::{LedgerError, SubmissionError};
use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum RegistrationError {
    #[error("RegistrationManager not initialized")]
    NotInitialized,
    #[error("RegistrationManager already initialized")]
    AlreadyInitialized,
    #[error("No relay found for manager {0}")]
    RelayNotFound(String),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ConfigError> for RegistrationError {
    fn from(err: ConfigError) -> Self {
        RegistrationError::InvalidConfig(err.to_string())
    }
}
