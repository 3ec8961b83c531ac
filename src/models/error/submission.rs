use serde::Serialize;
use thiserror::Error;

/// Failures reported by the transaction submission collaborator.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SubmissionError {
    #[error("Gas estimation failed for {method}: {reason}")]
    GasEstimation { method: String, reason: String },
    #[error("Failed to send transaction: {0}")]
    SendFailed(String),
    #[error("Transaction store error: {0}")]
    StoreError(String),
}
