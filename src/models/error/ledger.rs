use serde::Serialize;
use thiserror::Error;

/// Failures reported by the ledger facade.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum LedgerError {
    #[error("RPC error: {0}")]
    RpcError(String),
    #[error("Failed to decode event: {0}")]
    DecodeError(String),
    #[error("Contract call failed: {0}")]
    ContractError(String),
}

impl From<eyre::Report> for LedgerError {
    fn from(err: eyre::Report) -> Self {
        LedgerError::RpcError(err.to_string())
    }
}
