//! Transaction submission facade.
//!
//! Nonce allocation, signing and resubmission of stuck transactions happen
//! behind this trait. Every call to `send_transaction` submits exactly one
//! transaction.

use async_trait::async_trait;

use crate::models::{MethodCall, SendTransactionDetails, SentTransaction, ServerAction, SubmissionError};

#[cfg(test)]
use mockall::automock;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait TransactionSubmitter: Send + Sync {
    /// Estimates the gas limit of `method` when sent by `signer`.
    async fn attempt_estimate_gas(
        &self,
        label: &str,
        method: &MethodCall,
        signer: &str,
    ) -> Result<u64, SubmissionError>;

    async fn send_transaction(
        &self,
        details: SendTransactionDetails,
    ) -> Result<SentTransaction, SubmissionError>;

    /// True while a transaction of this kind is stored and not yet mined.
    async fn is_action_pending(&self, action: ServerAction) -> Result<bool, SubmissionError>;
}
