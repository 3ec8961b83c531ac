//! Transaction descriptors handed to the transaction submission collaborator.
use serde::{Deserialize, Serialize};
use std::fmt;

use super::U256;

/// Kind of server-originated transaction, used by the transaction store to
/// answer "is an action of this kind already in flight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerAction {
    RegisterServer,
    AddWorker,
    ValueTransfer,
    RelayCall,
}

impl fmt::Display for ServerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerAction::RegisterServer => "register_server",
            ServerAction::AddWorker => "add_worker",
            ServerAction::ValueTransfer => "value_transfer",
            ServerAction::RelayCall => "relay_call",
        };
        f.write_str(name)
    }
}

/// ABI-encoded contract call produced by the ledger facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub name: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionDetails {
    pub signer: String,
    pub server_action: ServerAction,
    pub destination: String,
    pub gas_limit: u64,
    /// Left to the submitter when absent.
    pub gas_price: Option<u128>,
    pub value: U256,
    pub method: Option<MethodCall>,
    pub creation_block_number: u64,
}

impl SendTransactionDetails {
    /// Contract call from `signer` to `destination` with no value attached.
    pub fn contract_call(
        signer: &str,
        destination: &str,
        server_action: ServerAction,
        method: MethodCall,
        gas_limit: u64,
        creation_block_number: u64,
    ) -> Self {
        Self {
            signer: signer.to_string(),
            server_action,
            destination: destination.to_string(),
            gas_limit,
            gas_price: None,
            value: U256::ZERO,
            method: Some(method),
            creation_block_number,
        }
    }

    /// Plain value transfer at a fixed gas price.
    pub fn value_transfer(
        signer: &str,
        destination: &str,
        value: U256,
        gas_limit: u64,
        gas_price: u128,
        creation_block_number: u64,
    ) -> Self {
        Self {
            signer: signer.to_string(),
            server_action: ServerAction::ValueTransfer,
            destination: destination.to_string(),
            gas_limit,
            gas_price: Some(gas_price),
            value,
            method: None,
            creation_block_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentTransaction {
    pub transaction_hash: String,
}
