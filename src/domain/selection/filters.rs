//! Compatibility checks applied to relays that answered a ping.
use crate::models::{PingResponse, SelectionError, TransactionRequirements};

pub trait PingFilter: Send + Sync {
    /// Rejects a relay that cannot serve `requirements`. The error message is
    /// reported to the caller unchanged.
    fn check(
        &self,
        ping_response: &PingResponse,
        requirements: &TransactionRequirements,
    ) -> Result<(), SelectionError>;
}

impl<F> PingFilter for F
where
    F: Fn(&PingResponse, &TransactionRequirements) -> Result<(), SelectionError> + Send + Sync,
{
    fn check(
        &self,
        ping_response: &PingResponse,
        requirements: &TransactionRequirements,
    ) -> Result<(), SelectionError> {
        self(ping_response, requirements)
    }
}

/// Rejects relays asking for more than the gas price the client offers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GasPricePingFilter;

impl PingFilter for GasPricePingFilter {
    fn check(
        &self,
        ping_response: &PingResponse,
        requirements: &TransactionRequirements,
    ) -> Result<(), SelectionError> {
        match requirements.gas_price {
            Some(gas_price) if ping_response.min_gas_price > gas_price => {
                Err(SelectionError::FilterRejection(format!(
                    "Proposed gas price: {}; relay's minimum gas price: {}",
                    gas_price, ping_response.min_gas_price
                )))
            }
            _ => Ok(()),
        }
    }
}
