use near_sdk::{near, Gas};

use crate::errors::SwapError;

const DEFAULT_SETTLEMENT_TGAS: u64 = 50;
const DEFAULT_RESOLVE_TGAS: u64 = 15;
/// Gas for the follow-up call that fails a claim whose settlement failed.
pub const REPORT_FAILURE_TGAS: u64 = 5;
// The callback must release a failed claim and still afford the follow-up call,
// otherwise the commitment stays pending forever.
const MIN_RESOLVE_TGAS: u64 = 10;
// Leaves headroom below the 300 TGas transaction limit for `claim` itself.
const MAX_TOTAL_TGAS: u64 = 250;

/// Static gas attached to the calls issued by `claim`.
#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapConfig {
    /// Gas for the trustline network `transfer` call.
    pub settlement_tgas: u64,
    /// Gas for the settlement callback on this contract.
    pub resolve_tgas: u64,
}

impl SwapConfig {
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.settlement_tgas == 0 {
            return Err(SwapError::InvalidConfig("settlement gas must be positive"));
        }
        if self.resolve_tgas < MIN_RESOLVE_TGAS {
            return Err(SwapError::InvalidConfig("resolve gas must be at least 10 TGas"));
        }
        match self.settlement_tgas.checked_add(self.resolve_tgas) {
            Some(total) if total <= MAX_TOTAL_TGAS => Ok(()),
            _ => Err(SwapError::InvalidConfig("total gas exceeds 250 TGas")),
        }
    }

    pub fn settlement_gas(&self) -> Gas {
        Gas::from_tgas(self.settlement_tgas)
    }

    pub fn resolve_gas(&self) -> Gas {
        Gas::from_tgas(self.resolve_tgas)
    }
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            settlement_tgas: DEFAULT_SETTLEMENT_TGAS,
            resolve_tgas: DEFAULT_RESOLVE_TGAS,
        }
    }
}
