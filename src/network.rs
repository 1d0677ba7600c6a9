use near_sdk::ext_contract;
use near_sdk::json_types::{Base64VecU8, U128};
use near_sdk::{AccountId, PromiseOrValue};

use crate::commitment::CommitmentId;

// Trustline network contract settling a claim along a path of trustlines.
// It is expected to emit its own `Transfer` event as proof of settlement.
#[ext_contract(ext_trustline_network)]
pub trait TrustlineNetwork {
    fn transfer(
        &mut self,
        path: Vec<AccountId>,
        value: U128,
        max_fee: U128,
        extra_data: Base64VecU8,
    );
}

#[ext_contract(ext_self)]
pub trait SettlementCallbacks {
    fn on_transfer_settled(&mut self, hash: CommitmentId) -> PromiseOrValue<bool>;
    fn report_settlement_failure(&mut self) -> bool;
}
