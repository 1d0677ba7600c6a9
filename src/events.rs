use near_sdk::json_types::{Base58CryptoHash, U128};
use near_sdk::{near, AccountId, Timestamp};

/// NEP-297 events observed by the off-chain side of the swap.
///
/// `Commit` tells watchers of the external ledger that the trustline leg is
/// pending, so the external leg can proceed.
#[near(event_json(standard = "tlswap"))]
pub enum SwapEvent {
    #[event_version("1.0.0")]
    Commit {
        hash: Base58CryptoHash,
        sender: AccountId,
        recipient: AccountId,
        network: AccountId,
        trustline_amount: U128,
        expiry_time: Timestamp,
    },
    #[event_version("1.0.0")]
    ExpireCommitment { hash: Base58CryptoHash },
}
