use near_sdk::json_types::{Base58CryptoHash, Base64VecU8, U128};
use near_sdk::{env, near, AccountId, FunctionError, Gas, Promise, PromiseOrValue, PromiseResult};

mod commitment;
mod config;
mod errors;
mod events;
mod expiry;
mod network;
mod utils;

pub use commitment::{Commitment, CommitmentId, ExternalAddress};
pub use config::SwapConfig;
pub use errors::SwapError;
pub use events::SwapEvent;

use commitment::CommitmentStore;
use config::REPORT_FAILURE_TGAS;
use network::{ext_self, ext_trustline_network};
use utils::log_swap_event;

// Define the contract structure
#[near(contract_state)]
pub struct Contract {
    pub owner_id: AccountId,
    pub config: SwapConfig,
    // Live commitments keyed by the hash of their secret
    commitments: CommitmentStore,
}

impl Default for Contract {
    fn default() -> Self {
        Self {
            owner_id: env::predecessor_account_id(),
            config: SwapConfig::default(),
            commitments: CommitmentStore::new(),
        }
    }
}

#[near]
impl Contract {
    #[init]
    pub fn new(owner_id: AccountId, config: Option<SwapConfig>) -> Self {
        let config = config.unwrap_or_default();
        if let Err(err) = config.validate() {
            err.panic();
        }
        Self {
            owner_id,
            config,
            commitments: CommitmentStore::new(),
        }
    }

    /// Commits `sender` to pay `trustline_amount` to `recipient` through
    /// `network` once the preimage of `hash` is revealed.
    ///
    /// The external leg is only recorded. The `commit` event lets watchers of
    /// the external ledger proceed with it.
    #[allow(clippy::too_many_arguments)]
    #[handle_result]
    pub fn commit(
        &mut self,
        sender: AccountId,
        recipient: AccountId,
        network: AccountId,
        trustline_amount: U128,
        external_address: ExternalAddress,
        external_amount: U128,
        duration_seconds: u64,
        hash: Base58CryptoHash,
    ) -> Result<(), SwapError> {
        if env::predecessor_account_id() != sender {
            return Err(SwapError::Unauthorized);
        }
        if trustline_amount.0 == 0 {
            return Err(SwapError::InvalidTrustlineAmount);
        }
        if external_address.is_null() {
            return Err(SwapError::InvalidExternalAddress);
        }
        if external_amount.0 == 0 {
            return Err(SwapError::InvalidExternalAmount);
        }

        let hash_bytes: CommitmentId = hash.into();
        if self.commitments.lookup(&hash_bytes).is_some() {
            return Err(SwapError::DuplicateCommitment);
        }
        let expiry_time = expiry::expiry_time(env::block_timestamp(), duration_seconds)?;

        let commitment = Commitment {
            sender,
            recipient,
            network,
            trustline_amount,
            external_address,
            external_amount,
            expiry_time,
        };
        let event = SwapEvent::Commit {
            hash: hash_bytes.into(),
            sender: commitment.sender.clone(),
            recipient: commitment.recipient.clone(),
            network: commitment.network.clone(),
            trustline_amount,
            expiry_time,
        };
        self.commitments.create(hash_bytes, commitment)?;
        event.emit();

        Ok(())
    }

    /// Reveals `secret` and settles the committed trustline payment along `path`.
    ///
    /// The commitment is deleted only once the network reports a successful
    /// transfer. Until then it is marked pending and cannot be claimed again
    /// or removed.
    #[handle_result]
    pub fn claim(
        &mut self,
        path: Vec<AccountId>,
        max_fee: U128,
        extra_data: Base64VecU8,
        secret: Base64VecU8,
    ) -> Result<Promise, SwapError> {
        let hash: CommitmentId = env::sha256_array(&secret.0);

        let commitment = self
            .commitments
            .lookup(&hash)
            .cloned()
            .ok_or(SwapError::UnknownOrExpiredCommitment)?;
        if self.commitments.is_pending(&hash) {
            return Err(SwapError::ClaimInProgress);
        }
        expiry::ensure_claim_window(commitment.expiry_time, env::block_timestamp())?;

        self.commitments.mark_pending(hash);

        Ok(ext_trustline_network::ext(commitment.network)
            .with_static_gas(self.config.settlement_gas())
            .transfer(path, commitment.trustline_amount, max_fee, extra_data)
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(self.config.resolve_gas())
                    .on_transfer_settled(hash),
            ))
    }

    /// Purges a commitment whose expiry time has been reached. Anyone may call it.
    #[handle_result]
    pub fn remove_commitment(&mut self, hash: Base58CryptoHash) -> Result<(), SwapError> {
        let hash_bytes: CommitmentId = hash.into();

        let expiry_time = self
            .commitments
            .lookup(&hash_bytes)
            .map(|commitment| commitment.expiry_time)
            .ok_or(SwapError::UnknownOrExpiredCommitment)?;
        if self.commitments.is_pending(&hash_bytes) {
            return Err(SwapError::ClaimInProgress);
        }
        expiry::ensure_removal_window(expiry_time, env::block_timestamp())?;

        self.commitments.remove(&hash_bytes);
        SwapEvent::ExpireCommitment {
            hash: hash_bytes.into(),
        }
        .emit();

        Ok(())
    }

    /// Replaces the gas configuration. Only the owner may call it.
    #[handle_result]
    pub fn set_config(&mut self, config: SwapConfig) -> Result<(), SwapError> {
        if env::predecessor_account_id() != self.owner_id {
            return Err(SwapError::Unauthorized);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // --- VIEWS ---

    pub fn get_commitment(&self, hash: Base58CryptoHash) -> Option<Commitment> {
        self.commitments.lookup(&hash.into()).cloned()
    }

    pub fn is_claim_pending(&self, hash: Base58CryptoHash) -> bool {
        self.commitments.is_pending(&hash.into())
    }

    pub fn get_config(&self) -> SwapConfig {
        self.config.clone()
    }

    pub fn get_owner(&self) -> AccountId {
        self.owner_id.clone()
    }

    // --- PRIVATE CALLBACKS ---
    #[private]
    pub fn on_transfer_settled(&mut self, hash: CommitmentId) -> PromiseOrValue<bool> {
        let settled = matches!(env::promise_result(0), PromiseResult::Successful(_));
        if self.resolve_settlement(hash, settled) {
            PromiseOrValue::Value(true)
        } else {
            // The release above must persist, so the claim is failed by a
            // follow-up receipt instead of a panic here.
            ext_self::ext(env::current_account_id())
                .with_static_gas(Gas::from_tgas(REPORT_FAILURE_TGAS))
                .report_settlement_failure()
                .into()
        }
    }

    #[private]
    pub fn report_settlement_failure(&mut self) -> bool {
        SwapError::SettlementFailed.panic()
    }
}

impl Contract {
    /// Finalizes a claim: a settled transfer consumes the commitment, a failed
    /// one leaves it exactly as it was before the claim.
    fn resolve_settlement(&mut self, hash: CommitmentId, settled: bool) -> bool {
        if settled {
            self.commitments.remove(&hash);
        } else {
            self.commitments.clear_pending(&hash);
            log_swap_event(
                "SETTLEMENT_FAILED",
                &hash,
                "commitment released for another claim",
            );
        }
        settled
    }
}
