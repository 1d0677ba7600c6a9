use near_sdk::json_types::U128;
use near_sdk::store::{LookupMap, LookupSet};
use near_sdk::{near, AccountId, CryptoHash, Timestamp};

use crate::errors::SwapError;

// Commitments are keyed by the SHA-256 hash of the swap secret.
pub type CommitmentId = CryptoHash;

/// Address of the counter-leg on the external asset ledger.
///
/// The contract never interprets it beyond rejecting a null address: an empty
/// string, or one made only of zero digits (with or without a `0x` prefix).
#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalAddress(pub String);

impl ExternalAddress {
    pub fn is_null(&self) -> bool {
        let digits = self
            .0
            .strip_prefix("0x")
            .or_else(|| self.0.strip_prefix("0X"))
            .unwrap_or(&self.0);
        digits.chars().all(|c| c == '0')
    }
}

impl From<&str> for ExternalAddress {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

// All the immutable parameters of a committed swap.
#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment {
    pub sender: AccountId,    // Authorizes the commit, debited on claim
    pub recipient: AccountId, // Receives the trustline payment
    pub network: AccountId,   // Trustline network contract settling the claim
    pub trustline_amount: U128,

    // External leg, recorded for off-chain coordination only
    pub external_address: ExternalAddress,
    pub external_amount: U128,

    pub expiry_time: Timestamp,
}

/// Hash-indexed storage of live commitments.
///
/// Besides the records it tracks which commitments have a settlement call in
/// flight. A pending commitment keeps its record untouched until the
/// settlement callback either deletes it or clears the mark.
#[near(serializers = [borsh])]
pub struct CommitmentStore {
    commitments: LookupMap<CommitmentId, Commitment>,
    pending_claims: LookupSet<CommitmentId>,
}

impl CommitmentStore {
    pub fn new() -> Self {
        Self {
            commitments: LookupMap::new(b"c"),
            pending_claims: LookupSet::new(b"p"),
        }
    }

    pub fn create(&mut self, hash: CommitmentId, commitment: Commitment) -> Result<(), SwapError> {
        if self.commitments.contains_key(&hash) {
            return Err(SwapError::DuplicateCommitment);
        }
        self.commitments.insert(hash, commitment);
        Ok(())
    }

    pub fn lookup(&self, hash: &CommitmentId) -> Option<&Commitment> {
        self.commitments.get(hash)
    }

    /// Deletes the commitment without any further check.
    pub fn remove(&mut self, hash: &CommitmentId) -> Option<Commitment> {
        self.pending_claims.remove(hash);
        self.commitments.remove(hash)
    }

    pub fn mark_pending(&mut self, hash: CommitmentId) -> bool {
        self.pending_claims.insert(hash)
    }

    pub fn clear_pending(&mut self, hash: &CommitmentId) -> bool {
        self.pending_claims.remove(hash)
    }

    pub fn is_pending(&self, hash: &CommitmentId) -> bool {
        self.pending_claims.contains(hash)
    }
}

impl Default for CommitmentStore {
    fn default() -> Self {
        Self::new()
    }
}
