use near_sdk::FunctionError;
use thiserror::Error;

/// Reasons a swap operation is rejected.
///
/// Every message starts with the variant name so callers can match on the
/// failure reason of a reverted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error, FunctionError)]
pub enum SwapError {
    #[error("DuplicateCommitment: entry already exists")]
    DuplicateCommitment,
    #[error("InvalidTrustlineAmount: TL total money amount is required")]
    InvalidTrustlineAmount,
    #[error("InvalidExternalAddress: external address is required")]
    InvalidExternalAddress,
    #[error("InvalidExternalAmount: external total amount is required")]
    InvalidExternalAmount,
    #[error("Unauthorized: caller is not allowed to perform this action")]
    Unauthorized,
    #[error("UnknownOrExpiredCommitment: no claimable commitment for this secret")]
    UnknownOrExpiredCommitment,
    #[error("NotYetExpired: commitment has not reached its expiry time")]
    NotYetExpired,
    #[error("ExpiryOverflow: duration does not fit the ledger clock")]
    ExpiryOverflow,
    #[error("ClaimInProgress: settlement for this commitment is pending")]
    ClaimInProgress,
    #[error("SettlementFailed: trustline network rejected the transfer")]
    SettlementFailed,
    #[error("InvalidConfig: {0}")]
    InvalidConfig(&'static str),
}
