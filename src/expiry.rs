use near_sdk::Timestamp;

use crate::errors::SwapError;

const NANOS_IN_SEC: u64 = 1_000_000_000;

/// Absolute expiry of a commitment created at `created_at` that stays claimable
/// for `duration_seconds`.
pub fn expiry_time(created_at: Timestamp, duration_seconds: u64) -> Result<Timestamp, SwapError> {
    duration_seconds
        .checked_mul(NANOS_IN_SEC)
        .and_then(|duration| created_at.checked_add(duration))
        .ok_or(SwapError::ExpiryOverflow)
}

/// Claims are accepted strictly before the expiry time.
///
/// Reaching the expiry time is enough to lose the claim, whether or not the
/// commitment has been purged yet.
pub fn ensure_claim_window(expiry_time: Timestamp, now: Timestamp) -> Result<(), SwapError> {
    if now < expiry_time {
        Ok(())
    } else {
        Err(SwapError::UnknownOrExpiredCommitment)
    }
}

/// Removal opens exactly at the expiry time.
pub fn ensure_removal_window(expiry_time: Timestamp, now: Timestamp) -> Result<(), SwapError> {
    if now >= expiry_time {
        Ok(())
    } else {
        Err(SwapError::NotYetExpired)
    }
}
