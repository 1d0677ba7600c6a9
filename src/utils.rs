use near_sdk::{bs58, env, CryptoHash};

// Helper for consistent lifecycle logging
pub fn log_swap_event(event: &str, hash: &CryptoHash, detail: &str) {
    env::log_str(&format!(
        "SWAP_{}: hash='{}', {}",
        event,
        bs58::encode(hash).into_string(),
        detail
    ));
}
