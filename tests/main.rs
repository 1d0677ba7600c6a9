use anyhow::Result;
use near_sdk::bs58;
use near_sdk::json_types::Base64VecU8;
use near_workspaces::network::Sandbox;
use near_workspaces::{Account, Contract, Worker};
use serde_json::json;
use sha2::{Digest, Sha256};

use tl_swap_near::Commitment;

// Built with `cargo near build`
const TL_SWAP_WASM_PATH: &str = "./target/near/tl_swap_near.wasm";
const WEEK_SECONDS: u64 = 60 * 60 * 24 * 7;
const EXTERNAL_ADDRESS: &str = "0xBf6CA0E4b2B5C788dB424383A95fd019d2EB717f";

/// Helper function to set up the testing environment.
/// This will:
/// 1. Initialize a sandbox environment.
/// 2. Deploy and initialize the swap contract.
/// 3. Create accounts for the sender and recipient, plus one standing in
///    for the trustline network (it has no code, so every settlement fails).
async fn setup() -> Result<(Worker<Sandbox>, Contract, Account, Account, Account)> {
    let worker = near_workspaces::sandbox().await?;
    let wasm = std::fs::read(TL_SWAP_WASM_PATH)?;

    let contract = worker.dev_deploy(&wasm).await?;
    contract
        .call("new")
        .args_json(json!({ "owner_id": contract.id(), "config": null }))
        .transact()
        .await?
        .into_result()?;

    let sender = worker.dev_create_account().await?;
    let recipient = worker.dev_create_account().await?;
    let network = worker.dev_create_account().await?;

    Ok((worker, contract, sender, recipient, network))
}

fn secret() -> Vec<u8> {
    let mut secret = vec![0u8; 32];
    secret[..8].copy_from_slice(b"123456ab");
    secret
}

fn hashed_secret() -> String {
    bs58::encode(Sha256::digest(secret())).into_string()
}

async fn commit(
    contract: &Contract,
    sender: &Account,
    recipient: &Account,
    network: &Account,
    duration_seconds: u64,
) -> Result<near_workspaces::result::ExecutionFinalResult> {
    let result = sender
        .call(contract.id(), "commit")
        .args_json(json!({
            "sender": sender.id(),
            "recipient": recipient.id(),
            "network": network.id(),
            "trustline_amount": "100",
            "external_address": EXTERNAL_ADDRESS,
            "external_amount": "1",
            "duration_seconds": duration_seconds,
            "hash": hashed_secret(),
        }))
        .transact()
        .await?;
    Ok(result)
}

async fn get_commitment(contract: &Contract) -> Result<Option<Commitment>> {
    let commitment = contract
        .view("get_commitment")
        .args_json(json!({ "hash": hashed_secret() }))
        .await?
        .json()?;
    Ok(commitment)
}

#[tokio::test]
#[ignore = "needs the near-sandbox binary and a wasm built with `cargo near build`"]
async fn test_commit_and_duplicate() -> Result<()> {
    let (_worker, contract, sender, recipient, network) = setup().await?;

    let result = commit(&contract, &sender, &recipient, &network, WEEK_SECONDS).await?;
    println!("Commit logs: {:?}", result.logs());
    assert!(result.is_success());
    assert!(result
        .logs()
        .iter()
        .any(|log| log.contains(r#""event":"commit""#)));

    let commitment = get_commitment(&contract).await?.expect("commitment stored");
    assert_eq!(&commitment.sender, sender.id());
    assert_eq!(&commitment.recipient, recipient.id());
    assert_eq!(commitment.trustline_amount.0, 100);

    let duplicate = commit(&contract, &sender, &recipient, &network, WEEK_SECONDS).await?;
    assert!(duplicate.is_failure());
    let failure = duplicate.into_result().err().expect("call should fail");
    assert!(format!("{:?}", failure).contains("DuplicateCommitment"));

    Ok(())
}

#[tokio::test]
#[ignore = "needs the near-sandbox binary and a wasm built with `cargo near build`"]
async fn test_commit_on_behalf_of_someone_else() -> Result<()> {
    let (_worker, contract, sender, recipient, network) = setup().await?;

    // The recipient signs a commit naming the sender
    let result = recipient
        .call(contract.id(), "commit")
        .args_json(json!({
            "sender": sender.id(),
            "recipient": recipient.id(),
            "network": network.id(),
            "trustline_amount": "100",
            "external_address": EXTERNAL_ADDRESS,
            "external_amount": "1",
            "duration_seconds": WEEK_SECONDS,
            "hash": hashed_secret(),
        }))
        .transact()
        .await?;
    let failure = result.into_result().err().expect("call should fail");
    assert!(format!("{:?}", failure).contains("Unauthorized"));
    assert!(get_commitment(&contract).await?.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "needs the near-sandbox binary and a wasm built with `cargo near build`"]
async fn test_remove_expired_commitment() -> Result<()> {
    let (worker, contract, sender, recipient, network) = setup().await?;

    commit(&contract, &sender, &recipient, &network, 0)
        .await?
        .into_result()?;

    // Anyone may purge an expired commitment
    let stranger = worker.dev_create_account().await?;
    let result = stranger
        .call(contract.id(), "remove_commitment")
        .args_json(json!({ "hash": hashed_secret() }))
        .transact()
        .await?
        .into_result()?;
    println!("Remove logs: {:?}", result.logs());
    assert!(result
        .logs()
        .iter()
        .any(|log| log.contains(r#""event":"expire_commitment""#)));
    assert!(get_commitment(&contract).await?.is_none());

    let claim = recipient
        .call(contract.id(), "claim")
        .args_json(json!({
            "path": [sender.id(), recipient.id()],
            "max_fee": u64::MAX.to_string(),
            "extra_data": Base64VecU8::from(Vec::new()),
            "secret": Base64VecU8::from(secret()),
        }))
        .max_gas()
        .transact()
        .await?;
    let failure = claim.into_result().err().expect("call should fail");
    assert!(format!("{:?}", failure).contains("UnknownOrExpiredCommitment"));

    Ok(())
}

#[tokio::test]
#[ignore = "needs the near-sandbox binary and a wasm built with `cargo near build`"]
async fn test_remove_before_expiry_fails() -> Result<()> {
    let (_worker, contract, sender, recipient, network) = setup().await?;

    commit(&contract, &sender, &recipient, &network, WEEK_SECONDS)
        .await?
        .into_result()?;

    let result = sender
        .call(contract.id(), "remove_commitment")
        .args_json(json!({ "hash": hashed_secret() }))
        .transact()
        .await?;
    let failure = result.into_result().err().expect("call should fail");
    assert!(format!("{:?}", failure).contains("NotYetExpired"));
    assert!(get_commitment(&contract).await?.is_some());

    Ok(())
}

#[tokio::test]
#[ignore = "needs the near-sandbox binary and a wasm built with `cargo near build`"]
async fn test_failed_settlement_keeps_commitment() -> Result<()> {
    let (_worker, contract, sender, recipient, network) = setup().await?;

    commit(&contract, &sender, &recipient, &network, WEEK_SECONDS)
        .await?
        .into_result()?;

    // The network account has no contract deployed, so `transfer` fails
    let claim = recipient
        .call(contract.id(), "claim")
        .args_json(json!({
            "path": [sender.id(), recipient.id()],
            "max_fee": u64::MAX.to_string(),
            "extra_data": Base64VecU8::from(Vec::new()),
            "secret": Base64VecU8::from(secret()),
        }))
        .max_gas()
        .transact()
        .await?;
    println!("Claim logs: {:?}", claim.logs());
    assert!(claim
        .logs()
        .iter()
        .any(|log| log.starts_with("SWAP_SETTLEMENT_FAILED")));
    let failure = claim.into_result().err().expect("claim should fail");
    assert!(format!("{:?}", failure).contains("SettlementFailed"));

    assert!(get_commitment(&contract).await?.is_some());
    let pending: bool = contract
        .view("is_claim_pending")
        .args_json(json!({ "hash": hashed_secret() }))
        .await?
        .json()?;
    assert!(!pending);

    Ok(())
}
