//! End-to-end tests through `CloakContext` and the built-in demo backend
//!
//! Two accounts share one demo ledger, so transfers between them are visible
//! on both sides.

mod common;

use std::sync::Arc;

use tempfile::TempDir;

use cloak_core::adapters::demo::{DemoBackendFactory, DemoLedger};
use cloak_core::config::{Config, DEMO_CHAIN_NETWORK, DEMO_NETWORK};
use cloak_core::domain::{
    Amount, ConfidentialBalanceOptions, DepositRequest, EnableOptions, PublicBalanceOptions,
    TransferRequest, WithdrawRequest,
};
use cloak_core::{CloakContext, NetworkProtocol};

use common::{addr, signing_account};

fn context_with_ledger(dir: &TempDir, ledger: Arc<DemoLedger>) -> CloakContext {
    let mut context = CloakContext::with_config(dir.path(), Config::default());
    context.register_backend(Arc::new(DemoBackendFactory::new(ledger)));
    context
}

async fn balance_of(protocol: &NetworkProtocol, token: &str) -> Amount {
    protocol
        .confidential()
        .get_confidential_balance(ConfidentialBalanceOptions::new(addr(token)))
        .await
        .unwrap()
        .amount
}

#[tokio::test]
async fn test_deposit_transfer_withdraw_between_accounts() {
    let dir = TempDir::new().unwrap();
    let ledger = Arc::new(DemoLedger::new());
    ledger
        .mint(&addr("0xA11CE"), &addr("0xAAA"), Amount::from(1_000u32))
        .unwrap();
    let context = context_with_ledger(&dir, Arc::clone(&ledger));

    let alice = context
        .protocol_for(Some(DEMO_NETWORK), signing_account("0xA11CE"))
        .unwrap();
    let bob = context
        .protocol_for(Some(DEMO_NETWORK), signing_account("0xB0B"))
        .unwrap();

    alice
        .confidential()
        .enable_confidentiality(EnableOptions::default())
        .await
        .unwrap();
    bob.confidential()
        .enable_confidentiality(EnableOptions::default())
        .await
        .unwrap();

    alice
        .confidential()
        .deposit_confidential(DepositRequest::new(addr("0xAAA"), 600u32))
        .await
        .unwrap();
    let receipt = alice
        .confidential()
        .transfer_confidential(TransferRequest::new(addr("0xB0B"), addr("0xAAA"), 250u32))
        .await
        .unwrap();
    assert!(receipt.hash.starts_with("0x"));

    assert_eq!(balance_of(&alice, "0xAAA").await, Amount::from(350u32));
    assert_eq!(balance_of(&bob, "0xAAA").await, Amount::from(250u32));

    bob.confidential()
        .withdraw_confidential(WithdrawRequest::new(addr("0xAAA"), 100u32))
        .await
        .unwrap();
    assert_eq!(balance_of(&bob, "0xAAA").await, Amount::from(150u32));

    let bob_public = bob
        .public_balance(PublicBalanceOptions::new(addr("0xAAA")))
        .await
        .unwrap();
    assert_eq!(bob_public, Amount::from(100u32));
    let alice_public = alice
        .public_balance(PublicBalanceOptions::new(addr("0xAAA")))
        .await
        .unwrap();
    assert_eq!(alice_public, Amount::from(400u32));
}

#[tokio::test]
async fn test_transfer_to_unregistered_recipient_fails() {
    let dir = TempDir::new().unwrap();
    let ledger = Arc::new(DemoLedger::new().with_faucet(Amount::from(10u8)));
    let context = context_with_ledger(&dir, ledger);

    let alice = context
        .protocol_for(Some(DEMO_CHAIN_NETWORK), signing_account("0xA11CE"))
        .unwrap();
    alice
        .confidential()
        .enable_confidentiality(EnableOptions::default())
        .await
        .unwrap();
    alice
        .confidential()
        .deposit_confidential(DepositRequest::new(addr("0xAAA"), 10u8))
        .await
        .unwrap();

    let err = alice
        .confidential()
        .transfer_confidential(TransferRequest::new(addr("0xCAFE"), addr("0xAAA"), 1u8))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "backend_failure");
    assert_eq!(balance_of(&alice, "0xAAA").await, Amount::from(10u8));
}

#[tokio::test]
async fn test_overdraw_is_backend_failure() {
    let dir = TempDir::new().unwrap();
    let context = context_with_ledger(&dir, Arc::new(DemoLedger::new()));

    let alice = context
        .protocol_for(None, signing_account("0xA11CE"))
        .unwrap();
    alice
        .confidential()
        .enable_confidentiality(EnableOptions::default())
        .await
        .unwrap();

    let err = alice
        .confidential()
        .deposit_confidential(DepositRequest::new(addr("0xAAA"), 1u8))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "backend_failure");
}

#[tokio::test]
async fn test_context_loads_settings_from_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{ "app": { "defaultNetwork": "demo-chain" } }"#,
    )
    .unwrap();

    let context = CloakContext::with_config(
        dir.path(),
        Config::load_with_override(dir.path(), None).unwrap(),
    );
    let protocol = context
        .protocol_for(None, common::read_only_account("0xA11CE"))
        .unwrap();
    assert!(matches!(protocol, NetworkProtocol::Chain(_)));
}
