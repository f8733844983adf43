//! Session command - interactive confidential operations for one account
//!
//! Confidential keys live only in this process, so enable and the operations
//! that need it run inside one session.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{Input, Password, Select};
use zeroize::Zeroizing;

use cloak_core::domain::{
    ConfidentialBalanceOptions, DepositRequest, EnableOptions, PublicBalanceOptions,
    TransferRequest, WithdrawRequest,
};
use cloak_core::{EntryPoint, LogEvent, NetworkProtocol, SigningAccount};

use super::{get_context, get_logger, log_event, parse_address, parse_amount};
use crate::output;

const ACTIONS: &[&str] = &[
    "Enable confidentiality",
    "Deposit",
    "Transfer",
    "Withdraw",
    "Confidential balance",
    "Public balance",
    "Quote transfer",
    "Exit",
];

/// Key from CLOAK_PRIVATE_KEY, otherwise a hidden prompt
fn read_private_key() -> Result<Zeroizing<String>> {
    if let Ok(key) = std::env::var("CLOAK_PRIVATE_KEY") {
        return Ok(Zeroizing::new(key));
    }
    let key = Password::new()
        .with_prompt("Signing key (hex)")
        .interact()?;
    Ok(Zeroizing::new(key))
}

fn prompt(label: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(label).interact_text()?)
}

pub async fn run(network: Option<&str>, address: &str, rpc_url: Option<&str>) -> Result<()> {
    if atty::isnt(atty::Stream::Stdin) {
        bail!("session needs an interactive terminal");
    }

    let ctx = get_context()?;
    let (name, settings) = ctx.network(network)?;
    let address = parse_address(address, "account")?;

    let key = read_private_key()?;
    let account = SigningAccount::from_hex_key(address.clone(), &key)
        .context("Invalid signing key")?
        .with_rpc_url(rpc_url.unwrap_or(&settings.rpc_url));
    drop(key);

    let protocol = ctx.protocol_for(Some(&name), account)?;
    let logger = get_logger().map(|l| l.with_entry_point(EntryPoint::Session));

    println!(
        "{} {} on {} ({})",
        "Session for".bold(),
        address,
        name,
        settings.shape.as_str()
    );

    loop {
        let choice = Select::new()
            .with_prompt("Action")
            .items(ACTIONS)
            .default(0)
            .interact()?;
        let action = ACTIONS[choice];
        if action == "Exit" {
            break;
        }

        let result = perform(&protocol, action).await;
        let mut event = LogEvent::new("session_action")
            .with_command(action.to_lowercase().replace(' ', "_"))
            .with_network(name.clone());
        match result {
            Ok(message) => output::success(&message),
            Err(e) => {
                let kind = super::error_kind(&e);
                event = event.with_error(kind, &e.to_string());
                output::error(&format!("{:#}", e));
            }
        }
        log_event(&logger, event);
    }

    Ok(())
}

async fn perform(protocol: &NetworkProtocol, action: &str) -> Result<String> {
    let confidential = protocol.confidential();
    match action {
        "Enable confidentiality" => {
            let keys = confidential
                .enable_confidentiality(EnableOptions::default())
                .await?;
            Ok(format!("Enabled. Confidential public key: {}", keys.public_key))
        }
        "Deposit" => {
            let token = parse_address(&prompt("Token")?, "token")?;
            let amount = parse_amount(&prompt("Amount (base units)")?, None)?;
            let receipt = confidential
                .deposit_confidential(DepositRequest::new(token, amount))
                .await?;
            Ok(format!("Deposited. Tx {}", receipt.hash))
        }
        "Transfer" => {
            let recipient = parse_address(&prompt("Recipient")?, "recipient")?;
            let token = parse_address(&prompt("Token")?, "token")?;
            let amount = parse_amount(&prompt("Amount (base units)")?, None)?;
            let receipt = confidential
                .transfer_confidential(TransferRequest::new(recipient, token, amount))
                .await?;
            Ok(format!("Transferred. Tx {}", receipt.hash))
        }
        "Withdraw" => {
            let token = parse_address(&prompt("Token")?, "token")?;
            let amount = parse_amount(&prompt("Amount (base units)")?, None)?;
            let receipt = confidential
                .withdraw_confidential(WithdrawRequest::new(token, amount))
                .await?;
            Ok(format!("Withdrawn. Tx {}", receipt.hash))
        }
        "Confidential balance" => {
            let token = parse_address(&prompt("Token")?, "token")?;
            let balance = confidential
                .get_confidential_balance(ConfidentialBalanceOptions::new(token))
                .await?;
            Ok(format!("Confidential balance: {}", balance.amount))
        }
        "Public balance" => {
            let token = parse_address(&prompt("Token")?, "token")?;
            let amount = protocol
                .public_balance(PublicBalanceOptions::new(token))
                .await?;
            Ok(format!("Public balance: {}", amount))
        }
        "Quote transfer" => {
            let recipient = parse_address(&prompt("Recipient")?, "recipient")?;
            let token = parse_address(&prompt("Token")?, "token")?;
            let amount = parse_amount(&prompt("Amount (base units)")?, None)?;
            let quote = protocol
                .quote_transfer(TransferRequest::new(recipient, token, amount))
                .await?;
            Ok(format!("Fee: {}", output::format_quote(&quote)))
        }
        other => bail!("Unknown action {}", other),
    }
}
