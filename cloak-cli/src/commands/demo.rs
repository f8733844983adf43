//! Demo command - scripted walkthrough on the demo backend

use anyhow::{bail, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use cloak_core::domain::{
    ConfidentialBalanceOptions, DepositRequest, EnableOptions, FeeQuote, PublicBalanceOptions,
    TransferRequest, WithdrawRequest,
};
use cloak_core::{Address, Amount, NetworkProtocol, SigningAccount};

use super::{get_context, parse_address};
use crate::output;

const ALICE: &str = "0xA11CE";
const BOB: &str = "0xB0B";
const ALICE_KEY: &str = "0xa11ce00000000000000000000000000000000000000000000000000000000001";
const BOB_KEY: &str = "0xb0b0000000000000000000000000000000000000000000000000000000000002";

const DEPOSIT: u64 = 1_000;
const TRANSFER: u64 = 400;
const WITHDRAW: u64 = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountSummary {
    address: Address,
    confidential: Amount,
    public: Option<Amount>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoSummary {
    network: String,
    token: Address,
    transactions: Vec<String>,
    transfer_quote: FeeQuote,
    accounts: Vec<AccountSummary>,
}

fn signing(address: &str, key: &str, rpc_url: &str) -> Result<SigningAccount> {
    Ok(SigningAccount::from_hex_key(parse_address(address, "demo")?, key)?.with_rpc_url(rpc_url))
}

fn progress(steps: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(steps);
    if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

async fn summarize(protocol: &NetworkProtocol, token: &Address) -> Result<AccountSummary> {
    let confidential = protocol
        .confidential()
        .get_confidential_balance(ConfidentialBalanceOptions::new(token.clone()))
        .await?
        .amount;
    let public = match protocol {
        NetworkProtocol::Contract(_) => Some(
            protocol
                .public_balance(PublicBalanceOptions::new(token.clone()))
                .await?,
        ),
        NetworkProtocol::Chain(_) => None,
    };
    Ok(AccountSummary {
        address: protocol.confidential().address().clone(),
        confidential,
        public,
    })
}

pub async fn run(network: Option<&str>, token: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let (name, settings) = ctx.network(network)?;
    if settings.backend != "demo" {
        bail!(
            "The demo walkthrough needs a network with the demo backend; '{}' uses '{}'",
            name,
            settings.backend
        );
    }
    let token = parse_address(token, "token")?;

    let alice = ctx.protocol_for(Some(&name), signing(ALICE, ALICE_KEY, &settings.rpc_url)?)?;
    let bob = ctx.protocol_for(Some(&name), signing(BOB, BOB_KEY, &settings.rpc_url)?)?;

    let bar = progress(6, json);
    let mut transactions = Vec::new();

    bar.set_message("Enabling Alice");
    alice
        .confidential()
        .enable_confidentiality(EnableOptions::default())
        .await?;
    bar.inc(1);

    bar.set_message("Enabling Bob");
    bob.confidential()
        .enable_confidentiality(EnableOptions::default())
        .await?;
    bar.inc(1);

    bar.set_message("Alice deposits");
    let receipt = alice
        .confidential()
        .deposit_confidential(DepositRequest::new(token.clone(), DEPOSIT))
        .await?;
    transactions.push(receipt.hash);
    bar.inc(1);

    bar.set_message("Quoting transfer");
    let transfer = TransferRequest::new(bob.confidential().address().clone(), token.clone(), TRANSFER);
    let transfer_quote = alice.quote_transfer(transfer.clone()).await?;
    bar.inc(1);

    bar.set_message("Alice transfers to Bob");
    let receipt = alice.confidential().transfer_confidential(transfer).await?;
    transactions.push(receipt.hash);
    bar.inc(1);

    bar.set_message("Bob withdraws");
    let receipt = bob
        .confidential()
        .withdraw_confidential(WithdrawRequest::new(token.clone(), WITHDRAW))
        .await?;
    transactions.push(receipt.hash);
    bar.inc(1);
    bar.finish_and_clear();

    let summary = DemoSummary {
        accounts: vec![summarize(&alice, &token).await?, summarize(&bob, &token).await?],
        network: name,
        token,
        transactions,
        transfer_quote,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} on {}", "Demo walkthrough".bold(), summary.network);
    println!();
    for hash in &summary.transactions {
        println!("  tx {}", hash.dimmed());
    }
    println!("  transfer fee {}", output::format_quote(&summary.transfer_quote));
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Confidential", "Public"]);
    for account in &summary.accounts {
        table.add_row(vec![
            account.address.to_string(),
            account.confidential.to_string(),
            account
                .public
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
    output::success("Demo complete");
    Ok(())
}
