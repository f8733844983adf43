//! Public-balance command - read a public token balance without a signer

use anyhow::Result;

use cloak_core::domain::PublicBalanceOptions;
use cloak_core::Account;

use super::{get_context, parse_address};
use crate::output;

pub async fn run(
    network: Option<&str>,
    address: &str,
    token: &str,
    decimals: Option<u32>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let address = parse_address(address, "account")?;
    let token = parse_address(token, "token")?;

    let protocol = ctx.protocol_for(network, Account::read_only(address.clone()))?;
    let result = protocol
        .public_balance(PublicBalanceOptions::new(token.clone()))
        .await;

    if json {
        return output::print_json_result(result);
    }

    let amount = result?;
    let shown = match decimals {
        Some(d) => amount.format_units(d),
        None => amount.to_string(),
    };
    output::info(&format!("Public balance of {} in {}: {}", address, token, shown));
    Ok(())
}
