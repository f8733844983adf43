//! Quote command - fee for a confidential operation, no signer needed

use anyhow::Result;
use clap::ValueEnum;

use cloak_core::domain::{FeeOptions, OperationKind};
use cloak_core::Account;

use super::{get_context, parse_address, parse_amount};
use crate::output;

#[derive(Clone, Copy, ValueEnum)]
pub enum QuoteOperation {
    Deposit,
    Transfer,
    Withdraw,
}

impl From<QuoteOperation> for OperationKind {
    fn from(op: QuoteOperation) -> Self {
        match op {
            QuoteOperation::Deposit => OperationKind::Deposit,
            QuoteOperation::Transfer => OperationKind::Transfer,
            QuoteOperation::Withdraw => OperationKind::Withdraw,
        }
    }
}

pub async fn run(
    network: Option<&str>,
    address: &str,
    token: &str,
    operation: QuoteOperation,
    amount: Option<&str>,
    decimals: Option<u32>,
    recipient: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let address = parse_address(address, "account")?;

    let mut options = FeeOptions::new(operation.into(), parse_address(token, "token")?);
    if let Some(amount) = amount {
        options = options.with_amount(parse_amount(amount, decimals)?);
    }
    if let Some(recipient) = recipient {
        options = options.with_recipient(parse_address(recipient, "recipient")?);
    }

    let protocol = ctx.protocol_for(network, Account::read_only(address))?;
    let result = protocol.fee(options).await;

    if json {
        return output::print_json_result(result);
    }

    let quote = result?;
    if quote.is_placeholder() {
        output::warning(&format!("Fee: {}", output::format_quote(&quote)));
    } else {
        output::info(&format!("Fee: {}", output::format_quote(&quote)));
    }
    Ok(())
}
