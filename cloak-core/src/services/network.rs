//! Shape-erased protocol handle used by callers that pick a network at runtime

use super::protocol::{ChainProtocol, ContractProtocol};
use crate::config::NetworkShape;
use crate::domain::result::{Error, Result};
use crate::domain::{Amount, FeeOptions, FeeQuote, OperationKind, PublicBalanceOptions, TransferRequest};
use crate::ports::{ConfidentialProtocol, PublicLedger, TransferQuote};

/// A protocol bound to a configured network
pub enum NetworkProtocol {
    Contract(ContractProtocol),
    Chain(ChainProtocol),
}

impl NetworkProtocol {
    pub fn shape(&self) -> NetworkShape {
        match self {
            NetworkProtocol::Contract(_) => NetworkShape::Contract,
            NetworkProtocol::Chain(_) => NetworkShape::Chain,
        }
    }

    /// The confidential surface both shapes share
    pub fn confidential(&self) -> &dyn ConfidentialProtocol {
        match self {
            NetworkProtocol::Contract(p) => p,
            NetworkProtocol::Chain(p) => p,
        }
    }

    pub fn rpc_url(&self) -> &str {
        match self {
            NetworkProtocol::Contract(p) => &p.config().rpc_url,
            NetworkProtocol::Chain(p) => &p.config().rpc_url,
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            NetworkProtocol::Contract(p) => p.config().chain_id,
            NetworkProtocol::Chain(p) => p.config().chain_id,
        }
    }

    /// Public balance; only contract deployments expose one
    pub async fn public_balance(&self, options: PublicBalanceOptions) -> Result<Amount> {
        match self {
            NetworkProtocol::Contract(p) => p.get_public_balance(options).await,
            NetworkProtocol::Chain(_) => Err(Error::unsupported(
                "Public balance is not available on chain networks",
            )),
        }
    }

    /// Fee for any operation on contract networks, transfers only on chain networks
    pub async fn fee(&self, options: FeeOptions) -> Result<FeeQuote> {
        match self {
            NetworkProtocol::Contract(p) => p.get_fee(options).await,
            NetworkProtocol::Chain(p) => {
                if options.operation != OperationKind::Transfer {
                    return Err(Error::unsupported(format!(
                        "Chain networks only quote transfers, not {}",
                        options.operation
                    )));
                }
                let amount = options
                    .amount
                    .ok_or_else(|| Error::validation("Transfer quote needs an amount"))?;
                let recipient = options
                    .recipient
                    .ok_or_else(|| Error::validation("Transfer quote needs a recipient"))?;
                p.quote_transfer_confidential(TransferRequest::new(recipient, options.token, amount))
                    .await
            }
        }
    }

    /// Transfer quote on either shape
    pub async fn quote_transfer(&self, request: TransferRequest) -> Result<FeeQuote> {
        match self {
            NetworkProtocol::Contract(p) => p.get_fee(FeeOptions::from(&request)).await,
            NetworkProtocol::Chain(p) => p.quote_transfer_confidential(request).await,
        }
    }
}
