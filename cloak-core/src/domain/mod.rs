//! Core domain entities
//!
//! Plain data with validation logic. Nothing here performs I/O.

pub mod account;
pub mod address;
pub mod amount;
mod keys;
mod network;
mod operation;
pub mod result;
mod signer;

pub use account::{Account, ProviderDescriptor, ReadOnlyAccount, SigningAccount};
pub use address::Address;
pub use amount::{Amount, RawAmount};
pub use keys::{ConfidentialKeys, ConfidentialPrivateKey, ExportedKeys};
pub use network::{ChainProtocolConfig, ContractProtocolConfig, ProtocolShape};
pub use operation::{
    BalanceResult, ConfidentialBalanceOptions, DepositRequest, EnableOptions, FeeOptions, FeeQuote,
    OperationKind, PublicBalanceOptions, QuoteKind, TransferRequest, TxReceipt, WithdrawRequest,
};
pub use signer::Signer;
