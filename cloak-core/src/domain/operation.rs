//! Operation requests and results

use std::fmt;

use serde::Serialize;

use super::address::Address;
use super::amount::Amount;

/// Confidential operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Enable,
    Deposit,
    Transfer,
    Withdraw,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Deposit => "deposit",
            Self::Transfer => "transfer",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for `enable_confidentiality`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnableOptions {
    /// Return already-stored keys instead of registering again
    ///
    /// Off by default: every enable call re-registers with the settlement
    /// contract and replaces the stored keys.
    pub reuse_existing: bool,
}

impl EnableOptions {
    pub fn reuse_existing() -> Self {
        Self {
            reuse_existing: true,
        }
    }
}

/// Move public holdings into the confidential ledger
#[derive(Debug, Clone)]
pub struct DepositRequest {
    pub token: Address,
    pub amount: Amount,
}

impl DepositRequest {
    pub fn new(token: Address, amount: impl Into<Amount>) -> Self {
        Self {
            token,
            amount: amount.into(),
        }
    }
}

/// Confidential transfer to another registered account
///
/// `Debug` omits the amount.
#[derive(Clone)]
pub struct TransferRequest {
    pub recipient: Address,
    pub token: Address,
    pub amount: Amount,
}

impl TransferRequest {
    pub fn new(recipient: Address, token: Address, amount: impl Into<Amount>) -> Self {
        Self {
            recipient,
            token,
            amount: amount.into(),
        }
    }
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("recipient", &self.recipient)
            .field("token", &self.token)
            .field("amount", &"<confidential>")
            .finish()
    }
}

/// Move confidential holdings back to the public ledger
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    pub token: Address,
    pub amount: Amount,
}

impl WithdrawRequest {
    pub fn new(token: Address, amount: impl Into<Amount>) -> Self {
        Self {
            token,
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfidentialBalanceOptions {
    pub token: Address,
}

impl ConfidentialBalanceOptions {
    pub fn new(token: Address) -> Self {
        Self { token }
    }
}

#[derive(Debug, Clone)]
pub struct PublicBalanceOptions {
    pub token: Address,
}

impl PublicBalanceOptions {
    pub fn new(token: Address) -> Self {
        Self { token }
    }
}

/// What to estimate a fee for
#[derive(Clone)]
pub struct FeeOptions {
    pub operation: OperationKind,
    pub token: Address,
    pub amount: Option<Amount>,
    pub recipient: Option<Address>,
}

impl FeeOptions {
    pub fn new(operation: OperationKind, token: Address) -> Self {
        Self {
            operation,
            token,
            amount: None,
            recipient: None,
        }
    }

    pub fn with_amount(mut self, amount: impl Into<Amount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }
}

impl From<&TransferRequest> for FeeOptions {
    fn from(request: &TransferRequest) -> Self {
        FeeOptions::new(OperationKind::Transfer, request.token.clone())
            .with_amount(request.amount.clone())
            .with_recipient(request.recipient.clone())
    }
}

impl fmt::Debug for FeeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeeOptions")
            .field("operation", &self.operation)
            .field("token", &self.token)
            .field("amount", &self.amount.as_ref().map(|_| "<confidential>"))
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Result of a mutating operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    /// Chain-specific transaction hash, passed through unchanged
    pub hash: String,
}

impl TxReceipt {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

/// Result of a balance query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceResult {
    pub amount: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteKind {
    /// Estimate produced by the backend
    Estimated,
    /// The backend cannot estimate; `fee` is zero and meaningless
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub fee: Amount,
    pub kind: QuoteKind,
}

impl FeeQuote {
    pub fn estimated(fee: Amount) -> Self {
        Self {
            fee,
            kind: QuoteKind::Estimated,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            fee: Amount::zero(),
            kind: QuoteKind::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == QuoteKind::Placeholder
    }
}
