//! Account capability adapter
//!
//! Turns an `Account` into a `Signer` a backend can use. This is the only
//! place raw key bytes are re-encoded; the hex copy lives in a zeroizing
//! buffer owned by the signer and is never written anywhere else.

use std::fmt::Write as _;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::jsonrpc::JsonRpcProvider;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, OperationKind, ProviderDescriptor, Signer, SigningAccount};
use crate::ports::ChainProvider;

/// Resolve the account's provider, building a JSON-RPC binding from a URL
pub fn connect_provider(account: &SigningAccount) -> Result<Arc<dyn ChainProvider>> {
    match account.provider() {
        None => Err(Error::not_connected(format!(
            "Account {} has no provider; attach an RPC URL or provider first",
            account.address()
        ))),
        Some(ProviderDescriptor::Url(url)) => Ok(Arc::new(JsonRpcProvider::new(url)?)),
        Some(ProviderDescriptor::Injected(provider)) => Ok(Arc::clone(provider)),
    }
}

/// Build a signer for a mutating operation
///
/// Read-only accounts fail with `UnsupportedOperation`; signing accounts
/// without a reachable provider fail with `NotConnected`.
pub fn signer_for(account: &Account, operation: OperationKind) -> Result<Signer> {
    let signing = match account {
        Account::ReadOnly(ro) => {
            return Err(Error::unsupported(format!(
                "{} requires a signing account; {} is read-only",
                operation,
                ro.address()
            )))
        }
        Account::Signing(signing) => signing,
    };

    let provider = connect_provider(signing)?;
    let key_hex = encode_key_hex(signing.private_key_bytes());

    Ok(Signer::new(signing.address().clone(), key_hex, provider))
}

/// `0x`-prefixed lowercase hex written straight into a zeroizing buffer
fn encode_key_hex(bytes: &[u8]) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::with_capacity(2 + bytes.len() * 2));
    out.push_str("0x");
    for byte in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rpc_mock::{MockRpcConfig, MockRpcServer};
    use crate::domain::Address;

    fn address() -> Address {
        Address::parse("0xA11CE").unwrap()
    }

    #[test]
    fn test_read_only_is_unsupported() {
        let account = Account::read_only(address());
        let err = signer_for(&account, OperationKind::Deposit).unwrap_err();
        assert_eq!(err.kind(), "unsupported_operation");
        assert!(err.to_string().contains("deposit"));
    }

    #[test]
    fn test_missing_provider_is_not_connected() {
        let account: Account = SigningAccount::new(address(), vec![1, 2]).unwrap().into();
        let err = signer_for(&account, OperationKind::Enable).unwrap_err();
        assert_eq!(err.kind(), "not_connected");
    }

    #[test]
    fn test_invalid_url_is_not_connected() {
        let account: Account = SigningAccount::new(address(), vec![1])
            .unwrap()
            .with_rpc_url("::nope::")
            .into();
        let err = signer_for(&account, OperationKind::Enable).unwrap_err();
        assert_eq!(err.kind(), "not_connected");
    }

    #[test]
    fn test_signer_carries_hex_key() {
        let account: Account = SigningAccount::new(address(), vec![0x00, 0xab, 0x0f])
            .unwrap()
            .with_rpc_url("http://127.0.0.1:8545")
            .into();
        let signer = signer_for(&account, OperationKind::Deposit).unwrap();
        assert_eq!(signer.private_key_hex(), "0x00ab0f");
        assert_eq!(signer.address(), &address());
        assert_eq!(signer.provider().url(), "http://127.0.0.1:8545");
        assert!(!format!("{:?}", signer).contains("00ab0f"));
    }

    #[tokio::test]
    async fn test_injected_provider_is_used_directly() {
        let server = MockRpcServer::start(MockRpcConfig {
            chain_id: 11155111,
            ..Default::default()
        })
        .unwrap();
        let injected: Arc<dyn ChainProvider> =
            Arc::new(JsonRpcProvider::new(&server.base_url()).unwrap());

        let account: Account = SigningAccount::new(address(), vec![7])
            .unwrap()
            .with_provider(ProviderDescriptor::Injected(Arc::clone(&injected)))
            .into();

        let signer = signer_for(&account, OperationKind::Transfer).unwrap();
        assert!(Arc::ptr_eq(signer.provider(), &injected));
        assert_eq!(server.request_count(), 0);
        assert_eq!(signer.provider().chain_id().await.unwrap(), 11155111);
        assert_eq!(server.request_count(), 1);
    }
}
