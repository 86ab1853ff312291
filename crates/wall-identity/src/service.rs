//! # Identity Service
//!
//! Connects a wallet and requests signatures, classifying provider failures
//! into the shared [`WalletError`] taxonomy.

use crate::ports::{ProviderError, WalletProvider, USER_REJECTED_CODE};
use std::sync::Arc;
use tracing::{debug, info};
use wall_types::{normalize_address, WalletConnection, WalletError};

fn classify(err: ProviderError) -> WalletError {
    if err.code == USER_REJECTED_CODE {
        WalletError::UserRejected
    } else {
        WalletError::Provider {
            code: err.code,
            message: err.message,
        }
    }
}

/// Parse a hex quantity chain id (`0x1`, `0xaa36a7`, ...).
fn parse_chain_id(raw: &str) -> Result<u64, WalletError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u64::from_str_radix(digits, 16).map_err(|_| WalletError::InvalidChainId(raw.to_owned()))
}

/// Wallet boundary adapter.
///
/// Holds the provider if one is present in the environment; a missing
/// provider fails every operation with `ProviderUnavailable`.
pub struct IdentityService {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl IdentityService {
    /// Wrap a present provider.
    #[must_use]
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// An environment with no wallet provider.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { provider: None }
    }

    fn provider(&self) -> Result<&Arc<dyn WalletProvider>, WalletError> {
        self.provider
            .as_ref()
            .ok_or(WalletError::ProviderUnavailable)
    }

    /// Request account access and establish an identity.
    ///
    /// The returned address is lowercase-normalized. The chain id is
    /// retrieved alongside; a provider that reports a malformed chain id
    /// fails the connection.
    ///
    /// # Errors
    ///
    /// - `WalletError::ProviderUnavailable` if no provider is present
    /// - `WalletError::UserRejected` if the user declines the prompt
    /// - `WalletError::NoAccounts` if the provider returns none
    pub async fn connect(&self) -> Result<WalletConnection, WalletError> {
        let provider = self.provider()?;

        let accounts = provider.request_accounts().await.map_err(classify)?;
        let Some(first) = accounts.first() else {
            return Err(WalletError::NoAccounts);
        };
        let address = normalize_address(first);

        let chain_id = parse_chain_id(&provider.chain_id().await.map_err(classify)?)?;

        info!(address = %address, chain_id, "Wallet connected");
        Ok(WalletConnection {
            address,
            ens_name: None,
            chain_id: Some(chain_id),
        })
    }

    /// Request a personal-message signature from `address`.
    ///
    /// # Errors
    ///
    /// `WalletError::UserRejected` when the user declines; callers treat
    /// that as recoverable (the post goes out unsigned).
    pub async fn sign(&self, address: &str, message: &str) -> Result<String, WalletError> {
        let provider = self.provider()?;
        let signature = provider
            .personal_sign(message, address)
            .await
            .map_err(classify)?;
        debug!(address = %address, "Message signed");
        Ok(signature)
    }
}
