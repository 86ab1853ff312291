//! # Wallet Provider Port
//!
//! Trait definition for the external wallet boundary.

use async_trait::async_trait;
use thiserror::Error;

/// EIP-1193 "user rejected request" error code.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Raw failure from the wallet provider, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    /// Provider-defined numeric code (EIP-1193 for browser wallets).
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// A user-rejection error, as a browser wallet would raise it.
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            code: USER_REJECTED_CODE,
            message: "User rejected the request.".to_owned(),
        }
    }
}

/// The external wallet capability.
///
/// Mirrors the browser provider surface: account access, chain id and
/// personal-message signing. Everything returned is provider-cased and
/// unvalidated; normalization happens in the identity service.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access. The first account is the active identity.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Current chain id as a hex quantity string (e.g. `0x1`).
    async fn chain_id(&self) -> Result<String, ProviderError>;

    /// Sign `message` with the key behind `address` (personal sign).
    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError>;
}
