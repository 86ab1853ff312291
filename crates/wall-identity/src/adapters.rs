//! # Wallet Adapters
//!
//! In-memory wallet provider for tests and the demo runtime. A browser
//! deployment would implement [`WalletProvider`] against the injected
//! provider object instead.

use crate::ports::{ProviderError, WalletProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Deterministic in-memory wallet.
///
/// Signs by hashing (cheaply, not cryptographically) the message and
/// address; rejection of the connection or signing prompt can be toggled to
/// exercise the `UserRejected` paths.
pub struct StubWallet {
    accounts: RwLock<Vec<String>>,
    chain_id: String,
    reject_connection: AtomicBool,
    reject_signing: AtomicBool,
}

impl StubWallet {
    /// A wallet holding `accounts` on the chain with hex id `chain_id`.
    #[must_use]
    pub fn new(accounts: Vec<String>, chain_id: &str) -> Self {
        Self {
            accounts: RwLock::new(accounts),
            chain_id: chain_id.to_owned(),
            reject_connection: AtomicBool::new(false),
            reject_signing: AtomicBool::new(false),
        }
    }

    /// A single-account wallet on mainnet.
    #[must_use]
    pub fn with_account(address: &str) -> Self {
        Self::new(vec![address.to_owned()], "0x1")
    }

    /// Make the next connection prompts fail with the rejection code.
    pub fn reject_connection(&self, reject: bool) {
        self.reject_connection.store(reject, Ordering::SeqCst);
    }

    /// Make the next signing prompts fail with the rejection code.
    pub fn reject_signing(&self, reject: bool) {
        self.reject_signing.store(reject, Ordering::SeqCst);
    }

    fn digest(message: &str, address: &str) -> u64 {
        // FNV-1a; stable fake signature material, no crypto intended.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in message.bytes().chain(address.bytes()) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }
}

#[async_trait]
impl WalletProvider for StubWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        if self.reject_connection.load(Ordering::SeqCst) {
            return Err(ProviderError::rejected());
        }
        self.accounts
            .read()
            .map(|accounts| accounts.clone())
            .map_err(|_| ProviderError {
                code: -32603,
                message: "internal error".to_owned(),
            })
    }

    async fn chain_id(&self) -> Result<String, ProviderError> {
        Ok(self.chain_id.clone())
    }

    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        if self.reject_signing.load(Ordering::SeqCst) {
            return Err(ProviderError::rejected());
        }
        Ok(format!("0x{:016x}", Self::digest(message, address)))
    }
}
