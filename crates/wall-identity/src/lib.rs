//! # Wall Identity - Wallet Boundary Adapter
//!
//! Wraps a browser-style wallet provider behind a port and produces the two
//! things the wall needs from it: a lowercase address (plus chain id) and
//! best-effort personal-message signatures.
//!
//! Pure boundary adapter, no shared state. Signatures are opaque to every
//! other subsystem and never verified here or anywhere else.
//!
//! ## Rejection mapping
//!
//! Providers signal a declined prompt with the EIP-1193 error code 4001.
//! That code is mapped structurally to [`WalletError::UserRejected`]
//! (never by matching on error message text), because the post-creation
//! flow must tell "user said no" apart from "provider broke".
//!
//! [`WalletError::UserRejected`]: wall_types::WalletError::UserRejected

pub mod adapters;
pub mod ports;
pub mod service;

pub use adapters::StubWallet;
pub use ports::{ProviderError, WalletProvider, USER_REJECTED_CODE};
pub use service::IdentityService;
