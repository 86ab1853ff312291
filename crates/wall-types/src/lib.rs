//! # Wall Types Crate
//!
//! This crate contains all domain entities and error types shared across
//! the wall subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Lowercase Identity**: Wallet addresses are normalized to lowercase
//!   before comparison or storage; `normalize_address` is the only way an
//!   address enters a `Post`.
//! - **Opaque Signatures**: Signatures are carried as strings and never
//!   validated by any wall subsystem.

pub mod address;
pub mod entities;
pub mod errors;

pub use address::{identicon, initials, normalize_address, shorten_address, Identicon};
pub use entities::*;
pub use errors::*;
