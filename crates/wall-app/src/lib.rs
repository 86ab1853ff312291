//! # Wall App - Client Runtime
//!
//! Wires the wall subsystems into one client session.
//!
//! ## Data flow
//!
//! ```text
//! [Identity] ──address──→ [WallClient] ──create/vote──→ [Post Store]
//!                              │                             │
//!                              │ view()                      │ publish
//!                              ▼                             ▼
//!                        [Projection] ◄──full snapshots── [Feed]
//! ```
//!
//! The client owns the error surface: every failure that reaches the user
//! becomes a dismissible [`Notice`] on the session's notice channel, and no
//! failure leaves the session stuck in an in-progress state.
//!
//! When the backing store denies writes, the session degrades to the local
//! fallback mirror and keeps working against it; both backends run the
//! exact same vote engine, so toggle semantics cannot diverge.

pub mod client;
pub mod config;
pub mod notice;

pub use client::WallClient;
pub use config::WallConfig;
pub use notice::{Notice, NoticeReceiver, Severity};
