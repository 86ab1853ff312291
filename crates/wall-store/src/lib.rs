//! # Wall Store - Post Record Store
//!
//! The durable collection of posts behind the wall.
//!
//! ## Architecture
//!
//! This crate follows the ports-and-adapters split:
//! - **Ports** (`ports.rs`): the [`PostStore`] trait: create, versioned
//!   read, conditional vote commit, snapshot, subscribe.
//! - **Adapters** (`adapters/`): two in-memory implementations sharing the
//!   exact same externally-observable semantics:
//!   - [`SharedPostStore`]: a per-document version counter makes the
//!     conditional commit a compare-and-swap, so many concurrent clients can
//!     race on one post and lose nothing but time.
//!   - [`LocalMirror`]: fallback mode for when no backing store is
//!     reachable; single logical writer, ids synthesized locally.
//!
//! The store never interprets votes: the toggle transition lives in the vote
//! engine, and the store's only job is to commit the recomputed vote state
//! iff the document is unchanged since it was read.
//!
//! Every committed change publishes the full ordered collection through
//! `wall-feed`.

pub mod adapters;
pub mod ports;

pub use adapters::{LocalMirror, SharedPostStore};
pub use ports::{PostStore, Version, VersionedPost};
