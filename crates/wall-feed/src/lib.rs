//! # Wall Feed - Realtime Snapshot Channel
//!
//! Push-based delivery of the post collection to all connected clients.
//!
//! ## Semantics
//!
//! - Every committed store change publishes the **full** collection, ordered
//!   by timestamp descending, never incremental deltas. Consumers replace
//!   their local view wholesale on each event, so a client's view always
//!   reflects a consistent total order.
//! - A new subscriber receives the current snapshot first, then one snapshot
//!   per subsequent change.
//! - Dropping a [`Subscription`] revokes it; nothing is delivered afterwards.
//!
//! ```text
//! ┌──────────────┐                     ┌──────────────┐
//! │  Post Store  │                     │   Client A   │
//! │              │    publish()        │              │
//! │              │ ──────┐             └──────────────┘
//! └──────────────┘       │                    ↑
//!                        ▼                    │
//!                  ┌──────────────┐           │
//!                  │  Wall Feed   │ ──────────┤ subscribe()
//!                  │              │ ──────────┘
//!                  └──────────────┘      ┌──────────────┐
//!                                        │   Client B   │
//!                                        └──────────────┘
//! ```

pub mod snapshot;
pub mod subscription;

pub use snapshot::{FeedSnapshot, WallFeed};
pub use subscription::{FeedError, SnapshotStream, Subscription};

/// Maximum snapshots to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
