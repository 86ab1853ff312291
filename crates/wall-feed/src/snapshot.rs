//! # Snapshot Publisher
//!
//! The publishing side of the wall feed.

use crate::subscription::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use wall_types::Post;

/// One full view of the post collection at a point in time.
///
/// `posts` is already ordered by timestamp descending (stable). `seq` is a
/// feed-local sequence number, strictly increasing per publish; useful for
/// consumers that want to drop stale redeliveries.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Publish sequence number, starting at 1. Seeded initial snapshots
    /// reuse the sequence of the publish they were taken from (0 if none).
    pub seq: u64,
    /// The complete ordered collection.
    pub posts: Arc<Vec<Post>>,
}

impl FeedSnapshot {
    fn empty() -> Self {
        Self {
            seq: 0,
            posts: Arc::new(Vec::new()),
        }
    }
}

/// In-memory snapshot feed.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Suitable for in-process operation; a remote deployment would
/// put a network boundary behind the same interface.
pub struct WallFeed {
    /// Broadcast sender for snapshots.
    sender: broadcast::Sender<FeedSnapshot>,

    /// Latest published snapshot, used to seed new subscribers.
    latest: RwLock<FeedSnapshot>,

    /// Publish sequence counter.
    seq: AtomicU64,

    /// Active subscription count.
    subscribers: Arc<AtomicUsize>,

    /// Channel capacity.
    capacity: usize,
}

impl WallFeed {
    /// Create a feed with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a feed with the specified per-subscriber buffer capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            latest: RwLock::new(FeedSnapshot::empty()),
            seq: AtomicU64::new(0),
            subscribers: Arc::new(AtomicUsize::new(0)),
            capacity,
        }
    }

    /// Publish a new full snapshot to all subscribers.
    ///
    /// `posts` must already be in presentation order (timestamp descending).
    /// Returns the number of subscribers that received the snapshot.
    pub fn publish(&self, posts: Vec<Post>) -> usize {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = FeedSnapshot {
            seq,
            posts: Arc::new(posts),
        };

        if let Ok(mut latest) = self.latest.write() {
            *latest = snapshot.clone();
        }

        match self.sender.send(snapshot) {
            Ok(receiver_count) => {
                debug!(seq, receivers = receiver_count, "Snapshot published");
                receiver_count
            }
            Err(e) => {
                // No receivers right now; the snapshot is still retained as
                // `latest` and will seed the next subscriber.
                debug!(seq, error = %e, "Snapshot published with no receivers");
                0
            }
        }
    }

    /// Subscribe to the feed.
    ///
    /// The returned handle yields the current snapshot first (if any post has
    /// ever been published), then one snapshot per subsequent publish.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let receiver = self.sender.subscribe();
        let seeded = match self.latest.read() {
            Ok(latest) if latest.seq > 0 => Some(latest.clone()),
            Ok(_) => None,
            Err(_) => {
                warn!("Feed latest-snapshot lock poisoned; subscriber starts unseeded");
                None
            }
        };

        self.subscribers.fetch_add(1, Ordering::SeqCst);
        debug!(seeded = seeded.is_some(), "New feed subscription");

        Subscription::new(receiver, seeded, self.subscribers.clone())
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }

    /// Total snapshots published.
    #[must_use]
    pub fn snapshots_published(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    /// The per-subscriber buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for WallFeed {
    fn default() -> Self {
        Self::new()
    }
}
