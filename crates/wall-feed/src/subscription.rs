//! # Feed Subscription
//!
//! The receiving side of the wall feed.

use crate::snapshot::FeedSnapshot;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The feed was dropped.
    #[error("Feed closed")]
    Closed,
}

/// A live subscription to the wall feed.
///
/// Yields full ordered snapshots; the current snapshot (if any) is delivered
/// first. Dropping the handle revokes the subscription; no further
/// snapshots are delivered after that point.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<FeedSnapshot>,

    /// Snapshot seeded at subscribe time, served before any live event.
    seeded: Option<FeedSnapshot>,

    /// Shared subscriber counter (decremented on drop).
    subscribers: Arc<AtomicUsize>,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<FeedSnapshot>,
        seeded: Option<FeedSnapshot>,
        subscribers: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            receiver,
            seeded,
            subscribers,
        }
    }

    /// Receive the next snapshot.
    ///
    /// # Returns
    ///
    /// - `Some(snapshot)` - The next full snapshot
    /// - `None` - The feed was dropped
    pub async fn recv(&mut self) -> Option<FeedSnapshot> {
        if let Some(seeded) = self.seeded.take() {
            return Some(seeded);
        }

        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    // Only the newest snapshot matters; skipping lagged
                    // intermediates is lossless for full-snapshot delivery.
                    debug!(lagged = count, "Subscriber lagged, skipping stale snapshots");
                    continue;
                }
            }
        }
    }

    /// Try to receive the next snapshot without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))` - A snapshot was available
    /// - `Ok(None)` - No snapshot available (would block)
    /// - `Err(FeedError::Closed)` - The feed was dropped
    pub fn try_recv(&mut self) -> Result<Option<FeedSnapshot>, FeedError> {
        if let Some(seeded) = self.seeded.take() {
            return Ok(Some(seeded));
        }

        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => return Ok(Some(snapshot)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(FeedError::Closed),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.subscribers.fetch_sub(1, Ordering::SeqCst);
        debug!("Feed subscription dropped");
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct SnapshotStream {
    subscription: Subscription,
}

impl SnapshotStream {
    /// Wrap a subscription as a stream.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }
}

impl Stream for SnapshotStream {
    type Item = FeedSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.subscription.try_recv() {
            Ok(Some(snapshot)) => Poll::Ready(Some(snapshot)),
            Ok(None) => {
                // No snapshot ready; re-arm and wait.
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(FeedError::Closed) => Poll::Ready(None),
        }
    }
}
