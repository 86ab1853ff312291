//! # Store Adapters
//!
//! In-memory implementations of the [`PostStore`](crate::ports::PostStore)
//! port. Both adapters keep the collection as a map of stored documents and
//! share the ordering rule below, so their feeds are indistinguishable.

mod mirror;
mod shared;

pub use mirror::LocalMirror;
pub use shared::SharedPostStore;

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use wall_types::{Post, PostId};

/// A stored document: the post, its version and its arrival order.
#[derive(Debug, Clone)]
pub(crate) struct StoredPost {
    pub post: Post,
    pub version: u64,
    /// Monotonic arrival index; tie-breaker for equal timestamps.
    pub ord: u64,
}

/// Collection in presentation order: timestamp descending, ties broken by
/// arrival order (stable).
pub(crate) fn ordered_posts(docs: &HashMap<PostId, StoredPost>) -> Vec<Post> {
    let mut stored: Vec<&StoredPost> = docs.values().collect();
    stored.sort_by(|a, b| {
        b.post
            .timestamp
            .cmp(&a.post.timestamp)
            .then(a.ord.cmp(&b.ord))
    });
    stored.into_iter().map(|s| s.post.clone()).collect()
}

/// Current instant in epoch milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
