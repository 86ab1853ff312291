//! # Shared Post Store
//!
//! The transactional backend shared by all clients. Each document carries a
//! version counter; `commit_vote` is a compare-and-swap against it, which is
//! what makes the vote engine's read-compute-commit loop safe under
//! cross-client concurrency.

use crate::adapters::{now_millis, ordered_posts, StoredPost};
use crate::ports::{PostStore, Version, VersionedPost};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;
use wall_feed::{Subscription, WallFeed};
use wall_types::{NewPost, PostId, StoreError, VoteState};

fn poisoned() -> StoreError {
    StoreError::Backend("store lock poisoned".to_owned())
}

/// In-memory transactional post store.
///
/// Emulates the remote store boundary: many independent clients may hold an
/// `Arc` of one instance and race on the same document. Ids are
/// store-generated. A `deny_writes` switch makes every write fail with
/// `PermissionDenied`, for exercising the local-fallback path.
pub struct SharedPostStore {
    docs: RwLock<HashMap<PostId, StoredPost>>,
    feed: Arc<WallFeed>,
    next_ord: AtomicU64,
    deny_writes: AtomicBool,
}

impl SharedPostStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
            feed: Arc::new(WallFeed::new()),
            next_ord: AtomicU64::new(0),
            deny_writes: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent writes with `PermissionDenied`.
    pub fn set_deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    /// The feed this store publishes to.
    #[must_use]
    pub fn feed(&self) -> Arc<WallFeed> {
        self.feed.clone()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(StoreError::PermissionDenied(
                "writes rejected by store rules".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for SharedPostStore {
    async fn create(&self, new_post: NewPost) -> Result<PostId, StoreError> {
        self.check_writable()?;

        let id = PostId(Uuid::new_v4().simple().to_string());
        let ord = self.next_ord.fetch_add(1, Ordering::SeqCst);
        let post = wall_types::Post {
            id: id.clone(),
            message: new_post.message,
            address: new_post.address,
            timestamp: now_millis(),
            signature: new_post.signature,
            ..wall_types::Post::default()
        };

        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        docs.insert(
            id.clone(),
            StoredPost {
                post,
                version: 1,
                ord,
            },
        );
        // Publish while still holding the lock so snapshots leave in commit
        // order.
        self.feed.publish(ordered_posts(&docs));
        debug!(post_id = %id, "Post created");
        Ok(id)
    }

    async fn read_versioned(&self, id: &PostId) -> Result<VersionedPost, StoreError> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        let stored = docs
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(VersionedPost {
            post: stored.post.clone(),
            version: stored.version,
        })
    }

    async fn commit_vote(
        &self,
        id: &PostId,
        expected: Version,
        state: VoteState,
    ) -> Result<(), StoreError> {
        self.check_writable()?;

        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        let stored = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if stored.version != expected {
            warn!(
                post_id = %id,
                expected,
                actual = stored.version,
                "Conditional commit lost the race"
            );
            return Err(StoreError::TransientConflict {
                post_id: id.clone(),
                expected,
                actual: stored.version,
            });
        }

        stored.post.apply_vote_state(state);
        stored.version += 1;
        debug!(post_id = %id, version = stored.version, "Vote state committed");

        self.feed.publish(ordered_posts(&docs));
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<wall_types::Post>, StoreError> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(ordered_posts(&docs))
    }

    fn subscribe(&self) -> Subscription {
        self.feed.subscribe()
    }
}
