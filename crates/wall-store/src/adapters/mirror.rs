//! # Local Fallback Mirror
//!
//! In-process substitute for the shared store, used when no backing store is
//! reachable. There is only one logical writer (this process), so atomicity
//! reduces to: every operation reads current state and writes next state as
//! one synchronous step under the collection mutex, so no interleaving is
//! possible within that step.
//!
//! The mirror implements the same [`PostStore`] port with the same version
//! accounting, so the vote engine drives it through the identical
//! read-compute-commit path and the two backends cannot diverge.

use crate::adapters::{now_millis, ordered_posts, StoredPost};
use crate::ports::{PostStore, Version, VersionedPost};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;
use wall_feed::{Subscription, WallFeed};
use wall_types::{NewPost, Post, PostId, StoreError, VoteState};

fn poisoned() -> StoreError {
    StoreError::Backend("mirror lock poisoned".to_owned())
}

struct MirrorInner {
    docs: HashMap<PostId, StoredPost>,
    next_ord: u64,
}

/// In-memory fallback collection with locally synthesized ids.
pub struct LocalMirror {
    inner: Mutex<MirrorInner>,
    feed: Arc<WallFeed>,
}

impl LocalMirror {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MirrorInner {
                docs: HashMap::new(),
                next_ord: 0,
            }),
            feed: Arc::new(WallFeed::new()),
        }
    }

    /// The feed this mirror publishes to.
    #[must_use]
    pub fn feed(&self) -> Arc<WallFeed> {
        self.feed.clone()
    }

    /// Synthesize a unique local id from the creation instant plus a random
    /// component.
    fn synthesize_id() -> PostId {
        PostId(format!(
            "local-{}-{}",
            now_millis(),
            Uuid::new_v4().simple()
        ))
    }
}

impl Default for LocalMirror {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for LocalMirror {
    async fn create(&self, new_post: NewPost) -> Result<PostId, StoreError> {
        let id = Self::synthesize_id();
        let post = Post {
            id: id.clone(),
            message: new_post.message,
            address: new_post.address,
            timestamp: now_millis(),
            signature: new_post.signature,
            ..Post::default()
        };

        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        let ord = inner.next_ord;
        inner.next_ord += 1;
        inner.docs.insert(
            id.clone(),
            StoredPost {
                post,
                version: 1,
                ord,
            },
        );
        self.feed.publish(ordered_posts(&inner.docs));
        debug!(post_id = %id, "Post created in local mirror");
        Ok(id)
    }

    async fn read_versioned(&self, id: &PostId) -> Result<VersionedPost, StoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;
        let stored = inner
            .docs
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
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        let stored = inner
            .docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        // Single-writer mode: the version check is kept for parity with the
        // shared store, not because a conflict can occur here.
        if stored.version != expected {
            return Err(StoreError::TransientConflict {
                post_id: id.clone(),
                expected,
                actual: stored.version,
            });
        }

        stored.post.apply_vote_state(state);
        stored.version += 1;
        self.feed.publish(ordered_posts(&inner.docs));
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;
        Ok(ordered_posts(&inner.docs))
    }

    fn subscribe(&self) -> Subscription {
        self.feed.subscribe()
    }
}
