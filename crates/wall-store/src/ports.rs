//! # Store Port
//!
//! Trait definition for the post record store boundary.

use async_trait::async_trait;
use wall_feed::Subscription;
use wall_types::{NewPost, Post, PostId, StoreError, VoteState};

/// Per-document version counter.
///
/// Incremented on every committed write; a conditional commit succeeds only
/// when the caller's expected version still matches.
pub type Version = u64;

/// A post together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedPost {
    pub post: Post,
    pub version: Version,
}

/// Post record store abstraction.
///
/// The only shared mutable resource in the system is the post document, and
/// the only write paths are `create` and `commit_vote`. Vote state is never
/// mutated by direct field assignment from any caller.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Create a post.
    ///
    /// The store assigns the id and the creation timestamp (epoch
    /// milliseconds) and zeroes the voting state. Publishes a snapshot.
    async fn create(&self, new_post: NewPost) -> Result<PostId, StoreError>;

    /// Read a post together with its current version.
    async fn read_versioned(&self, id: &PostId) -> Result<VersionedPost, StoreError>;

    /// Conditionally commit recomputed vote state.
    ///
    /// # Errors
    ///
    /// - `StoreError::TransientConflict` if the document's version is no
    ///   longer `expected` (another writer got there first)
    /// - `StoreError::NotFound` if the document vanished
    ///
    /// On success the document's version advances by one and a snapshot is
    /// published.
    async fn commit_vote(
        &self,
        id: &PostId,
        expected: Version,
        state: VoteState,
    ) -> Result<(), StoreError>;

    /// The full collection, timestamp descending, ties in arrival order.
    async fn snapshot(&self) -> Result<Vec<Post>, StoreError>;

    /// Subscribe to full ordered snapshots.
    ///
    /// The current snapshot is delivered first; dropping the handle revokes
    /// the subscription.
    fn subscribe(&self) -> Subscription;
}
