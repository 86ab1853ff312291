//! # Core Domain Entities
//!
//! Defines the wall entities and their wire shape.
//!
//! ## Clusters
//!
//! - **Posts**: `Post`, `NewPost`, `PostId`, `VoteState`
//! - **Identity**: `WalletConnection`
//! - **Voting**: `Reaction`

use serde::{Deserialize, Serialize};

/// Maximum post message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Unique identifier for a post.
///
/// Opaque: either assigned by the backing store or synthesized locally in
/// fallback mode. Never parsed or interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PostId(pub String);

impl PostId {
    /// Borrow the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A single user-authored message with voting state.
///
/// Created once, never edited or deleted; mutated only through the vote
/// toggle engine. Field names on the wire match the stored document shape
/// (`likedBy`, `dislikedBy`, `ensName` are camelCase).
///
/// ## Invariants (post-transaction)
///
/// - `likes == liked_by.len()` and `dislikes == disliked_by.len()`
/// - `liked_by` and `disliked_by` are disjoint sets of lowercase addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Post {
    /// Opaque unique identifier, assigned at creation.
    pub id: PostId,
    /// Post body; non-empty, at most [`MAX_MESSAGE_CHARS`] characters.
    pub message: String,
    /// Lowercase author address. Immutable after creation.
    pub address: String,
    /// Creation instant in epoch milliseconds; sole sort key, descending.
    pub timestamp: u64,
    /// Count of current likers. Always equals `liked_by.len()`.
    pub likes: u32,
    /// Count of current dislikers. Always equals `disliked_by.len()`.
    pub dislikes: u32,
    /// Addresses that currently like this post (semantically a set).
    #[serde(rename = "likedBy")]
    pub liked_by: Vec<String>,
    /// Addresses that currently dislike this post (semantically a set).
    #[serde(rename = "dislikedBy")]
    pub disliked_by: Vec<String>,
    /// Optional personal-sign signature over the canonical post message.
    /// Carried opaquely, never verified.
    pub signature: Option<String>,
    /// Optional ENS name of the author. Carried opaquely.
    #[serde(rename = "ensName", skip_serializing_if = "Option::is_none")]
    pub ens_name: Option<String>,
}

impl Post {
    /// The voting portion of this post's state.
    #[must_use]
    pub fn vote_state(&self) -> VoteState {
        VoteState {
            likes: self.likes,
            dislikes: self.dislikes,
            liked_by: self.liked_by.clone(),
            disliked_by: self.disliked_by.clone(),
        }
    }

    /// Overwrite the voting portion of this post's state.
    pub fn apply_vote_state(&mut self, state: VoteState) {
        self.likes = state.likes;
        self.dislikes = state.dislikes;
        self.liked_by = state.liked_by;
        self.disliked_by = state.disliked_by;
    }
}

/// Input for post creation.
///
/// The store assigns `id`, `timestamp` and zeroes the voting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Post body; validated before submission.
    pub message: String,
    /// Author address; normalized to lowercase by the creation flow.
    pub address: String,
    /// Best-effort ownership proof. `None` when signing was declined.
    pub signature: Option<String>,
}

/// The mutable voting fields of a post, updated as one unit.
///
/// This is the value an optimistic transaction reads, recomputes and
/// conditionally writes back; counters and membership lists never travel
/// separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VoteState {
    pub likes: u32,
    pub dislikes: u32,
    #[serde(rename = "likedBy")]
    pub liked_by: Vec<String>,
    #[serde(rename = "dislikedBy")]
    pub disliked_by: Vec<String>,
}

impl VoteState {
    /// Whether `address` (already lowercase) currently likes.
    #[must_use]
    pub fn has_liked(&self, address: &str) -> bool {
        self.liked_by.iter().any(|a| a == address)
    }

    /// Whether `address` (already lowercase) currently dislikes.
    #[must_use]
    pub fn has_disliked(&self, address: &str) -> bool {
        self.disliked_by.iter().any(|a| a == address)
    }
}

/// A voter's reaction to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// The other reaction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Like => f.write_str("like"),
            Self::Dislike => f.write_str("dislike"),
        }
    }
}

/// An established wallet identity.
///
/// Produced by the identity adapter; not owned by the wall core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnection {
    /// Lowercase wallet address.
    pub address: String,
    /// Optional ENS name resolved by the provider.
    #[serde(rename = "ensName", skip_serializing_if = "Option::is_none")]
    pub ens_name: Option<String>,
    /// Optional chain id reported by the provider.
    #[serde(rename = "chainId", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}
