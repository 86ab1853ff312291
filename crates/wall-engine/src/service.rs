//! # Vote Service
//!
//! Drives the pure toggle transition against a [`PostStore`] with an
//! optimistic-transaction loop, and serializes votes per client session.
//!
//! ## Transaction loop
//!
//! ```text
//! read (post, version) ──→ toggle(state, voter, reaction) ──→ commit if
//!        ▲                                                    version
//!        │                                                    unchanged
//!        └───────────── TransientConflict (bounded retry) ◄───────┘
//! ```
//!
//! Conflicts are retried from a fresh read and never surfaced; only retry
//! exhaustion is. A missing caller address is rejected before any store
//! access.
//!
//! ## Session serialization
//!
//! At most one vote is outstanding per service instance. While one is in
//! flight (and for a short cooldown after it completes, success or failure),
//! further votes are coalesced into [`VoteOutcome::Ignored`] without touching
//! the store. This is a liveness guard for the presentation layer, not part
//! of the engine's correctness contract.

use crate::domain::toggle::toggle;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};
use wall_store::PostStore;
use wall_types::{normalize_address, PostId, Reaction, StoreError, VoteError};

/// Bound on optimistic-transaction attempts per vote.
pub const DEFAULT_MAX_VOTE_ATTEMPTS: u32 = 5;

/// How long voting stays disabled after a vote completes.
pub const DEFAULT_VOTE_COOLDOWN: Duration = Duration::from_millis(300);

/// What became of a vote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Exactly one mutation was committed.
    Committed,
    /// Another vote was in flight (or cooling down); this one was coalesced
    /// away without touching the store.
    Ignored,
}

/// Per-session vote dispatcher.
pub struct VoteService {
    store: Arc<dyn PostStore>,
    max_attempts: u32,
    cooldown: Duration,
    /// Post currently being voted on by this session, if any.
    in_flight: Arc<Mutex<Option<PostId>>>,
}

impl VoteService {
    /// Create a service with default retry and cooldown policy.
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self::with_policy(store, DEFAULT_MAX_VOTE_ATTEMPTS, DEFAULT_VOTE_COOLDOWN)
    }

    /// Create a service with an explicit retry bound and cooldown.
    #[must_use]
    pub fn with_policy(store: Arc<dyn PostStore>, max_attempts: u32, cooldown: Duration) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
            cooldown,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// The post this session is currently voting on, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<PostId> {
        self.in_flight.lock().ok().and_then(|guard| guard.clone())
    }

    /// Toggle `voter`'s `reaction` on `post_id`.
    ///
    /// # Errors
    ///
    /// - `VoteError::NoIdentity` if `voter` is empty (checked pre-flight)
    /// - `VoteError::NotFound` if the post vanished
    /// - `VoteError::RetriesExhausted` if every attempt hit a concurrent write
    /// - `VoteError::Store` for non-retryable store failures
    pub async fn vote(
        &self,
        post_id: &PostId,
        voter: &str,
        reaction: Reaction,
    ) -> Result<VoteOutcome, VoteError> {
        if voter.trim().is_empty() {
            return Err(VoteError::NoIdentity);
        }
        let voter = normalize_address(voter);

        // Claim the session's single vote slot.
        {
            let Ok(mut guard) = self.in_flight.lock() else {
                return Err(VoteError::Store(StoreError::Backend(
                    "vote guard poisoned".to_owned(),
                )));
            };
            if let Some(busy) = guard.as_ref() {
                debug!(post_id = %post_id, busy = %busy, "Vote coalesced, one already in flight");
                return Ok(VoteOutcome::Ignored);
            }
            *guard = Some(post_id.clone());
        }

        let result = self.run_transaction(post_id, &voter, reaction).await;

        // Release the slot after the cooldown, success or failure, so the
        // presentation layer never sticks in an in-progress state.
        let in_flight = self.in_flight.clone();
        let cooldown = self.cooldown;
        if cooldown.is_zero() {
            Self::clear(&in_flight);
        } else {
            tokio::spawn(async move {
                tokio::time::sleep(cooldown).await;
                Self::clear(&in_flight);
            });
        }

        result.map(|()| VoteOutcome::Committed)
    }

    fn clear(in_flight: &Mutex<Option<PostId>>) {
        if let Ok(mut guard) = in_flight.lock() {
            *guard = None;
        }
    }

    async fn run_transaction(
        &self,
        post_id: &PostId,
        voter: &str,
        reaction: Reaction,
    ) -> Result<(), VoteError> {
        for attempt in 1..=self.max_attempts {
            let read = self
                .store
                .read_versioned(post_id)
                .await
                .map_err(map_store_error)?;

            let next = toggle(&read.post.vote_state(), voter, reaction);

            match self.store.commit_vote(post_id, read.version, next).await {
                Ok(()) => {
                    debug!(post_id = %post_id, voter, %reaction, attempt, "Vote committed");
                    return Ok(());
                }
                Err(StoreError::TransientConflict { .. }) => {
                    debug!(post_id = %post_id, attempt, "Commit conflicted, retrying from fresh read");
                    continue;
                }
                Err(other) => return Err(map_store_error(other)),
            }
        }

        warn!(post_id = %post_id, attempts = self.max_attempts, "Vote retries exhausted");
        Err(VoteError::RetriesExhausted {
            attempts: self.max_attempts,
        })
    }
}

fn map_store_error(err: StoreError) -> VoteError {
    match err {
        StoreError::NotFound(id) => VoteError::NotFound(id),
        other => VoteError::Store(other),
    }
}
