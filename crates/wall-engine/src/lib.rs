//! # Wall Engine - Vote Toggle Engine
//!
//! The one place where concurrent-mutation correctness matters.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the pure toggle transition, one function
//!   from `(current vote state, voter, reaction)` to the next vote state.
//!   This is the single definition of the toggle rules; every backend goes
//!   through it, so backends cannot diverge.
//! - **Service Layer** (`service.rs`): drives the transition against a
//!   [`PostStore`](wall_store::PostStore) with an optimistic-transaction
//!   loop (read → compute → conditional commit, bounded transparent retry on
//!   conflict) and serializes votes per client session.
//!
//! ## Invariants upheld
//!
//! - An address is never in `liked_by` and `disliked_by` simultaneously.
//! - `likes == liked_by.len()` and `dislikes == disliked_by.len()` after
//!   every committed operation.
//! - Counters never go below zero.

pub mod domain;
pub mod service;

pub use domain::toggle::toggle;
pub use service::{VoteOutcome, VoteService, DEFAULT_MAX_VOTE_ATTEMPTS, DEFAULT_VOTE_COOLDOWN};
