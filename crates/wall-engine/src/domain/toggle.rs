//! # Toggle Transition
//!
//! The vote-toggle transition table as one pure function.
//!
//! | current state for voter | action = Like                 | action = Dislike              |
//! |-------------------------|-------------------------------|-------------------------------|
//! | neither                 | add like                      | add dislike                   |
//! | already liked           | remove like (toggle off)      | remove like, add dislike      |
//! | already disliked        | remove dislike, add like      | remove dislike (toggle off)   |
//! | both (illegal)          | resolve toward like only      | resolve toward dislike only   |
//!
//! Counters and membership lists are recomputed together and never travel
//! separately; counters saturate at zero to guard against drifted input.

use wall_types::{Reaction, VoteState};

fn remove(set: &mut Vec<String>, voter: &str) {
    set.retain(|a| a != voter);
}

fn add(set: &mut Vec<String>, voter: &str) {
    if !set.iter().any(|a| a == voter) {
        set.push(voter.to_owned());
    }
}

/// Compute the next vote state for `voter` performing `reaction`.
///
/// `voter` must already be lowercase-normalized; the engine service does
/// this before calling in. The input state is read from the store within an
/// optimistic transaction and the output is conditionally committed by the
/// caller.
#[must_use]
pub fn toggle(state: &VoteState, voter: &str, reaction: Reaction) -> VoteState {
    let mut next = state.clone();
    let has_liked = next.has_liked(voter);
    let has_disliked = next.has_disliked(voter);

    match reaction {
        Reaction::Like => match (has_liked, has_disliked) {
            // Toggle off.
            (true, false) => {
                remove(&mut next.liked_by, voter);
                next.likes = next.likes.saturating_sub(1);
            }
            // Switch from dislike.
            (false, true) => {
                remove(&mut next.disliked_by, voter);
                next.dislikes = next.dislikes.saturating_sub(1);
                add(&mut next.liked_by, voter);
                next.likes = next.likes.saturating_add(1);
            }
            // Fresh like.
            (false, false) => {
                add(&mut next.liked_by, voter);
                next.likes = next.likes.saturating_add(1);
            }
            // Illegal double membership: resolve toward the like only.
            (true, true) => {
                remove(&mut next.disliked_by, voter);
                next.dislikes = next.dislikes.saturating_sub(1);
            }
        },
        Reaction::Dislike => match (has_disliked, has_liked) {
            (true, false) => {
                remove(&mut next.disliked_by, voter);
                next.dislikes = next.dislikes.saturating_sub(1);
            }
            (false, true) => {
                remove(&mut next.liked_by, voter);
                next.likes = next.likes.saturating_sub(1);
                add(&mut next.disliked_by, voter);
                next.dislikes = next.dislikes.saturating_add(1);
            }
            (false, false) => {
                add(&mut next.disliked_by, voter);
                next.dislikes = next.dislikes.saturating_add(1);
            }
            (true, true) => {
                remove(&mut next.liked_by, voter);
                next.likes = next.likes.saturating_sub(1);
            }
        },
    }

    next
}
