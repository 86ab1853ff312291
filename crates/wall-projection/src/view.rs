//! View derivation over the post collection.

use serde::Serialize;
use wall_types::{identicon, initials, normalize_address, shorten_address, Identicon, Post, PostId};

/// Hex characters kept on each side of a shortened address.
const SHORT_ADDRESS_CHARS: usize = 4;

/// Display material for one author address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayKey {
    /// `0x1234...abcd` form for labels.
    pub short_address: String,
    /// Two-character fallback initials.
    pub initials: String,
    /// Deterministic avatar.
    pub identicon: Identicon,
}

impl DisplayKey {
    fn for_address(address: &str) -> Self {
        Self {
            short_address: shorten_address(address, SHORT_ADDRESS_CHARS),
            initials: initials(address),
            identicon: identicon(address),
        }
    }
}

/// One post annotated for the current viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub post: Post,
    /// The viewer currently likes this post.
    pub has_liked: bool,
    /// The viewer currently dislikes this post.
    pub has_disliked: bool,
    /// The viewer authored this post.
    pub is_own_post: bool,
    /// Voting controls are enabled: an identity is connected, no vote is in
    /// flight, and this is not the viewer's own post (self-voting is a
    /// presentation-layer courtesy, not an engine rule).
    pub can_vote: bool,
    pub display: DisplayKey,
}

/// The derived wall for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallView {
    /// All posts, timestamp descending (stable on ties), annotated.
    pub posts: Vec<PostView>,
    /// The viewer's own posts, same order.
    pub user_posts: Vec<Post>,
}

/// Derive the wall view.
///
/// `current_address` is the connected identity, any casing; `voting_post`
/// is the post with a vote currently in flight, which disables voting
/// everywhere until it clears (votes are serialized per session).
#[must_use]
pub fn project(
    posts: &[Post],
    current_address: Option<&str>,
    voting_post: Option<&PostId>,
) -> WallView {
    let viewer = current_address.map(normalize_address);

    let mut ordered: Vec<&Post> = posts.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)); // stable: ties keep input order

    let views: Vec<PostView> = ordered
        .into_iter()
        .map(|post| {
            let (has_liked, has_disliked, is_own) = match viewer.as_deref() {
                Some(addr) => (
                    post.liked_by.iter().any(|a| a == addr),
                    post.disliked_by.iter().any(|a| a == addr),
                    post.address.to_lowercase() == addr,
                ),
                None => (false, false, false),
            };

            PostView {
                has_liked,
                has_disliked,
                is_own_post: is_own,
                can_vote: viewer.is_some() && voting_post.is_none() && !is_own,
                display: DisplayKey::for_address(&post.address),
                post: post.clone(),
            }
        })
        .collect();

    let user_posts = views
        .iter()
        .filter(|v| v.is_own_post)
        .map(|v| v.post.clone())
        .collect();

    WallView {
        posts: views,
        user_posts,
    }
}
