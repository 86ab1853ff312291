//! # Fallback Mirror Tests
//!
//! The local mirror must be externally indistinguishable from the shared
//! store: same toggle semantics, same feed behavior, same defaults. Plus the
//! session-level degradation path when the store denies writes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use wall_app::{WallClient, WallConfig};
    use wall_engine::VoteService;
    use wall_identity::{IdentityService, StubWallet};
    use wall_store::{LocalMirror, PostStore, SharedPostStore};
    use wall_types::{NewPost, Reaction, VoteState};

    const AUTHOR: &str = "0xabc0000000000000000000000000000000000001";

    fn new_post(message: &str) -> NewPost {
        NewPost {
            message: message.to_owned(),
            address: AUTHOR.to_owned(),
            signature: None,
        }
    }

    /// Drive the same vote script against any backend and collect the vote
    /// state after every step.
    async fn run_script(store: Arc<dyn PostStore>) -> Vec<VoteState> {
        let votes = VoteService::with_policy(store.clone(), 5, Duration::ZERO);
        let id = store.create(new_post("parity")).await.unwrap();

        let script = [
            ("0xdef", Reaction::Like),
            ("0xdef", Reaction::Dislike), // switch
            ("0x123", Reaction::Like),
            ("0xdef", Reaction::Dislike), // toggle off
            ("0x123", Reaction::Like),    // toggle off
            ("0x123", Reaction::Dislike),
        ];

        let mut states = Vec::new();
        for (voter, reaction) in script {
            votes.vote(&id, voter, reaction).await.unwrap();
            let post = store.read_versioned(&id).await.unwrap().post;
            states.push(post.vote_state());
        }
        states
    }

    #[tokio::test]
    async fn test_backends_share_one_toggle_semantics() {
        let shared = run_script(Arc::new(SharedPostStore::new())).await;
        let mirror = run_script(Arc::new(LocalMirror::new())).await;
        assert_eq!(shared, mirror);
    }

    #[tokio::test]
    async fn test_mirror_feed_matches_store_feed_behavior() {
        let mirror = Arc::new(LocalMirror::new());
        mirror.create(new_post("one")).await.unwrap();

        let mut sub = mirror.subscribe();
        let seeded = sub.recv().await.unwrap();
        assert_eq!(seeded.posts.len(), 1);

        mirror.create(new_post("two")).await.unwrap();
        let live = sub.recv().await.unwrap();
        assert_eq!(live.posts.len(), 2);
    }

    #[tokio::test]
    async fn test_session_degrades_to_mirror_and_keeps_voting() {
        let store = Arc::new(SharedPostStore::new());
        store.set_deny_writes(true);

        let identity = Arc::new(IdentityService::new(Arc::new(StubWallet::with_account(
            AUTHOR,
        ))));
        let mut config = WallConfig::default();
        config.voting.cooldown = Duration::ZERO;
        let (client, _notices) = WallClient::new(identity, store.clone(), config).unwrap();
        client.connect_wallet().await.unwrap();

        let id = client.create_post("stranded").await.unwrap();
        assert!(client.fallback_active());
        assert!(id.as_str().starts_with("local-"));

        // Another identity on the same session store would be a different
        // client; here we just verify the vote path works against the
        // mirror with full toggle semantics.
        let view = client.view().await.unwrap();
        assert_eq!(view.posts.len(), 1);
        assert_eq!(view.posts[0].post.likes, 0);

        // Self-vote is engine-legal (the projection merely disables the
        // control), so it exercises the mirror vote path end to end.
        client.like(&id).await.unwrap();
        let view = client.view().await.unwrap();
        assert_eq!(view.posts[0].post.likes, 1);
        assert!(view.posts[0].has_liked);
    }

    #[tokio::test]
    async fn test_mirror_ids_are_unique_under_bursts() {
        let mirror = LocalMirror::new();
        let mut ids = std::collections::HashSet::new();
        for n in 0..50 {
            let id = mirror.create(new_post(&format!("burst {n}"))).await.unwrap();
            assert!(ids.insert(id), "duplicate synthesized id");
        }
    }
}
