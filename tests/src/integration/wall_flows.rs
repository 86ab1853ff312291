//! # Wall Flow Tests
//!
//! End-to-end scenarios across store, engine, feed and projection:
//! create a post, vote it through the toggle table, watch the feed.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use wall_engine::{VoteOutcome, VoteService};
    use wall_store::{PostStore, SharedPostStore};
    use wall_types::{NewPost, PostId, Reaction};

    const AUTHOR: &str = "0xabc0000000000000000000000000000000000001";
    const VOTER: &str = "0xdef0000000000000000000000000000000000002";

    fn new_post(message: &str, address: &str) -> NewPost {
        NewPost {
            message: message.to_owned(),
            address: address.to_owned(),
            signature: None,
        }
    }

    fn instant_votes(store: Arc<SharedPostStore>) -> VoteService {
        // No cooldown so sequential votes in one test don't coalesce.
        VoteService::with_policy(store, 5, Duration::ZERO)
    }

    async fn post_of(store: &SharedPostStore, id: &PostId) -> wall_types::Post {
        store.read_versioned(id).await.expect("post exists").post
    }

    #[tokio::test]
    async fn test_reference_scenario_like_switch_toggle_off() {
        let store = Arc::new(SharedPostStore::new());
        let votes = instant_votes(store.clone());

        // Create: zeroed counters, empty membership.
        let id = store.create(new_post("hello", AUTHOR)).await.unwrap();
        let post = post_of(&store, &id).await;
        assert_eq!((post.likes, post.dislikes), (0, 0));
        assert!(post.liked_by.is_empty() && post.disliked_by.is_empty());

        // Like: counted and member.
        votes.vote(&id, VOTER, Reaction::Like).await.unwrap();
        let post = post_of(&store, &id).await;
        assert_eq!(post.likes, 1);
        assert_eq!(post.liked_by, vec![VOTER.to_owned()]);

        // Dislike by the same voter: full switch.
        votes.vote(&id, VOTER, Reaction::Dislike).await.unwrap();
        let post = post_of(&store, &id).await;
        assert_eq!((post.likes, post.dislikes), (0, 1));
        assert!(post.liked_by.is_empty());
        assert_eq!(post.disliked_by, vec![VOTER.to_owned()]);

        // Dislike again: toggled off, back to pristine.
        votes.vote(&id, VOTER, Reaction::Dislike).await.unwrap();
        let post = post_of(&store, &id).await;
        assert_eq!((post.likes, post.dislikes), (0, 0));
        assert!(post.disliked_by.is_empty());
    }

    #[tokio::test]
    async fn test_like_twice_restores_pre_like_state() {
        let store = Arc::new(SharedPostStore::new());
        let votes = instant_votes(store.clone());
        let id = store.create(new_post("hello", AUTHOR)).await.unwrap();

        // Baseline with an unrelated voter present.
        votes.vote(&id, "0x3333", Reaction::Dislike).await.unwrap();
        let baseline = post_of(&store, &id).await;

        votes.vote(&id, VOTER, Reaction::Like).await.unwrap();
        votes.vote(&id, VOTER, Reaction::Like).await.unwrap();

        let after = post_of(&store, &id).await;
        assert_eq!(after.vote_state(), baseline.vote_state());
    }

    #[tokio::test]
    async fn test_snapshots_arrive_newest_first() {
        let store = Arc::new(SharedPostStore::new());

        // Millisecond timestamps: space creations out so t1 < t2 < t3.
        store.create(new_post("first", AUTHOR)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.create(new_post("second", AUTHOR)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.create(new_post("third", AUTHOR)).await.unwrap();

        let mut sub = store.subscribe();
        let snapshot = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("snapshot");

        let messages: Vec<_> = snapshot.posts.iter().map(|p| p.message.clone()).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_every_commit_pushes_a_full_snapshot() {
        let store = Arc::new(SharedPostStore::new());
        let votes = instant_votes(store.clone());
        let id = store.create(new_post("hello", AUTHOR)).await.unwrap();

        let mut sub = store.subscribe();
        // Seeded with the current collection.
        assert_eq!(sub.recv().await.expect("seed").posts.len(), 1);

        votes.vote(&id, VOTER, Reaction::Like).await.unwrap();
        let after_like = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("snapshot");
        assert_eq!(after_like.posts[0].likes, 1);

        votes.vote(&id, VOTER, Reaction::Like).await.unwrap();
        let after_toggle_off = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("snapshot");
        assert_eq!(after_toggle_off.posts[0].likes, 0);
    }

    #[tokio::test]
    async fn test_dropped_subscription_receives_nothing_further() {
        let store = Arc::new(SharedPostStore::new());
        let sub = store.subscribe();
        assert_eq!(store.feed().subscriber_count(), 1);

        drop(sub);
        assert_eq!(store.feed().subscriber_count(), 0);

        // Publishing afterwards reaches nobody.
        store.create(new_post("hello", AUTHOR)).await.unwrap();
        assert_eq!(store.feed().subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_streamed_snapshot_projects_viewer_flags() {
        use futures::StreamExt;
        use wall_feed::SnapshotStream;
        use wall_projection::project;

        let store = Arc::new(SharedPostStore::new());
        let votes = instant_votes(store.clone());
        let id = store.create(new_post("hello", AUTHOR)).await.unwrap();
        votes.vote(&id, VOTER, Reaction::Like).await.unwrap();

        let mut stream = SnapshotStream::new(store.subscribe());
        let snapshot = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("snapshot");

        let view = project(&snapshot.posts, Some(VOTER), None);
        assert!(view.posts[0].has_liked);
        assert!(!view.posts[0].is_own_post);
        assert!(view.posts[0].can_vote);
        assert!(view.user_posts.is_empty());
    }

    #[tokio::test]
    async fn test_vote_coalescing_during_cooldown_window() {
        let store = Arc::new(SharedPostStore::new());
        let votes = VoteService::with_policy(store.clone(), 5, Duration::from_millis(300));
        let id = store.create(new_post("hello", AUTHOR)).await.unwrap();

        assert_eq!(
            votes.vote(&id, VOTER, Reaction::Like).await.unwrap(),
            VoteOutcome::Committed
        );
        // Double click: ignored while the cooldown holds the slot.
        assert_eq!(
            votes.vote(&id, VOTER, Reaction::Like).await.unwrap(),
            VoteOutcome::Ignored
        );
        assert_eq!(post_of(&store, &id).await.likes, 1);

        // After the cooldown the slot frees up again.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(
            votes.vote(&id, VOTER, Reaction::Like).await.unwrap(),
            VoteOutcome::Committed
        );
        assert_eq!(post_of(&store, &id).await.likes, 0);
    }
}
