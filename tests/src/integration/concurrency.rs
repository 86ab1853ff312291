//! # Concurrency Tests
//!
//! The optimistic-commit contract under real task-level races: concurrent
//! voters on one post must never lose an update or desynchronize counters
//! from membership.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use rand::prelude::*;
    use wall_engine::VoteService;
    use wall_store::{PostStore, SharedPostStore};
    use wall_types::{NewPost, Post, PostId, Reaction};

    const AUTHOR: &str = "0xabc0000000000000000000000000000000000001";

    fn new_post(message: &str) -> NewPost {
        NewPost {
            message: message.to_owned(),
            address: AUTHOR.to_owned(),
            signature: None,
        }
    }

    /// A fresh per-client session: own service, shared store. This is the
    /// cross-client concurrency shape from production.
    fn session(store: &Arc<SharedPostStore>, max_attempts: u32) -> VoteService {
        VoteService::with_policy(store.clone(), max_attempts, Duration::ZERO)
    }

    fn assert_invariants(post: &Post) {
        assert_eq!(post.likes as usize, post.liked_by.len(), "likes/membership");
        assert_eq!(
            post.dislikes as usize,
            post.disliked_by.len(),
            "dislikes/membership"
        );
        for addr in &post.liked_by {
            assert!(
                !post.disliked_by.contains(addr),
                "{addr} present in both sets"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_two_concurrent_likes_both_land() {
        let store = Arc::new(SharedPostStore::new());
        let id = store.create(new_post("race me")).await.unwrap();

        let a = session(&store, 10);
        let b = session(&store, 10);
        let (ra, rb) = tokio::join!(
            a.vote(&id, "0xaaaa", Reaction::Like),
            b.vote(&id, "0xbbbb", Reaction::Like),
        );
        ra.unwrap();
        rb.unwrap();

        let post = store.read_versioned(&id).await.unwrap().post;
        assert_eq!(post.likes, 2, "lost update");
        assert!(post.liked_by.contains(&"0xaaaa".to_owned()));
        assert!(post.liked_by.contains(&"0xbbbb".to_owned()));
        assert_invariants(&post);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_concurrent_voters_all_counted() {
        let store = Arc::new(SharedPostStore::new());
        let id = store.create(new_post("pile on")).await.unwrap();

        let voters = 12u32;
        let mut handles = Vec::new();
        for n in 0..voters {
            let svc = session(&store, 64);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                svc.vote(&id, &format!("0xv{n:04}"), Reaction::Like).await
            }));
        }
        for joined in futures::future::join_all(handles).await {
            joined.unwrap().unwrap();
        }

        let post = store.read_versioned(&id).await.unwrap().post;
        assert_eq!(post.likes, voters);
        assert_eq!(post.dislikes, 0);
        assert_invariants(&post);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_mixed_reaction_storm_keeps_invariants() {
        let store = Arc::new(SharedPostStore::new());
        let id = store.create(new_post("storm")).await.unwrap();

        let mut handles = Vec::new();
        for n in 0..8u32 {
            let svc = session(&store, 64);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let voter = format!("0xs{n:04}");
                let mut rng = StdRng::seed_from_u64(u64::from(n));
                for _ in 0..5 {
                    let reaction = if rng.gen_bool(0.5) {
                        Reaction::Like
                    } else {
                        Reaction::Dislike
                    };
                    svc.vote(&id, &voter, reaction).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Whatever the interleaving, each voter nets at most one reaction
        // and the counters match membership exactly.
        let post = store.read_versioned(&id).await.unwrap().post;
        assert_invariants(&post);
        assert!(post.likes + post.dislikes <= 8);
    }

    #[tokio::test]
    async fn test_randomized_sequential_toggles_never_drift() {
        let store = Arc::new(SharedPostStore::new());
        let id = store.create(new_post("walk")).await.unwrap();
        let svc = session(&store, 5);

        let voters = ["0xa", "0xb", "0xc", "0xd"];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let voter = voters[rng.gen_range(0..voters.len())];
            let reaction = if rng.gen_bool(0.5) {
                Reaction::Like
            } else {
                Reaction::Dislike
            };
            svc.vote(&id, voter, reaction).await.unwrap();

            let post = store.read_versioned(&id).await.unwrap().post;
            assert_invariants(&post);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_on_distinct_posts_do_not_interfere() {
        let store = Arc::new(SharedPostStore::new());
        let mut ids: Vec<PostId> = Vec::new();
        for n in 0..4 {
            ids.push(store.create(new_post(&format!("post {n}"))).await.unwrap());
        }

        let mut handles = Vec::new();
        for id in &ids {
            let svc = session(&store, 10);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                svc.vote(&id, "0xsolo", Reaction::Dislike).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for id in &ids {
            let post = store.read_versioned(id).await.unwrap().post;
            assert_eq!(post.dislikes, 1);
            assert_invariants(&post);
        }
    }
}
