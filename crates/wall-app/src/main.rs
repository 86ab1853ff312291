//! # Wall Demo
//!
//! Drives two client sessions against one shared store: connect, post,
//! vote, and watch the feed converge. Stub wallets stand in for the browser
//! provider boundary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use wall_app::{WallClient, WallConfig};
use wall_identity::{IdentityService, StubWallet};
use wall_store::{PostStore, SharedPostStore};

const ALICE: &str = "0xA11CE00000000000000000000000000000000001";
const BOB: &str = "0xB0B0000000000000000000000000000000000002";

fn session(address: &str, store: Arc<SharedPostStore>) -> Result<WallClient> {
    let identity = Arc::new(IdentityService::new(Arc::new(StubWallet::with_account(
        address,
    ))));
    let (client, mut notices) =
        WallClient::new(identity, store, WallConfig::default()).context("invalid wall config")?;

    // Render notices the way a UI toast stack would.
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            info!(severity = ?notice.severity, title = %notice.title, detail = ?notice.detail, "notice");
        }
    });
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting tracing subscriber")?;

    let store = Arc::new(SharedPostStore::new());
    let mut feed = store.subscribe();

    let alice = session(ALICE, store.clone())?;
    let bob = session(BOB, store.clone())?;

    alice.connect_wallet().await?;
    bob.connect_wallet().await?;

    let post_id = alice
        .create_post("gm, wall! first post from the demo runtime")
        .await?;
    info!(%post_id, "alice posted");

    bob.like(&post_id).await?;
    info!("bob liked the post");

    // Vote again after the cooldown: toggles the like off, then dislikes.
    tokio::time::sleep(std::time::Duration::from_millis(400)).await;
    bob.dislike(&post_id).await?;

    while let Some(snapshot) = feed.recv().await {
        let post = &snapshot.posts[0];
        info!(
            seq = snapshot.seq,
            likes = post.likes,
            dislikes = post.dislikes,
            "feed snapshot"
        );
        if post.dislikes == 1 {
            break;
        }
    }

    let view = bob.view().await?;
    let top = &view.posts[0];
    info!(
        message = %top.post.message,
        author = %top.display.short_address,
        has_disliked = top.has_disliked,
        "final view for bob"
    );

    Ok(())
}
