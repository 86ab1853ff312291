//! # Wall Client
//!
//! One user's session against the wall: identity, post creation, voting and
//! the derived view. The interaction loop is connect → post/vote →
//! snapshot push → re-derive view.

use crate::config::{ConfigError, WallConfig};
use crate::notice::{self, Notice, NoticeReceiver, NoticeSender};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use wall_engine::{VoteOutcome, VoteService};
use wall_feed::Subscription;
use wall_identity::IdentityService;
use wall_projection::{project, WallView};
use wall_store::{LocalMirror, PostStore};
use wall_types::{
    shorten_address, NewPost, PostId, Reaction, StoreError, ValidationError, WalletConnection,
    WalletError, WallError,
};

/// Build the canonical message a post author is asked to sign.
///
/// Binds the post body to the creation instant; stored opaquely alongside
/// the post as a best-effort ownership proof.
#[must_use]
pub fn canonical_sign_message(message: &str, timestamp_ms: u64) -> String {
    format!(
        "Web3 Social Wall\n\nI am posting the following message:\n\"{message}\"\n\nTimestamp: {timestamp_ms}"
    )
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Validate a post message before anything touches the network.
fn validate_message(message: &str, max_chars: usize) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = message.chars().count();
    if len > max_chars {
        return Err(ValidationError::TooLong { len, max: max_chars });
    }
    Ok(())
}

struct SessionState {
    wallet: Option<WalletConnection>,
    store: Arc<dyn PostStore>,
    votes: Arc<VoteService>,
    fallback: bool,
}

/// A single client session.
pub struct WallClient {
    config: WallConfig,
    identity: Arc<IdentityService>,
    mirror: Arc<LocalMirror>,
    state: RwLock<SessionState>,
    notices: NoticeSender,
}

impl WallClient {
    /// Create a session against `store`.
    ///
    /// Returns the client and the receiving half of its notice channel.
    pub fn new(
        identity: Arc<IdentityService>,
        store: Arc<dyn PostStore>,
        config: WallConfig,
    ) -> Result<(Self, NoticeReceiver), ConfigError> {
        config.validate()?;

        let votes = Arc::new(VoteService::with_policy(
            store.clone(),
            config.voting.max_attempts,
            config.voting.cooldown,
        ));
        let (notices, receiver) = notice::channel();

        let client = Self {
            config,
            identity,
            mirror: Arc::new(LocalMirror::new()),
            state: RwLock::new(SessionState {
                wallet: None,
                store,
                votes,
                fallback: false,
            }),
            notices,
        };
        Ok((client, receiver))
    }

    fn push(&self, notice: Notice) {
        // A dropped receiver just means nobody is rendering notices.
        let _ = self.notices.send(notice);
    }

    /// The connected wallet, if any.
    #[must_use]
    pub fn wallet(&self) -> Option<WalletConnection> {
        self.state.read().ok().and_then(|s| s.wallet.clone())
    }

    /// Whether the session has degraded to the local fallback mirror.
    #[must_use]
    pub fn fallback_active(&self) -> bool {
        self.state.read().map(|s| s.fallback).unwrap_or(false)
    }

    fn active_store(&self) -> Result<Arc<dyn PostStore>, WallError> {
        self.state
            .read()
            .map(|s| s.store.clone())
            .map_err(|_| WallError::Unknown("session state poisoned".to_owned()))
    }

    fn active_votes(&self) -> Result<Arc<VoteService>, WallError> {
        self.state
            .read()
            .map(|s| s.votes.clone())
            .map_err(|_| WallError::Unknown("session state poisoned".to_owned()))
    }

    /// Connect the wallet and establish the session identity.
    pub async fn connect_wallet(&self) -> Result<WalletConnection, WallError> {
        match self.identity.connect().await {
            Ok(connection) => {
                if let Ok(mut state) = self.state.write() {
                    state.wallet = Some(connection.clone());
                }
                self.push(Notice::info(
                    "Wallet connected",
                    Some(format!(
                        "Connected to {}",
                        shorten_address(&connection.address, 4)
                    )),
                ));
                Ok(connection)
            }
            Err(err) => {
                self.push(Notice::error("Connection failed", Some(err.to_string())));
                Err(WallError::Wallet(err))
            }
        }
    }

    /// Drop the session identity.
    pub fn disconnect(&self) {
        if let Ok(mut state) = self.state.write() {
            state.wallet = None;
        }
        self.push(Notice::info(
            "Wallet disconnected",
            Some("Your wallet has been disconnected".to_owned()),
        ));
    }

    /// Publish a post.
    ///
    /// Validates the message pre-flight, asks for a best-effort signature
    /// over the canonical message (declining is fine; the post goes out
    /// unsigned), then creates the record. A store that denies the write
    /// flips the session to the local fallback mirror and replays the
    /// creation there.
    pub async fn create_post(&self, message: &str) -> Result<PostId, WallError> {
        validate_message(message, self.config.max_message_chars)?;

        let Some(address) = self.wallet().map(|w| w.address) else {
            return Err(WallError::NoIdentity);
        };

        let canonical = canonical_sign_message(message, now_millis());
        let signature = match self.identity.sign(&address, &canonical).await {
            Ok(signature) => Some(signature),
            Err(WalletError::UserRejected) => {
                self.push(Notice::info(
                    "Posting unsigned",
                    Some("Signature request declined; publishing without an ownership proof".to_owned()),
                ));
                None
            }
            Err(err) => {
                self.push(Notice::error("Signature failed", Some(err.to_string())));
                None
            }
        };

        let new_post = NewPost {
            message: message.to_owned(),
            address,
            signature,
        };

        let store = self.active_store()?;
        match store.create(new_post.clone()).await {
            Ok(id) => {
                self.push(Notice::info(
                    "Post created",
                    Some("Your post has been shared with the community".to_owned()),
                ));
                Ok(id)
            }
            Err(StoreError::PermissionDenied(reason)) => {
                warn!(reason = %reason, "Store denied the write, falling back to local mirror");
                self.push(Notice::error(
                    "Store rejected the post",
                    Some(reason),
                ));
                self.switch_to_fallback();
                let id = self
                    .mirror
                    .create(new_post)
                    .await
                    .map_err(WallError::Store)?;
                self.push(Notice::info(
                    "Post saved locally",
                    Some("Working offline; posts stay on this device".to_owned()),
                ));
                Ok(id)
            }
            Err(err) => {
                self.push(Notice::error("Failed to create post", Some(err.to_string())));
                Err(WallError::Store(err))
            }
        }
    }

    /// Toggle a like on `post_id` for the connected address.
    pub async fn like(&self, post_id: &PostId) -> Result<VoteOutcome, WallError> {
        self.vote(post_id, Reaction::Like).await
    }

    /// Toggle a dislike on `post_id` for the connected address.
    pub async fn dislike(&self, post_id: &PostId) -> Result<VoteOutcome, WallError> {
        self.vote(post_id, Reaction::Dislike).await
    }

    async fn vote(&self, post_id: &PostId, reaction: Reaction) -> Result<VoteOutcome, WallError> {
        let voter = self.wallet().map(|w| w.address).unwrap_or_default();
        let votes = self.active_votes()?;

        match votes.vote(post_id, &voter, reaction).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let title = match reaction {
                    Reaction::Like => "Failed to like post",
                    Reaction::Dislike => "Failed to dislike post",
                };
                self.push(Notice::error(title, Some(err.to_string())));
                Err(WallError::Vote(err))
            }
        }
    }

    /// Subscribe to full snapshots of the active store.
    pub fn subscribe(&self) -> Result<Subscription, WallError> {
        Ok(self.active_store()?.subscribe())
    }

    /// Derive the current wall view for this session.
    pub async fn view(&self) -> Result<WallView, WallError> {
        let store = self.active_store()?;
        let posts = store.snapshot().await.map_err(WallError::Store)?;
        let wallet = self.wallet();
        let in_flight = self.active_votes()?.in_flight();
        Ok(project(
            &posts,
            wallet.as_ref().map(|w| w.address.as_str()),
            in_flight.as_ref(),
        ))
    }

    fn switch_to_fallback(&self) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        if state.fallback {
            return;
        }
        let mirror: Arc<dyn PostStore> = self.mirror.clone();
        state.votes = Arc::new(VoteService::with_policy(
            mirror.clone(),
            self.config.voting.max_attempts,
            self.config.voting.cooldown,
        ));
        state.store = mirror;
        state.fallback = true;
        info!("Session switched to local fallback mirror");
    }
}
