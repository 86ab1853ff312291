//! # Client Configuration

use std::time::Duration;
use thiserror::Error;
use wall_types::MAX_MESSAGE_CHARS;

/// Configuration for a wall client session.
#[derive(Debug, Clone)]
pub struct WallConfig {
    /// Voting policy.
    pub voting: VotingConfig,
    /// Maximum message length, in characters.
    pub max_message_chars: usize,
}

/// Vote retry and cooldown policy.
#[derive(Debug, Clone)]
pub struct VotingConfig {
    /// Bound on optimistic-transaction attempts per vote.
    pub max_attempts: u32,
    /// How long voting stays disabled after a vote completes.
    pub cooldown: Duration,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            max_attempts: wall_engine::DEFAULT_MAX_VOTE_ATTEMPTS,
            cooldown: wall_engine::DEFAULT_VOTE_COOLDOWN,
        }
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            voting: VotingConfig::default(),
            max_message_chars: MAX_MESSAGE_CHARS,
        }
    }
}

impl WallConfig {
    /// Validate the configuration.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the retry bound is zero
    /// - the message bound is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voting.max_attempts == 0 {
            return Err(ConfigError::ZeroVoteAttempts);
        }
        if self.max_message_chars == 0 {
            return Err(ConfigError::ZeroMessageBound);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The vote retry bound is zero; no vote could ever commit.
    #[error("vote retry bound must be at least 1")]
    ZeroVoteAttempts,
    /// The message bound is zero; no post could ever validate.
    #[error("message character bound must be at least 1")]
    ZeroMessageBound,
}
