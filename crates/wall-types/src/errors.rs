//! # Error Types
//!
//! Defines the error taxonomy used across wall subsystems.
//!
//! Store conflicts (`StoreError::TransientConflict`) are an internal signal
//! for the vote engine's retry loop and must never reach the user; every
//! other kind maps to a user-facing notice at the app boundary.

use crate::entities::PostId;
use thiserror::Error;

/// Pre-flight message validation failures.
///
/// Rejected before any store interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Message is empty (or whitespace only).
    #[error("Message is empty")]
    Empty,

    /// Message exceeds the character bound.
    #[error("Message too long: {len} characters, maximum {max}")]
    TooLong { len: usize, max: usize },
}

/// Failures at the wallet provider boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet provider is present in the environment.
    #[error("No wallet provider available")]
    ProviderUnavailable,

    /// The user declined the connection or signing prompt (EIP-1193 code 4001).
    #[error("User rejected the request")]
    UserRejected,

    /// The provider returned an empty account list.
    #[error("No accounts found")]
    NoAccounts,

    /// The provider returned a chain id that is not a hex quantity.
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),

    /// Any other provider failure, with the provider's code and message.
    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },
}

/// Failures at the post store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The post does not exist (at read or commit time).
    #[error("Post not found: {0}")]
    NotFound(PostId),

    /// Another writer committed between our read and our write.
    ///
    /// Retried transparently by the vote engine; never surfaced.
    #[error("Concurrent write on post {post_id}: expected version {expected}, found {actual}")]
    TransientConflict {
        post_id: PostId,
        expected: u64,
        actual: u64,
    },

    /// The store rejected the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other backend failure.
    #[error("Store error: {0}")]
    Backend(String),
}

/// Failures of a vote operation, after engine-internal retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    /// The caller has no connected address; rejected before store access.
    #[error("No wallet connected")]
    NoIdentity,

    /// The post vanished before the vote could commit.
    #[error("Post not found: {0}")]
    NotFound(PostId),

    /// Conflict retries were exhausted without a successful commit.
    #[error("Vote did not commit after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Store failure other than a retryable conflict.
    #[error(transparent)]
    Store(StoreError),
}

/// Top-level application error surface.
///
/// Everything that reaches the user becomes one of these; the app layer
/// renders them as dismissible notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WallError {
    /// The action needs a connected wallet and none is.
    #[error("No wallet connected")]
    NoIdentity,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Vote(#[from] VoteError),

    /// Network or other unclassified failure.
    #[error("{0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_not_conflated_with_not_found() {
        let conflict = StoreError::TransientConflict {
            post_id: PostId::from("p1"),
            expected: 1,
            actual: 2,
        };
        assert_ne!(conflict, StoreError::NotFound(PostId::from("p1")));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(ValidationError::Empty.to_string(), "Message is empty");
        assert_eq!(
            ValidationError::TooLong { len: 501, max: 500 }.to_string(),
            "Message too long: 501 characters, maximum 500"
        );
        assert_eq!(
            WalletError::UserRejected.to_string(),
            "User rejected the request"
        );
    }

    #[test]
    fn test_wall_error_from_validation() {
        let err: WallError = ValidationError::Empty.into();
        assert!(matches!(err, WallError::Validation(ValidationError::Empty)));
    }
}
