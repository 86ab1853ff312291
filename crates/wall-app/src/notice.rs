//! # Notices
//!
//! The session's non-blocking error/info surface. Everything a user should
//! see (connection results, creation results, failures) is pushed through
//! an unbounded channel as a dismissible notice; nothing here ever blocks an
//! operation.

use tokio::sync::mpsc;

/// Notice severity, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A single dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    /// Underlying detail (e.g. the error message), when there is one.
    pub detail: Option<String>,
}

impl Notice {
    #[must_use]
    pub fn info(title: &str, detail: impl Into<Option<String>>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.to_owned(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn error(title: &str, detail: impl Into<Option<String>>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.to_owned(),
            detail: detail.into(),
        }
    }
}

/// Receiving half of a session's notice channel.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

pub(crate) type NoticeSender = mpsc::UnboundedSender<Notice>;

pub(crate) fn channel() -> (NoticeSender, NoticeReceiver) {
    mpsc::unbounded_channel()
}
