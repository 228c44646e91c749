//! User Notifications
//!
//! Transient success/error notices (toasts). The client publishes them on a
//! broadcast channel; whatever presents them subscribes.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// User-facing strings raised by the client
pub mod messages {
    pub const UPVOTE_THREAD_UNAUTHENTICATED: &str = "Gagal menyukai diskusi";
    pub const DOWNVOTE_THREAD_UNAUTHENTICATED: &str = "Gagal tidak menyukai diskusi";
    pub const UPVOTE_COMMENT_UNAUTHENTICATED: &str = "Gagal menyukai komentar";
    pub const DOWNVOTE_COMMENT_UNAUTHENTICATED: &str = "Gagal tidak menyukai komentar";
    pub const VOTE_FAILED: &str = "Terjadi kesalahan";

    pub const LOGIN_SUCCEEDED: &str = "Berhasil masuk";
    pub const LOGIN_FAILED: &str = "Gagal masuk";
    pub const REGISTER_SUCCEEDED: &str = "Berhasil mendaftar!";
    pub const REGISTER_FAILED: &str = "Gagal mendaftar";
    pub const THREAD_CREATED: &str = "Thread berhasil dibuat!";
    pub const THREAD_CREATE_FAILED: &str = "Gagal membuat thread";
    pub const COMMENT_CREATED: &str = "Komentar berhasil ditambahkan!";
    pub const COMMENT_CREATE_FAILED: &str = "Gagal menambahkan komentar";

    pub const FETCH_THREADS_FAILED: &str = "Terjadi kesalahan saat mengambil data thread";
    pub const CREATE_THREAD_ERROR: &str = "Terjadi kesalahan saat membuat thread";
    pub const FETCH_DETAIL_FAILED: &str = "Terjadi kesalahan saat mengambil detail diskusi";
    pub const CREATE_COMMENT_ERROR: &str = "Terjadi kesalahan saat menambahkan komentar";
    pub const FETCH_LEADERBOARDS_FAILED: &str = "Terjadi kesalahan saat mengambil daya leaderboard";
    pub const REGISTER_ERROR: &str = "Terjadi kesalahan saat mendaftar";
    pub const LOGIN_ERROR: &str = "Terjadi kesalahan saat masuk";
    pub const FETCH_PROFILE_FAILED: &str = "Terjadi kesalahan saat mengambil profil pengguna";
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Publisher of notifications
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Publish a notification; dropped silently when nobody listens
    pub fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::trace!("[NOTIFY] no subscribers");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}
