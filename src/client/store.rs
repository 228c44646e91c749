//! # Entity State Store
//!
//! Confirmed, server-acknowledged client state: the thread list, the single
//! resident thread detail, the leaderboard and the auth session.
//!
//! The store is the only writer of confirmed vote membership. Readers get a
//! snapshot, a borrowed view, or a [`watch::Receiver`] that wakes on every
//! change. All mutators are crate-private; the [`ForumClient`] flows and the
//! vote controllers are the only callers.
//!
//! [`ForumClient`]: crate::client::ForumClient

use crate::shared::forum::{
    reconcile, Comment, LeaderboardEntry, Thread, ThreadDetail, User, VoteIntent, VoteMembership,
    VoteType,
};
use std::fmt;
use tokio::sync::watch;

/// A votable entity resident in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A thread in the thread list
    Thread(String),
    /// The resident thread detail
    ThreadDetail(String),
    /// A comment of the resident thread detail
    Comment { thread_id: String, comment_id: String },
}

impl EntityRef {
    pub fn thread(id: impl Into<String>) -> Self {
        Self::Thread(id.into())
    }

    pub fn thread_detail(id: impl Into<String>) -> Self {
        Self::ThreadDetail(id.into())
    }

    pub fn comment(thread_id: impl Into<String>, comment_id: impl Into<String>) -> Self {
        Self::Comment {
            thread_id: thread_id.into(),
            comment_id: comment_id.into(),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Thread(id) => write!(f, "thread {}", id),
            EntityRef::ThreadDetail(id) => write!(f, "thread detail {}", id),
            EntityRef::Comment { thread_id, comment_id } => {
                write!(f, "comment {} of thread {}", comment_id, thread_id)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadsState {
    /// Newest-created first
    pub threads: Vec<Thread>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ThreadsState {
    pub fn find(&self, thread_id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == thread_id)
    }

    /// Threads whose category contains `query`, ignoring case
    pub fn filtered(&self, query: &str) -> Vec<&Thread> {
        if query.is_empty() {
            return self.threads.iter().collect();
        }
        let query = query.to_lowercase();
        self.threads
            .iter()
            .filter(|t| t.category.to_lowercase().contains(&query))
            .collect()
    }

    /// Distinct categories in first-seen order, the empty one included
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for thread in &self.threads {
            let category = thread.category.as_str();
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadDetailState {
    pub detail: Option<ThreadDetail>,
    /// Thread the current view asked for; late loads for any other id are dropped
    pub requested_id: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardsState {
    pub entries: Vec<LeaderboardEntry>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_success: bool,
}

impl AuthState {
    /// Id of the signed-in user, if any
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

/// Everything the store holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForumState {
    pub threads: ThreadsState,
    pub thread_detail: ThreadDetailState,
    pub leaderboards: LeaderboardsState,
    pub auth: AuthState,
}

impl ForumState {
    /// Confirmed membership of a resident entity
    pub fn membership(&self, entity: &EntityRef) -> Option<&VoteMembership> {
        match entity {
            EntityRef::Thread(id) => self.threads.find(id).map(|t| &t.votes),
            EntityRef::ThreadDetail(id) => self
                .thread_detail
                .detail
                .as_ref()
                .filter(|d| &d.id == id)
                .map(|d| &d.votes),
            EntityRef::Comment { thread_id, comment_id } => self
                .thread_detail
                .detail
                .as_ref()
                .filter(|d| &d.id == thread_id)
                .and_then(|d| d.comment(comment_id))
                .map(|c| &c.votes),
        }
    }

    fn membership_mut(&mut self, entity: &EntityRef) -> Option<&mut VoteMembership> {
        match entity {
            EntityRef::Thread(id) => self
                .threads
                .threads
                .iter_mut()
                .find(|t| &t.id == id)
                .map(|t| &mut t.votes),
            EntityRef::ThreadDetail(id) => self
                .thread_detail
                .detail
                .as_mut()
                .filter(|d| &d.id == id)
                .map(|d| &mut d.votes),
            EntityRef::Comment { thread_id, comment_id } => self
                .thread_detail
                .detail
                .as_mut()
                .filter(|d| &d.id == thread_id)
                .and_then(|d| d.comment_mut(comment_id))
                .map(|c| &mut c.votes),
        }
    }
}

/// Shared container of confirmed state
#[derive(Debug)]
pub struct EntityStore {
    state: watch::Sender<ForumState>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::with_state(ForumState::default())
    }

    pub fn with_state(initial: ForumState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// Receiver woken on every confirmed change
    pub fn subscribe(&self) -> watch::Receiver<ForumState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ForumState {
        self.state.borrow().clone()
    }

    /// Run `f` against the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&ForumState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn membership(&self, entity: &EntityRef) -> Option<VoteMembership> {
        self.read(|state| state.membership(entity).cloned())
    }

    fn update(&self, f: impl FnOnce(&mut ForumState)) {
        self.state.send_modify(f);
    }

    // ── Threads ────────────────────────────────────────────────────────────

    pub(crate) fn begin_threads_load(&self) {
        self.update(|state| {
            state.threads.is_loading = true;
            state.threads.error = None;
        });
    }

    /// Replaces the list wholesale on success
    pub(crate) fn finish_threads_load(&self, result: Result<Vec<Thread>, String>) {
        self.update(|state| {
            state.threads.is_loading = false;
            match result {
                Ok(threads) => state.threads.threads = threads,
                Err(message) => state.threads.error = Some(message),
            }
        });
    }

    pub(crate) fn prepend_thread(&self, thread: Thread) {
        self.update(|state| state.threads.threads.insert(0, thread));
    }

    /// Records a rejected thread creation as the threads page error
    pub(crate) fn fail_thread_create(&self, message: String) {
        self.update(|state| state.threads.error = Some(message));
    }

    // ── Thread detail ──────────────────────────────────────────────────────

    pub(crate) fn begin_thread_detail_load(&self, thread_id: &str) {
        self.update(|state| {
            let detail = &mut state.thread_detail;
            detail.requested_id = Some(thread_id.to_string());
            detail.is_loading = true;
            detail.error = None;
        });
    }

    /// Applies a finished detail load if `thread_id` is still the one requested.
    /// Returns whether it was applied.
    pub(crate) fn finish_thread_detail_load(
        &self,
        thread_id: &str,
        result: Result<ThreadDetail, String>,
    ) -> bool {
        self.state.send_if_modified(|state| {
            let detail = &mut state.thread_detail;
            if detail.requested_id.as_deref() != Some(thread_id) {
                tracing::debug!(
                    "[STORE] dropping detail load for {}, no longer requested",
                    thread_id
                );
                return false;
            }
            detail.is_loading = false;
            match result {
                Ok(loaded) => detail.detail = Some(loaded),
                Err(message) => detail.error = Some(message),
            }
            true
        })
    }

    pub(crate) fn clear_thread_detail(&self) {
        self.update(|state| state.thread_detail = ThreadDetailState::default());
    }

    /// Appends to the resident detail of `thread_id`; no-op otherwise
    pub(crate) fn append_comment(&self, thread_id: &str, comment: Comment) -> bool {
        self.state.send_if_modified(|state| match state.thread_detail.detail.as_mut() {
            Some(detail) if detail.id == thread_id => {
                detail.comments.push(comment);
                true
            }
            _ => false,
        })
    }

    /// Records a rejected comment as the detail page error, if `thread_id`
    /// is still the thread being shown
    pub(crate) fn fail_comment_create(&self, thread_id: &str, message: String) -> bool {
        self.state.send_if_modified(|state| {
            let detail = &mut state.thread_detail;
            if detail.requested_id.as_deref() != Some(thread_id) {
                return false;
            }
            detail.error = Some(message);
            true
        })
    }

    // ── Leaderboards ───────────────────────────────────────────────────────

    pub(crate) fn begin_leaderboards_load(&self) {
        self.update(|state| {
            state.leaderboards.is_loading = true;
            state.leaderboards.error = None;
        });
    }

    pub(crate) fn finish_leaderboards_load(&self, result: Result<Vec<LeaderboardEntry>, String>) {
        self.update(|state| {
            state.leaderboards.is_loading = false;
            match result {
                Ok(entries) => state.leaderboards.entries = entries,
                Err(message) => state.leaderboards.error = Some(message),
            }
        });
    }

    // ── Auth ───────────────────────────────────────────────────────────────

    pub(crate) fn begin_auth_request(&self) {
        self.update(|state| {
            state.auth.is_loading = true;
            state.auth.error = None;
            state.auth.is_success = false;
        });
    }

    pub(crate) fn finish_register(&self, result: Result<(), String>) {
        self.update(|state| {
            state.auth.is_loading = false;
            match result {
                Ok(()) => state.auth.is_success = true,
                Err(message) => state.auth.error = Some(message),
            }
        });
    }

    pub(crate) fn finish_login(&self, result: Result<String, String>) {
        self.update(|state| {
            state.auth.is_loading = false;
            match result {
                Ok(token) => {
                    state.auth.is_success = true;
                    state.auth.token = Some(token);
                }
                Err(message) => state.auth.error = Some(message),
            }
        });
    }

    pub(crate) fn begin_profile_load(&self) {
        self.update(|state| state.auth.is_loading = true);
    }

    /// A failed profile load invalidates the session
    pub(crate) fn finish_profile_load(&self, result: Result<User, String>) {
        self.update(|state| {
            state.auth.is_loading = false;
            match result {
                Ok(user) => state.auth.user = Some(user),
                Err(_) => {
                    state.auth.user = None;
                    state.auth.token = None;
                }
            }
        });
    }

    pub(crate) fn set_token(&self, token: Option<String>) {
        self.update(|state| state.auth.token = token);
    }

    pub(crate) fn logout(&self) {
        self.update(|state| {
            state.auth.user = None;
            state.auth.token = None;
        });
    }

    pub(crate) fn reset_auth_status(&self) {
        self.update(|state| {
            state.auth.is_loading = false;
            state.auth.error = None;
            state.auth.is_success = false;
        });
    }

    // ── Votes ──────────────────────────────────────────────────────────────

    /// Replace `user_id`'s vote on `entity` with the server-confirmed one.
    ///
    /// Returns `false` without waking subscribers when the entity is not
    /// resident (unloaded or navigated away).
    pub(crate) fn apply_vote_confirmation(
        &self,
        entity: &EntityRef,
        user_id: &str,
        vote: VoteType,
    ) -> bool {
        let intent = VoteIntent::new(vote, user_id);
        let applied = self.state.send_if_modified(|state| match state.membership_mut(entity) {
            Some(membership) => {
                *membership = reconcile(membership, &intent);
                crate::debug::validate_vote_exclusivity(membership, user_id);
                true
            }
            None => false,
        });
        if !applied {
            tracing::debug!("[STORE] vote confirmation for {} dropped, not resident", entity);
        }
        applied
    }
}
