//! # Optimistic Voting
//!
//! Two-layer vote state. Confirmed membership lives in the [`EntityStore`];
//! unconfirmed intents live in the [`OptimisticLayer`], an overlay keyed by
//! entity that is folded over the confirmed membership at read time.
//!
//! ## Flow
//!
//! ```text
//! cast_vote ──► toggle derived ──► intent pushed to overlay ──► (render sees it)
//!                                          │
//!            settle().await ──► one API request (bounded by vote_timeout)
//!                                          │
//!                 ok ──► store confirmation + entry and older ones removed
//!                err ──► overlay entry removed + "Terjadi kesalahan"
//! ```
//!
//! Several intents may be pending for one entity. Each later click toggles
//! against the display that already includes the earlier ones, and each
//! response replaces confirmed membership with what the server reported, so
//! the last confirmation to arrive wins. A confirmed intent takes the older
//! intents for its entity with it.

use crate::client::api::{ApiError, ForumApi};
use crate::client::notify::{messages, Notifier};
use crate::client::store::{EntityRef, EntityStore};
use crate::shared::forum::{reconcile, VoteDirection, VoteIntent, VoteMembership, VoteRecord};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// No signed-in user; nothing was shown or sent
    #[error("Vote requires a signed-in user")]
    Unauthenticated,

    /// The entity is not loaded, so there is nothing to vote on
    #[error("{0} is not loaded")]
    NotResident(EntityRef),

    #[error("Vote was not confirmed: {0}")]
    Confirmation(ApiError),

    #[error("Vote was not confirmed within {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Clone)]
struct PendingVote {
    id: Uuid,
    intent: VoteIntent,
}

/// Ephemeral overlay of unconfirmed vote intents.
///
/// Never persisted and never written into confirmed state.
#[derive(Debug)]
pub struct OptimisticLayer {
    pending: Mutex<HashMap<EntityRef, Vec<PendingVote>>>,
    revision: watch::Sender<u64>,
}

impl Default for OptimisticLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisticLayer {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            pending: Mutex::new(HashMap::new()),
            revision,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<EntityRef, Vec<PendingVote>>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Receiver woken whenever the overlay changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub(crate) fn push(&self, entity: &EntityRef, intent: VoteIntent) -> Uuid {
        let id = Uuid::new_v4();
        self.entries()
            .entry(entity.clone())
            .or_default()
            .push(PendingVote { id, intent });
        self.bump();
        id
    }

    /// Drop one pending intent. Returns whether it was still pending.
    pub(crate) fn remove(&self, entity: &EntityRef, id: Uuid) -> bool {
        self.drop_pending(entity, |pending| {
            pending.iter().position(|p| p.id == id).map(|at| at..=at)
        })
    }

    /// Drop a confirmed intent together with every intent issued before it
    /// for the same entity. The later click already toggled against those,
    /// so none of them may be folded over the new confirmed state.
    pub(crate) fn confirm(&self, entity: &EntityRef, id: Uuid) -> bool {
        self.drop_pending(entity, |pending| {
            pending.iter().position(|p| p.id == id).map(|at| 0..=at)
        })
    }

    fn drop_pending(
        &self,
        entity: &EntityRef,
        select: impl FnOnce(&[PendingVote]) -> Option<RangeInclusive<usize>>,
    ) -> bool {
        {
            let mut entries = self.entries();
            let Some(pending) = entries.get_mut(entity) else {
                return false;
            };
            let Some(range) = select(pending) else {
                return false;
            };
            pending.drain(range);
            if pending.is_empty() {
                entries.remove(entity);
            }
        }
        self.bump();
        true
    }

    /// `confirmed` with every pending intent for `entity` applied in issue order
    pub fn overlay(&self, entity: &EntityRef, confirmed: &VoteMembership) -> VoteMembership {
        let entries = self.entries();
        match entries.get(entity) {
            Some(pending) => pending
                .iter()
                .fold(confirmed.clone(), |membership, p| reconcile(&membership, &p.intent)),
            None => confirmed.clone(),
        }
    }

    pub fn pending_count(&self, entity: &EntityRef) -> usize {
        self.entries().get(entity).map_or(0, Vec::len)
    }

    pub fn is_pending(&self, entity: &EntityRef) -> bool {
        self.pending_count(entity) > 0
    }
}

/// Vote handle for one entity
#[derive(Clone)]
pub struct VoteController {
    entity: EntityRef,
    api: Arc<dyn ForumApi>,
    store: Arc<EntityStore>,
    layer: Arc<OptimisticLayer>,
    notifier: Notifier,
    vote_timeout: Duration,
}

impl std::fmt::Debug for VoteController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteController")
            .field("entity", &self.entity)
            .field("vote_timeout", &self.vote_timeout)
            .finish_non_exhaustive()
    }
}

impl VoteController {
    pub fn new(
        entity: EntityRef,
        api: Arc<dyn ForumApi>,
        store: Arc<EntityStore>,
        layer: Arc<OptimisticLayer>,
        notifier: Notifier,
        vote_timeout: Duration,
    ) -> Self {
        Self {
            entity,
            api,
            store,
            layer,
            notifier,
            vote_timeout,
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    /// Membership to render; `None` when the entity is not loaded
    pub fn current_display_membership(&self) -> Option<VoteMembership> {
        let confirmed = self.store.membership(&self.entity)?;
        Some(self.layer.overlay(&self.entity, &confirmed))
    }

    pub fn is_pending(&self) -> bool {
        self.layer.is_pending(&self.entity)
    }

    fn unauthenticated_message(&self, direction: VoteDirection) -> &'static str {
        match (self.entity.is_comment(), direction) {
            (false, VoteDirection::Up) => messages::UPVOTE_THREAD_UNAUTHENTICATED,
            (false, VoteDirection::Down) => messages::DOWNVOTE_THREAD_UNAUTHENTICATED,
            (true, VoteDirection::Up) => messages::UPVOTE_COMMENT_UNAUTHENTICATED,
            (true, VoteDirection::Down) => messages::DOWNVOTE_COMMENT_UNAUTHENTICATED,
        }
    }

    /// Apply a vote optimistically.
    ///
    /// Runs without suspending: when this returns `Ok`, the display already
    /// reflects the derived intent. The returned confirmation must be settled
    /// to issue the request.
    pub fn cast_vote(
        &self,
        acting_user: Option<&str>,
        direction: VoteDirection,
    ) -> Result<PendingConfirmation, VoteError> {
        let Some(user_id) = acting_user else {
            tracing::info!(
                "[VOTE] {:?} vote on {} without a session",
                direction,
                self.entity
            );
            self.notifier.error(self.unauthenticated_message(direction));
            return Err(VoteError::Unauthenticated);
        };

        let display = self
            .current_display_membership()
            .ok_or_else(|| VoteError::NotResident(self.entity.clone()))?;
        let kind = direction.toggle_against(&display, user_id);
        let intent = VoteIntent::new(kind, user_id);
        let id = self.layer.push(&self.entity, intent.clone());

        tracing::debug!(
            "[VOTE] {} by {} on {} pending ({})",
            kind,
            user_id,
            self.entity,
            id
        );
        Ok(PendingConfirmation {
            controller: self.clone(),
            id,
            intent,
            settled: false,
        })
    }

    /// [`cast_vote`](Self::cast_vote) followed by [`PendingConfirmation::settle`]
    pub async fn vote(
        &self,
        acting_user: Option<&str>,
        direction: VoteDirection,
    ) -> Result<VoteRecord, VoteError> {
        self.cast_vote(acting_user, direction)?.settle().await
    }

    async fn request(&self, intent: &VoteIntent) -> Result<VoteRecord, ApiError> {
        match &self.entity {
            EntityRef::Thread(thread_id) | EntityRef::ThreadDetail(thread_id) => {
                self.api.vote_thread(thread_id, intent.kind).await
            }
            EntityRef::Comment { thread_id, comment_id } => {
                self.api.vote_comment(thread_id, comment_id, intent.kind).await
            }
        }
    }
}

/// An optimistic vote awaiting its confirming request.
///
/// Dropping it unsettled discards the optimistic intent.
#[must_use = "the vote is only sent when settled"]
#[derive(Debug)]
pub struct PendingConfirmation {
    controller: VoteController,
    id: Uuid,
    intent: VoteIntent,
    settled: bool,
}

impl PendingConfirmation {
    pub fn intent(&self) -> &VoteIntent {
        &self.intent
    }

    /// Send the confirming request and resolve the optimistic intent
    pub async fn settle(mut self) -> Result<VoteRecord, VoteError> {
        let controller = self.controller.clone();
        let request = controller.request(&self.intent);
        let outcome = tokio::time::timeout(controller.vote_timeout, request).await;
        self.settled = true;

        let entity = &controller.entity;
        match outcome {
            Ok(Ok(record)) => {
                // no await between these two: confirmed state and overlay change together
                controller
                    .store
                    .apply_vote_confirmation(entity, &record.user_id, record.vote_type);
                controller.layer.confirm(entity, self.id);
                tracing::debug!(
                    "[VOTE] {} by {} on {} confirmed",
                    record.vote_type,
                    record.user_id,
                    entity
                );
                Ok(record)
            }
            Ok(Err(e)) => Err(self.revert(VoteError::Confirmation(e))),
            Err(_) => Err(self.revert(VoteError::TimedOut(controller.vote_timeout))),
        }
    }

    fn revert(&self, error: VoteError) -> VoteError {
        let controller = &self.controller;
        controller.layer.remove(&controller.entity, self.id);
        controller.notifier.error(messages::VOTE_FAILED);
        tracing::warn!(
            "[VOTE] {} on {} reverted: {}",
            self.intent.kind,
            controller.entity,
            error
        );
        error
    }
}

impl Drop for PendingConfirmation {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.layer.remove(&self.controller.entity, self.id);
        }
    }
}
