//! Vote Data Structures
//!
//! Vote membership for a votable entity (thread, thread detail, comment) and
//! the pure reconciliation function that moves a membership toward an intent.
//!
//! # Usage
//!
//! ```rust
//! use forum_client::shared::forum::{reconcile, VoteIntent, VoteMembership, VoteType};
//!
//! let membership = VoteMembership::default();
//! let next = reconcile(&membership, &VoteIntent::new(VoteType::Up, "u1"));
//! assert!(next.up_voters.contains("u1"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a forum user as issued by the API
pub type UserId = String;

/// Vote type as exchanged with the API.
///
/// Wire encoding is an integer: `1` up, `-1` down, `0` neutral.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i8", into = "i8")]
pub enum VoteType {
    Up,
    Down,
    Neutral,
}

impl VoteType {
    /// Path segment of the vote endpoint for this vote type
    pub fn endpoint(&self) -> &'static str {
        match self {
            VoteType::Up => "up-vote",
            VoteType::Down => "down-vote",
            VoteType::Neutral => "neutral-vote",
        }
    }
}

impl From<VoteType> for i8 {
    fn from(value: VoteType) -> Self {
        match value {
            VoteType::Up => 1,
            VoteType::Down => -1,
            VoteType::Neutral => 0,
        }
    }
}

impl TryFrom<i8> for VoteType {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteType::Up),
            -1 => Ok(VoteType::Down),
            0 => Ok(VoteType::Neutral),
            other => Err(format!("unknown vote type: {}", other)),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteType::Up => write!(f, "up"),
            VoteType::Down => write!(f, "down"),
            VoteType::Neutral => write!(f, "neutral"),
        }
    }
}

/// Direction requested by a vote button.
///
/// Clicking the button that already reflects the user's vote retracts it,
/// so a direction is turned into a [`VoteType`] only against a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_vote_type(&self) -> VoteType {
        match self {
            VoteDirection::Up => VoteType::Up,
            VoteDirection::Down => VoteType::Down,
        }
    }

    /// Vote type to send when `user` clicks this direction on `membership`
    pub fn toggle_against(&self, membership: &VoteMembership, user: &str) -> VoteType {
        let wanted = self.as_vote_type();
        if membership.vote_of(user) == wanted {
            VoteType::Neutral
        } else {
            wanted
        }
    }
}

/// What the next membership should look like for one acting user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteIntent {
    pub kind: VoteType,
    pub user_id: UserId,
}

impl VoteIntent {
    pub fn new(kind: VoteType, user_id: impl Into<UserId>) -> Self {
        Self {
            kind,
            user_id: user_id.into(),
        }
    }
}

/// Up-voters and down-voters of one entity.
///
/// A user appears in at most one of the two sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteMembership {
    #[serde(rename = "upVotesBy", default)]
    pub up_voters: BTreeSet<UserId>,
    #[serde(rename = "downVotesBy", default)]
    pub down_voters: BTreeSet<UserId>,
}

impl VoteMembership {
    pub fn new<U, D>(up_voters: U, down_voters: D) -> Self
    where
        U: IntoIterator,
        U::Item: Into<UserId>,
        D: IntoIterator,
        D::Item: Into<UserId>,
    {
        Self {
            up_voters: up_voters.into_iter().map(Into::into).collect(),
            down_voters: down_voters.into_iter().map(Into::into).collect(),
        }
    }

    /// Current vote of `user`, `Neutral` when in neither set
    pub fn vote_of(&self, user: &str) -> VoteType {
        if self.up_voters.contains(user) {
            VoteType::Up
        } else if self.down_voters.contains(user) {
            VoteType::Down
        } else {
            VoteType::Neutral
        }
    }

    pub fn score(&self) -> i64 {
        self.up_voters.len() as i64 - self.down_voters.len() as i64
    }

    /// True when no user is both an up-voter and a down-voter
    pub fn is_exclusive(&self) -> bool {
        self.up_voters.is_disjoint(&self.down_voters)
    }
}

/// Compute the membership that results from applying `intent`.
///
/// The acting user is removed from both sets, then inserted into the set
/// matching the intent (nowhere for `Neutral`). Idempotent.
pub fn reconcile(membership: &VoteMembership, intent: &VoteIntent) -> VoteMembership {
    let mut next = membership.clone();
    next.up_voters.remove(&intent.user_id);
    next.down_voters.remove(&intent.user_id);

    match intent.kind {
        VoteType::Up => {
            next.up_voters.insert(intent.user_id.clone());
        }
        VoteType::Down => {
            next.down_voters.insert(intent.user_id.clone());
        }
        VoteType::Neutral => {}
    }

    next
}

/// The `vote` object returned by the vote endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    pub vote_type: VoteType,
}

/// `data` payload of a vote response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteData {
    pub vote: VoteRecord,
}
