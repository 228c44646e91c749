//! Debug utilities and helpers
//!
//! Invariant checks that only fire in debug builds.

use crate::shared::forum::VoteMembership;

/// Debug mode feature flag
pub const DEBUG_MODE: bool = cfg!(debug_assertions);

/// Validate state invariant
///
/// Checks a state invariant and logs an error if it fails.
/// Panics in debug builds.
pub fn validate_invariant(condition: bool, message: &str) {
    if DEBUG_MODE && !condition {
        tracing::error!("Invariant violation: {}", message);
        #[cfg(debug_assertions)]
        {
            panic!("Invariant violation: {}", message);
        }
    }
}

/// `user` must not be both an up-voter and a down-voter.
///
/// Only the acting user is checked; memberships loaded from the server are
/// taken as they come.
pub fn validate_vote_exclusivity(membership: &VoteMembership, user: &str) {
    validate_invariant(
        !(membership.up_voters.contains(user) && membership.down_voters.contains(user)),
        "user is both an up-voter and a down-voter",
    );
}
