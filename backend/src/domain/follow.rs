//! Follow-graph domain types.
//!
//! Edges are directed `(follower, followee)` pairs with no self-edges and at
//! most one edge per ordered pair; the store enforces both.

use serde::Serialize;
use utoipa::ToSchema;

use super::user::UserId;

/// Outcome of a follow or unfollow mutation.
///
/// Both mutations are idempotent, so `is_following` reflects the final state
/// regardless of whether this particular call changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatus {
    pub follower_id: UserId,
    pub followee_id: UserId,
    pub is_following: bool,
}
