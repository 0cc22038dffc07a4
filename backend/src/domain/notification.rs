//! Notification domain types.
//!
//! Notifications are produced by sibling services and only consumed here.
//! Deletion is soft; deleted rows are hidden from every read.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// A notification row owned by exactly one user.
///
/// ## Invariants
/// - Visible only to its owner.
/// - State transitions are `unread -> read` and `alive -> deleted` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a bulk soft delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDeletion {
    /// Ids that actually transitioned to deleted in this call.
    pub deleted_ids: Vec<Uuid>,
    pub outcome: DeletionOutcome,
}

/// How much of a bulk delete request took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Every requested id transitioned.
    Full,
    /// Some requested ids transitioned, others were missing or already gone.
    Partial,
    /// Nothing transitioned.
    NoneFound,
}

impl NotificationDeletion {
    /// Classify the adapter's transitioned-ids set against the request.
    pub fn classify(requested: usize, deleted_ids: Vec<Uuid>) -> Self {
        let outcome = if deleted_ids.is_empty() {
            DeletionOutcome::NoneFound
        } else if deleted_ids.len() < requested {
            DeletionOutcome::Partial
        } else {
            DeletionOutcome::Full
        };
        Self {
            deleted_ids,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::full(2, 2, DeletionOutcome::Full)]
    #[case::partial(3, 2, DeletionOutcome::Partial)]
    #[case::none(2, 0, DeletionOutcome::NoneFound)]
    fn classify_matches_spec_outcomes(
        #[case] requested: usize,
        #[case] deleted: usize,
        #[case] expected: DeletionOutcome,
    ) {
        let ids: Vec<Uuid> = (0..deleted).map(|_| Uuid::new_v4()).collect();
        let result = NotificationDeletion::classify(requested, ids.clone());
        assert_eq!(result.outcome, expected);
        assert_eq!(result.deleted_ids, ids);
    }
}
