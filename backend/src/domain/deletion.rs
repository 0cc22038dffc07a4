//! Two-phase account deletion value types.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::user::UserId;

/// Lifetime of a deletion-confirmation token in the cache.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Result of the request phase: a freshly minted confirmation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionRequest {
    pub user_id: UserId,
    pub confirmation_token: String,
    pub expires_at: DateTime<Utc>,
}

impl DeletionRequest {
    /// Build a request result with the canonical 24-hour expiry from `now`.
    pub fn new(user_id: UserId, confirmation_token: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            confirmation_token,
            expires_at: now + Duration::hours(TOKEN_TTL_HOURS),
        }
    }
}

/// Result of the confirm phase: the account is now soft-deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionConfirmation {
    pub user_id: UserId,
    pub is_active: bool,
    pub deactivated_at: DateTime<Utc>,
}
