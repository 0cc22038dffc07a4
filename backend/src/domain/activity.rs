//! User activity projections.
//!
//! Activity is read-only here: recipes, reviews, and favorites are owned by
//! sibling services; this service only surfaces the most recent entries of
//! each kind, gated by the target's activity visibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Upper bound on `perTypeLimit`.
pub const MAX_PER_TYPE_LIMIT: i64 = 100;

/// Default `perTypeLimit` when the client omits it.
pub const DEFAULT_PER_TYPE_LIMIT: i64 = 15;

/// A recipe the user authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeActivity {
    pub recipe_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A follow the user performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowActivity {
    pub followee_id: UserId,
    pub followee_username: String,
    pub followed_at: DateTime<Utc>,
}

/// A review the user wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewActivity {
    pub review_id: Uuid,
    pub recipe_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// A favorite the user added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteActivity {
    pub recipe_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Four parallel most-recent-first activity sequences, each capped at the
/// requested per-type limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub user_id: UserId,
    pub recipes: Vec<RecipeActivity>,
    pub follows: Vec<FollowActivity>,
    pub reviews: Vec<ReviewActivity>,
    pub favorites: Vec<FavoriteActivity>,
}
