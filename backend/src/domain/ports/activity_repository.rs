//! Port for read-only user activity projections.

use async_trait::async_trait;

use crate::domain::{FavoriteActivity, FollowActivity, RecipeActivity, ReviewActivity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity repository adapters.
    pub enum ActivityRepositoryError {
        /// Connection to the store could not be established.
        Connection { message: String } =>
            "activity repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "activity repository query failed: {message}",
    }
}

/// Port for the four most-recent-first activity feeds.
///
/// Recipes, reviews, and favorites are owned by sibling services; this port
/// only reads their tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn recent_recipes(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<RecipeActivity>, ActivityRepositoryError>;

    async fn recent_follows(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<FollowActivity>, ActivityRepositoryError>;

    async fn recent_reviews(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<ReviewActivity>, ActivityRepositoryError>;

    async fn recent_favorites(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<FavoriteActivity>, ActivityRepositoryError>;
}

/// Fixture implementation with empty feeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityRepository;

#[async_trait]
impl ActivityRepository for FixtureActivityRepository {
    async fn recent_recipes(
        &self,
        _user_id: &UserId,
        _limit: i64,
    ) -> Result<Vec<RecipeActivity>, ActivityRepositoryError> {
        Ok(Vec::new())
    }

    async fn recent_follows(
        &self,
        _user_id: &UserId,
        _limit: i64,
    ) -> Result<Vec<FollowActivity>, ActivityRepositoryError> {
        Ok(Vec::new())
    }

    async fn recent_reviews(
        &self,
        _user_id: &UserId,
        _limit: i64,
    ) -> Result<Vec<ReviewActivity>, ActivityRepositoryError> {
        Ok(Vec::new())
    }

    async fn recent_favorites(
        &self,
        _user_id: &UserId,
        _limit: i64,
    ) -> Result<Vec<FavoriteActivity>, ActivityRepositoryError> {
        Ok(Vec::new())
    }
}
