//! PostgreSQL-backed `ActivityRepository` implementation using Diesel.
//!
//! Recipes, reviews, and favorites are owned by sibling services; this
//! adapter only reads their tables. Each feed is a capped newest-first
//! select.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ActivityRepository, ActivityRepositoryError};
use crate::domain::{FavoriteActivity, FollowActivity, RecipeActivity, ReviewActivity, UserId};

use super::diesel_error::{classify_diesel, classify_pool, StoreError};
use super::pool::DbPool;
use super::schema::{recipe_favorites, recipe_reviews, recipes, user_follows, users};

/// Diesel-backed implementation of the `ActivityRepository` port.
#[derive(Clone)]
pub struct DieselActivityRepository {
    pool: DbPool,
}

impl DieselActivityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_store_error(error: StoreError) -> ActivityRepositoryError {
    match error {
        StoreError::Connection(message) => ActivityRepositoryError::connection(message),
        StoreError::Query(message) | StoreError::UniqueViolation(message) => {
            ActivityRepositoryError::query(message)
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> ActivityRepositoryError {
    map_store_error(classify_pool(error))
}

fn map_diesel(error: diesel::result::Error) -> ActivityRepositoryError {
    map_store_error(classify_diesel(error))
}

#[async_trait]
impl ActivityRepository for DieselActivityRepository {
    async fn recent_recipes(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<RecipeActivity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(Uuid, String, DateTime<Utc>)> = recipes::table
            .filter(recipes::author_id.eq(user_id.as_uuid()))
            .order(recipes::created_at.desc())
            .limit(limit)
            .select((recipes::id, recipes::title, recipes::created_at))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows
            .into_iter()
            .map(|(recipe_id, title, created_at)| RecipeActivity {
                recipe_id,
                title,
                created_at,
            })
            .collect())
    }

    async fn recent_follows(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<FollowActivity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(Uuid, String, DateTime<Utc>)> = user_follows::table
            .filter(user_follows::follower_id.eq(user_id.as_uuid()))
            .inner_join(users::table.on(users::id.eq(user_follows::followee_id)))
            .order(user_follows::followed_at.desc())
            .limit(limit)
            .select((users::id, users::username, user_follows::followed_at))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows
            .into_iter()
            .map(|(followee_id, followee_username, followed_at)| FollowActivity {
                followee_id: UserId::from_uuid(followee_id),
                followee_username,
                followed_at,
            })
            .collect())
    }

    async fn recent_reviews(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<ReviewActivity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(Uuid, Uuid, i32, DateTime<Utc>)> = recipe_reviews::table
            .filter(recipe_reviews::user_id.eq(user_id.as_uuid()))
            .order(recipe_reviews::created_at.desc())
            .limit(limit)
            .select((
                recipe_reviews::id,
                recipe_reviews::recipe_id,
                recipe_reviews::rating,
                recipe_reviews::created_at,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows
            .into_iter()
            .map(|(review_id, recipe_id, rating, created_at)| ReviewActivity {
                review_id,
                recipe_id,
                rating,
                created_at,
            })
            .collect())
    }

    async fn recent_favorites(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<FavoriteActivity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(Uuid, DateTime<Utc>)> = recipe_favorites::table
            .filter(recipe_favorites::user_id.eq(user_id.as_uuid()))
            .order(recipe_favorites::created_at.desc())
            .limit(limit)
            .select((recipe_favorites::recipe_id, recipe_favorites::created_at))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows
            .into_iter()
            .map(|(recipe_id, created_at)| FavoriteActivity {
                recipe_id,
                created_at,
            })
            .collect())
    }
}
