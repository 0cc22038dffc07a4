//! PostgreSQL-backed `FollowRepository` implementation using Diesel.
//!
//! Idempotence lives in the statements themselves: edge creation is an
//! insert with on-conflict-do-nothing against the composite primary key,
//! and edge deletion simply removes zero or one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{FollowRepository, FollowRepositoryError};
use crate::domain::{UserId, UserSummary};

use super::diesel_error::{classify_diesel, classify_pool, StoreError};
use super::pool::DbPool;
use super::schema::{user_follows, users};

/// Diesel-backed implementation of the `FollowRepository` port.
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_store_error(error: StoreError) -> FollowRepositoryError {
    match error {
        StoreError::Connection(message) => FollowRepositoryError::connection(message),
        // The composite key conflict is absorbed by on-conflict-do-nothing,
        // so a surfacing unique violation is a plain query failure here.
        StoreError::Query(message) | StoreError::UniqueViolation(message) => {
            FollowRepositoryError::query(message)
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> FollowRepositoryError {
    map_store_error(classify_pool(error))
}

fn map_diesel(error: diesel::result::Error) -> FollowRepositoryError {
    map_store_error(classify_diesel(error))
}

fn rows_to_summaries(rows: Vec<(Uuid, String, Option<String>, DateTime<Utc>)>) -> Vec<UserSummary> {
    rows.into_iter()
        .map(|(id, username, full_name, followed_at)| UserSummary {
            id: UserId::from_uuid(id),
            username,
            full_name,
            followed_at: Some(followed_at),
        })
        .collect()
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn create_edge(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let inserted = diesel::insert_into(user_follows::table)
            .values((
                user_follows::follower_id.eq(follower_id.as_uuid()),
                user_follows::followee_id.eq(followee_id.as_uuid()),
                user_follows::followed_at.eq(Utc::now()),
            ))
            .on_conflict((user_follows::follower_id, user_follows::followee_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(inserted > 0)
    }

    async fn delete_edge(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(
            user_follows::table
                .filter(user_follows::follower_id.eq(follower_id.as_uuid()))
                .filter(user_follows::followee_id.eq(followee_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;
        Ok(removed > 0)
    }

    async fn is_following(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(diesel::dsl::exists(
            user_follows::table
                .filter(user_follows::follower_id.eq(follower_id.as_uuid()))
                .filter(user_follows::followee_id.eq(followee_id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel)
    }

    async fn list_followers(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<UserSummary>, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let edges = user_follows::table
            .filter(user_follows::followee_id.eq(user_id.as_uuid()));

        let total: i64 = edges
            .clone()
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        if page.count_only() {
            return Ok(Page::count_only(total));
        }

        let rows: Vec<(Uuid, String, Option<String>, DateTime<Utc>)> = edges
            .inner_join(users::table.on(users::id.eq(user_follows::follower_id)))
            .order(user_follows::followed_at.desc())
            .limit(page.limit())
            .offset(page.offset())
            .select((
                users::id,
                users::username,
                users::full_name,
                user_follows::followed_at,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(Page::new(rows_to_summaries(rows), total))
    }

    async fn list_following(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<UserSummary>, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let edges = user_follows::table
            .filter(user_follows::follower_id.eq(user_id.as_uuid()));

        let total: i64 = edges
            .clone()
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        if page.count_only() {
            return Ok(Page::count_only(total));
        }

        let rows: Vec<(Uuid, String, Option<String>, DateTime<Utc>)> = edges
            .inner_join(users::table.on(users::id.eq(user_follows::followee_id)))
            .order(user_follows::followed_at.desc())
            .limit(page.limit())
            .offset(page.offset())
            .select((
                users::id,
                users::username,
                users::full_name,
                user_follows::followed_at,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(Page::new(rows_to_summaries(rows), total))
    }
}
