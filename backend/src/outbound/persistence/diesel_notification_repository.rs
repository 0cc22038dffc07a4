//! PostgreSQL-backed `NotificationRepository` implementation using Diesel.
//!
//! Bulk mutations run as single updates with returning clauses so the
//! transitioned set is exact and partial progress is impossible.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, UserId};

use super::diesel_error::{classify_diesel, classify_pool, StoreError};
use super::models::NotificationRow;
use super::pool::DbPool;
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_store_error(error: StoreError) -> NotificationRepositoryError {
    match error {
        StoreError::Connection(message) => NotificationRepositoryError::connection(message),
        StoreError::Query(message) | StoreError::UniqueViolation(message) => {
            NotificationRepositoryError::query(message)
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> NotificationRepositoryError {
    map_store_error(classify_pool(error))
}

fn map_diesel(error: diesel::result::Error) -> NotificationRepositoryError {
    map_store_error(classify_diesel(error))
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn list_owned(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let owned = notifications::table
            .filter(notifications::user_id.eq(user_id.as_uuid()))
            .filter(notifications::is_deleted.eq(false));

        let total: i64 = owned
            .clone()
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        if page.count_only() {
            return Ok(Page::count_only(total));
        }

        let rows: Vec<NotificationRow> = owned
            .order(notifications::created_at.desc())
            .limit(page.limit())
            .offset(page.offset())
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(Page::new(
            rows.into_iter().map(Notification::from).collect(),
            total,
        ))
    }

    async fn soft_delete_many(
        &self,
        user_id: &UserId,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(
            notifications::table
                .filter(notifications::id.eq_any(ids))
                .filter(notifications::user_id.eq(user_id.as_uuid()))
                .filter(notifications::is_deleted.eq(false)),
        )
        .set((
            notifications::is_deleted.eq(true),
            notifications::updated_at.eq(Utc::now()),
        ))
        .returning(notifications::id)
        .get_results(&mut conn)
        .await
        .map_err(map_diesel)
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        notification_id: Uuid,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Matches already-read rows too, so re-marking is a no-op success.
        let updated = diesel::update(
            notifications::table
                .filter(notifications::id.eq(notification_id))
                .filter(notifications::user_id.eq(user_id.as_uuid()))
                .filter(notifications::is_deleted.eq(false)),
        )
        .set((
            notifications::is_read.eq(true),
            notifications::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;
        Ok(updated > 0)
    }

    async fn mark_all_read(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Uuid>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id.as_uuid()))
                .filter(notifications::is_deleted.eq(false))
                .filter(notifications::is_read.eq(false)),
        )
        .set((
            notifications::is_read.eq(true),
            notifications::updated_at.eq(Utc::now()),
        ))
        .returning(notifications::id)
        .get_results(&mut conn)
        .await
        .map_err(map_diesel)
    }
}
