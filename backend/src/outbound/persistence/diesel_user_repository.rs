//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ProfileUpdate, User, UserId, UserStats, UserSummary};

use super::diesel_error::{classify_diesel, classify_pool, StoreError};
use super::models::{UserProfileChangeset, UserRow, UserStatsRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_store_error(error: StoreError) -> UserRepositoryError {
    match error {
        StoreError::Connection(message) => UserRepositoryError::connection(message),
        StoreError::Query(message) => UserRepositoryError::query(message),
        StoreError::UniqueViolation(constraint) => {
            UserRepositoryError::unique_violation(constraint)
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> UserRepositoryError {
    map_store_error(classify_pool(error))
}

fn map_diesel(error: diesel::result::Error) -> UserRepositoryError {
    map_store_error(classify_diesel(error))
}

/// One aggregate read; "week" and "month" are calendar-truncated to the
/// store's current time.
const STATS_SQL: &str = "\
SELECT \
  (SELECT COUNT(*) FROM users) AS total_users, \
  (SELECT COUNT(*) FROM users WHERE is_active) AS active_users, \
  (SELECT COUNT(*) FROM users WHERE NOT is_active) AS inactive_users, \
  (SELECT COUNT(*) FROM users WHERE created_at >= date_trunc('day', now())) AS new_users_today, \
  (SELECT COUNT(*) FROM users WHERE created_at >= date_trunc('week', now())) AS new_users_this_week, \
  (SELECT COUNT(*) FROM users WHERE created_at >= date_trunc('month', now())) AS new_users_this_month";

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.map(User::from))
    }

    async fn exists(&self, user_id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(diesel::dsl::exists(
            users::table
                .filter(users::id.eq(user_id.as_uuid()))
                .filter(users::is_active.eq(true)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: &ProfileUpdate,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changeset = UserProfileChangeset {
            username: changes.username.clone(),
            email: changes.email.clone(),
            full_name: changes.full_name.clone(),
            bio: changes.bio.clone(),
            updated_at: Utc::now(),
        };

        let row: Option<UserRow> =
            diesel::update(users::table.filter(users::id.eq(user_id.as_uuid())))
                .set(&changeset)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel)?;
        Ok(row.map(User::from))
    }

    async fn search_active(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Page<UserSummary>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let pattern = format!("%{query}%");

        let matching = users::table.filter(users::is_active.eq(true)).filter(
            users::username
                .ilike(pattern.clone())
                .or(users::full_name.ilike(pattern.clone())),
        );

        let total: i64 = matching
            .clone()
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        if page.count_only() {
            return Ok(Page::count_only(total));
        }

        let rows: Vec<(Uuid, String, Option<String>)> = matching
            .order(users::username.asc())
            .limit(page.limit())
            .offset(page.offset())
            .select((users::id, users::username, users::full_name))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(|(id, username, full_name)| UserSummary {
                id: UserId::from_uuid(id),
                username,
                full_name,
                followed_at: None,
            })
            .collect();
        Ok(Page::new(items, total))
    }

    async fn stats(&self) -> Result<UserStats, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: UserStatsRow = diesel::sql_query(STATS_SQL)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(row.into())
    }

    async fn deactivate(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Deliberately matches already-inactive rows so concurrent confirms
        // both succeed.
        diesel::update(users::table.filter(users::id.eq(user_id.as_uuid())))
            .set((users::is_active.eq(false), users::updated_at.eq(Utc::now())))
            .returning(users::updated_at)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violations_keep_the_constraint_name() {
        let err = map_store_error(StoreError::UniqueViolation("users_username_key".to_owned()));
        assert!(matches!(err, UserRepositoryError::UniqueViolation { .. }));
        assert!(err.to_string().contains("users_username_key"));
    }

    #[rstest]
    fn pool_failures_map_to_connection_errors() {
        let err = map_pool(super::super::pool::PoolError::checkout("refused"));
        assert!(matches!(err, UserRepositoryError::Connection { .. }));
    }
}
