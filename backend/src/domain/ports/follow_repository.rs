//! Port for the follow graph.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{UserId, UserSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by follow repository adapters.
    pub enum FollowRepositoryError {
        /// Connection to the store could not be established.
        Connection { message: String } =>
            "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "follow repository query failed: {message}",
    }
}

/// Port for follow-edge storage.
///
/// Both mutations are idempotent at the store level: `create_edge` relies on
/// the composite primary key plus on-conflict-do-nothing, and `delete_edge`
/// on a plain delete. Each executes as a single statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert the edge; returns `true` when a new edge was created.
    async fn create_edge(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError>;

    /// Remove the edge; returns `true` when an edge was removed.
    async fn delete_edge(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError>;

    /// Whether the directed edge exists.
    async fn is_following(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError>;

    /// Users who follow `user_id`, most recent edge first.
    async fn list_followers(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<UserSummary>, FollowRepositoryError>;

    /// Users `user_id` follows, most recent edge first.
    async fn list_following(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<UserSummary>, FollowRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the follow graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFollowRepository;

#[async_trait]
impl FollowRepository for FixtureFollowRepository {
    async fn create_edge(
        &self,
        _follower_id: &UserId,
        _followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        Ok(false)
    }

    async fn delete_edge(
        &self,
        _follower_id: &UserId,
        _followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        Ok(false)
    }

    async fn is_following(
        &self,
        _follower_id: &UserId,
        _followee_id: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        Ok(false)
    }

    async fn list_followers(
        &self,
        _user_id: &UserId,
        _page: &PageRequest,
    ) -> Result<Page<UserSummary>, FollowRepositoryError> {
        Ok(Page::new(Vec::new(), 0))
    }

    async fn list_following(
        &self,
        _user_id: &UserId,
        _page: &PageRequest,
    ) -> Result<Page<UserSummary>, FollowRepositoryError> {
        Ok(Page::new(Vec::new(), 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_reports_no_edges() {
        let repo = FixtureFollowRepository;
        let a = UserId::random();
        let b = UserId::random();
        assert!(!repo.is_following(&a, &b).await.expect("fixture"));
        assert!(!repo.create_edge(&a, &b).await.expect("fixture"));
        assert!(!repo.delete_edge(&a, &b).await.expect("fixture"));
    }
}
