//! Driving port for follow, unfollow, and social-graph listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, FollowStatus, Principal, UserId, UserSummary};

/// Domain use-case port for the follow graph.
///
/// Follow and unfollow are idempotent; the returned status reflects the
/// final state regardless of whether the call changed anything.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Create the edge `acting -> target`.
    async fn follow(
        &self,
        requester: &Principal,
        acting_id: &UserId,
        target_id: &UserId,
    ) -> Result<FollowStatus, Error>;

    /// Remove the edge `acting -> target`.
    async fn unfollow(
        &self,
        requester: &Principal,
        acting_id: &UserId,
        target_id: &UserId,
    ) -> Result<FollowStatus, Error>;

    /// Users who follow `target_id`, gated by the target's visibility.
    async fn followers(
        &self,
        requester: &Principal,
        target_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, Error>;

    /// Users `target_id` follows, gated by the target's visibility.
    async fn following(
        &self,
        requester: &Principal,
        target_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, Error>;
}

/// Fixture graph where every user is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSocialGraph;

#[async_trait]
impl SocialGraph for FixtureSocialGraph {
    async fn follow(
        &self,
        _requester: &Principal,
        _acting_id: &UserId,
        _target_id: &UserId,
    ) -> Result<FollowStatus, Error> {
        Err(Error::user_not_found())
    }

    async fn unfollow(
        &self,
        _requester: &Principal,
        _acting_id: &UserId,
        _target_id: &UserId,
    ) -> Result<FollowStatus, Error> {
        Err(Error::user_not_found())
    }

    async fn followers(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _page: PageRequest,
    ) -> Result<Page<UserSummary>, Error> {
        Ok(Page::new(Vec::new(), 0))
    }

    async fn following(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _page: PageRequest,
    ) -> Result<Page<UserSummary>, Error> {
        Ok(Page::new(Vec::new(), 0))
    }
}
