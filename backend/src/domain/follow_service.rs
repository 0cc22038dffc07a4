//! Social graph domain service.
//!
//! Follow and unfollow lean on the store for idempotence: the edge table's
//! composite key plus on-conflict-do-nothing makes repeated follows a no-op,
//! and deleting a missing edge simply removes zero rows.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::access;
use crate::domain::ports::{
    FollowRepository, PreferencesRepository, SocialGraph, UserRepository,
};
use crate::domain::preferences::SocialPreferences;
use crate::domain::profile_service::{map_follow_error, map_preferences_error, map_user_error};
use crate::domain::{Error, ErrorCode, FollowStatus, Principal, UserId, UserSummary};

/// Social graph service implementing the [`SocialGraph`] driving port.
#[derive(Clone)]
pub struct SocialGraphService<U, F, P> {
    users: Arc<U>,
    follows: Arc<F>,
    preferences: Arc<P>,
}

impl<U, F, P> SocialGraphService<U, F, P> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, follows: Arc<F>, preferences: Arc<P>) -> Self {
        Self {
            users,
            follows,
            preferences,
        }
    }
}

impl<U, F, P> SocialGraphService<U, F, P>
where
    U: UserRepository,
    F: FollowRepository,
    P: PreferencesRepository,
{
    /// The acting user must be the caller, unless the caller is an admin.
    fn authorize_acting(requester: &Principal, acting_id: &UserId) -> Result<(), Error> {
        let caller = requester.require_user_id()?;
        if &caller == acting_id || requester.is_admin() {
            return Ok(());
        }
        Err(Error::forbidden("cannot act on behalf of another user"))
    }

    async fn require_target(&self, target_id: &UserId) -> Result<(), Error> {
        if self
            .users
            .exists(target_id)
            .await
            .map_err(map_user_error)?
        {
            return Ok(());
        }
        Err(Error::user_not_found())
    }

    async fn target_accepts_follows(&self, target_id: &UserId) -> Result<bool, Error> {
        let social = self
            .preferences
            .fetch_social(target_id)
            .await
            .map_err(map_preferences_error)?
            .unwrap_or_else(SocialPreferences::defaults);
        Ok(social.friend_requests)
    }

    /// Listings share the profile visibility gate.
    async fn gate_listing(&self, requester: &Principal, target_id: &UserId) -> Result<(), Error> {
        let privacy = self
            .preferences
            .fetch_privacy(target_id)
            .await
            .map_err(map_preferences_error)?
            .unwrap_or_else(crate::domain::preferences::PrivacyPreferences::defaults);

        let is_follower = if privacy.profile_visibility
            == crate::domain::preferences::Visibility::FollowersOnly
            && access::needs_follow_check(requester, target_id)
        {
            let requester_id = requester.require_user_id()?;
            self.follows
                .is_following(&requester_id, target_id)
                .await
                .map_err(map_follow_error)?
        } else {
            false
        };
        access::check_visibility(requester, target_id, privacy.profile_visibility, is_follower)
    }
}

#[async_trait]
impl<U, F, P> SocialGraph for SocialGraphService<U, F, P>
where
    U: UserRepository,
    F: FollowRepository,
    P: PreferencesRepository,
{
    async fn follow(
        &self,
        requester: &Principal,
        acting_id: &UserId,
        target_id: &UserId,
    ) -> Result<FollowStatus, Error> {
        Self::authorize_acting(requester, acting_id)?;
        if acting_id == target_id {
            return Err(Error::new(
                ErrorCode::CannotFollowSelf,
                "cannot follow yourself",
            ));
        }
        self.require_target(target_id).await?;
        if !self.target_accepts_follows(target_id).await? {
            return Err(Error::forbidden("user does not accept follows"));
        }

        self.follows
            .create_edge(acting_id, target_id)
            .await
            .map_err(map_follow_error)?;
        Ok(FollowStatus {
            follower_id: acting_id.clone(),
            followee_id: target_id.clone(),
            is_following: true,
        })
    }

    async fn unfollow(
        &self,
        requester: &Principal,
        acting_id: &UserId,
        target_id: &UserId,
    ) -> Result<FollowStatus, Error> {
        Self::authorize_acting(requester, acting_id)?;
        if acting_id == target_id {
            return Err(Error::new(
                ErrorCode::CannotUnfollowSelf,
                "cannot unfollow yourself",
            ));
        }
        self.require_target(target_id).await?;

        self.follows
            .delete_edge(acting_id, target_id)
            .await
            .map_err(map_follow_error)?;
        Ok(FollowStatus {
            follower_id: acting_id.clone(),
            followee_id: target_id.clone(),
            is_following: false,
        })
    }

    async fn followers(
        &self,
        requester: &Principal,
        target_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, Error> {
        self.require_target(target_id).await?;
        self.gate_listing(requester, target_id).await?;
        self.follows
            .list_followers(target_id, &page)
            .await
            .map_err(map_follow_error)
    }

    async fn following(
        &self,
        requester: &Principal,
        target_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, Error> {
        self.require_target(target_id).await?;
        self.gate_listing(requester, target_id).await?;
        self.follows
            .list_following(target_id, &page)
            .await
            .map_err(map_follow_error)
    }
}
