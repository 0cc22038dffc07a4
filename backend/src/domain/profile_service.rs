//! User directory domain service.
//!
//! Implements profile retrieval with visibility filtering, partial profile
//! updates, active-user search, activity feeds, and admin statistics.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::access;
use crate::domain::ports::{
    ActivityRepository, ActivityRepositoryError, FollowRepository, FollowRepositoryError,
    PreferencesRepository, PreferencesRepositoryError, UserDirectory, UserRepository,
    UserRepositoryError,
};
use crate::domain::preferences::{PrivacyPreferences, Visibility};
use crate::domain::{
    ActivitySummary, Error, ErrorCode, Principal, ProfileUpdate, User, UserId, UserProfile,
    UserStats, UserSummary, MAX_PER_TYPE_LIMIT,
};

/// User directory service implementing the [`UserDirectory`] driving port.
#[derive(Clone)]
pub struct UserDirectoryService<U, F, P, A> {
    users: Arc<U>,
    follows: Arc<F>,
    preferences: Arc<P>,
    activity: Arc<A>,
}

impl<U, F, P, A> UserDirectoryService<U, F, P, A> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, follows: Arc<F>, preferences: Arc<P>, activity: Arc<A>) -> Self {
        Self {
            users,
            follows,
            preferences,
            activity,
        }
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::UniqueViolation { constraint: _ } => {
            Error::new(ErrorCode::UsernameConflict, "username already taken")
        }
    }
}

pub(crate) fn map_follow_error(error: FollowRepositoryError) -> Error {
    match error {
        FollowRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowRepositoryError::Query { message } => {
            Error::internal(format!("follow repository error: {message}"))
        }
    }
}

pub(crate) fn map_preferences_error(error: PreferencesRepositoryError) -> Error {
    match error {
        PreferencesRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("preferences repository unavailable: {message}"))
        }
        PreferencesRepositoryError::Query { message } => {
            Error::internal(format!("preferences repository error: {message}"))
        }
    }
}

fn map_activity_error(error: ActivityRepositoryError) -> Error {
    match error {
        ActivityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("activity repository unavailable: {message}"))
        }
        ActivityRepositoryError::Query { message } => {
            Error::internal(format!("activity repository error: {message}"))
        }
    }
}

impl<U, F, P, A> UserDirectoryService<U, F, P, A>
where
    U: UserRepository,
    F: FollowRepository,
    P: PreferencesRepository,
    A: ActivityRepository,
{
    /// Fetch the target user, treating inactive accounts as absent.
    async fn fetch_active_user(&self, target_id: &UserId) -> Result<User, Error> {
        let user = self
            .users
            .find_by_id(target_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(Error::user_not_found)?;
        if !user.is_active {
            return Err(Error::user_not_found());
        }
        Ok(user)
    }

    async fn fetch_privacy(&self, target_id: &UserId) -> Result<PrivacyPreferences, Error> {
        Ok(self
            .preferences
            .fetch_privacy(target_id)
            .await
            .map_err(map_preferences_error)?
            .unwrap_or_else(PrivacyPreferences::defaults))
    }

    /// Apply the visibility gate for `visibility`, looking up follow state
    /// only when it can change the outcome.
    async fn gate_visibility(
        &self,
        requester: &Principal,
        target_id: &UserId,
        visibility: Visibility,
    ) -> Result<(), Error> {
        let is_follower = if visibility == Visibility::FollowersOnly
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
        access::check_visibility(requester, target_id, visibility, is_follower)
    }
}

#[async_trait]
impl<U, F, P, A> UserDirectory for UserDirectoryService<U, F, P, A>
where
    U: UserRepository,
    F: FollowRepository,
    P: PreferencesRepository,
    A: ActivityRepository,
{
    async fn get_profile(
        &self,
        requester: &Principal,
        target_id: &UserId,
    ) -> Result<UserProfile, Error> {
        let user = self.fetch_active_user(target_id).await?;

        if access::is_self(requester, target_id) || requester.is_admin() {
            return Ok(UserProfile::full(user));
        }

        let privacy = self.fetch_privacy(target_id).await?;
        self.gate_visibility(requester, target_id, privacy.profile_visibility)
            .await?;

        let show_contact = privacy.contact_info_visibility == Visibility::Public;
        Ok(UserProfile::filtered(user, show_contact, show_contact))
    }

    async fn update_profile(
        &self,
        requester: &Principal,
        changes: ProfileUpdate,
    ) -> Result<UserProfile, Error> {
        let user_id = requester.require_user_id()?;
        if changes.is_empty() {
            return Err(Error::validation("no profile fields supplied"));
        }
        if let Some(username) = changes.username.as_deref() {
            if username.trim().is_empty() {
                return Err(Error::validation("username must not be empty"));
            }
        }

        let updated = self
            .users
            .update_profile(&user_id, &changes)
            .await
            .map_err(map_user_error)?
            .ok_or_else(Error::user_not_found)?;
        Ok(UserProfile::full(updated))
    }

    async fn search(
        &self,
        _requester: &Principal,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("search query must not be empty"));
        }
        self.users
            .search_active(query, &page)
            .await
            .map_err(map_user_error)
    }

    async fn activity(
        &self,
        requester: &Principal,
        target_id: &UserId,
        per_type_limit: i64,
    ) -> Result<ActivitySummary, Error> {
        if !(1..=MAX_PER_TYPE_LIMIT).contains(&per_type_limit) {
            return Err(Error::validation(format!(
                "perTypeLimit must be between 1 and {MAX_PER_TYPE_LIMIT}"
            )));
        }
        self.fetch_active_user(target_id).await?;

        let privacy = self.fetch_privacy(target_id).await?;
        self.gate_visibility(requester, target_id, privacy.activity_visibility)
            .await?;

        let recipes = self
            .activity
            .recent_recipes(target_id, per_type_limit)
            .await
            .map_err(map_activity_error)?;
        let follows = self
            .activity
            .recent_follows(target_id, per_type_limit)
            .await
            .map_err(map_activity_error)?;
        let reviews = self
            .activity
            .recent_reviews(target_id, per_type_limit)
            .await
            .map_err(map_activity_error)?;
        let favorites = self
            .activity
            .recent_favorites(target_id, per_type_limit)
            .await
            .map_err(map_activity_error)?;

        Ok(ActivitySummary {
            user_id: target_id.clone(),
            recipes,
            follows,
            reviews,
            favorites,
        })
    }

    async fn stats(&self, requester: &Principal) -> Result<UserStats, Error> {
        access::require_admin(requester)?;
        self.users.stats().await.map_err(map_user_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockActivityRepository, MockFollowRepository, MockPreferencesRepository,
        MockUserRepository,
    };
    use crate::domain::Scope;
    use chrono::Utc;
    use rstest::rstest;

    fn active_user(id: &UserId) -> User {
        User {
            id: id.clone(),
            username: "alice".to_owned(),
            email: Some("alice@example.com".to_owned()),
            full_name: Some("Alice Example".to_owned()),
            bio: Some("cooks".to_owned()),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        users: MockUserRepository,
        follows: MockFollowRepository,
        preferences: MockPreferencesRepository,
        activity: MockActivityRepository,
    ) -> UserDirectoryService<
        MockUserRepository,
        MockFollowRepository,
        MockPreferencesRepository,
        MockActivityRepository,
    > {
        UserDirectoryService::new(
            Arc::new(users),
            Arc::new(follows),
            Arc::new(preferences),
            Arc::new(activity),
        )
    }

    #[tokio::test]
    async fn missing_user_yields_user_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let svc = service(
            users,
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );

        let err = svc
            .get_profile(&Principal::anonymous(), &UserId::random())
            .await
            .expect_err("absent user");
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn deactivated_user_reads_as_absent() {
        let target = UserId::random();
        let mut users = MockUserRepository::new();
        let stored = User {
            is_active: false,
            ..active_user(&target)
        };
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let svc = service(
            users,
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );

        let err = svc
            .get_profile(&Principal::anonymous(), &target)
            .await
            .expect_err("deactivated");
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn owner_sees_full_profile_without_privacy_lookup() {
        let target = UserId::random();
        let mut users = MockUserRepository::new();
        let stored = active_user(&target);
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let svc = service(
            users,
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );

        let profile = svc
            .get_profile(&Principal::user(target.clone(), Vec::new()), &target)
            .await
            .expect("own profile");
        assert_eq!(profile.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn public_profile_hides_contact_info_by_default() {
        let target = UserId::random();
        let mut users = MockUserRepository::new();
        let stored = active_user(&target);
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let mut preferences = MockPreferencesRepository::new();
        preferences.expect_fetch_privacy().returning(|_| Ok(None));
        let svc = service(
            users,
            MockFollowRepository::new(),
            preferences,
            MockActivityRepository::new(),
        );

        let profile = svc
            .get_profile(&Principal::anonymous(), &target)
            .await
            .expect("public profile");
        assert!(profile.email.is_none());
        assert!(profile.full_name.is_none());
        assert_eq!(profile.username, "alice");
    }

    #[tokio::test]
    async fn private_profile_rejects_strangers() {
        let target = UserId::random();
        let mut users = MockUserRepository::new();
        let stored = active_user(&target);
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let mut preferences = MockPreferencesRepository::new();
        preferences.expect_fetch_privacy().returning(|_| {
            Ok(Some(PrivacyPreferences {
                profile_visibility: Visibility::Private,
                ..PrivacyPreferences::defaults()
            }))
        });
        let svc = service(
            users,
            MockFollowRepository::new(),
            preferences,
            MockActivityRepository::new(),
        );

        let err = svc
            .get_profile(&Principal::user(UserId::random(), Vec::new()), &target)
            .await
            .expect_err("private profile");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn followers_only_profile_depends_on_follow_edge(#[case] follows_target: bool) {
        let target = UserId::random();
        let requester = UserId::random();
        let mut users = MockUserRepository::new();
        let stored = active_user(&target);
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let mut preferences = MockPreferencesRepository::new();
        preferences.expect_fetch_privacy().returning(|_| {
            Ok(Some(PrivacyPreferences {
                profile_visibility: Visibility::FollowersOnly,
                ..PrivacyPreferences::defaults()
            }))
        });
        let mut follow_repo = MockFollowRepository::new();
        follow_repo
            .expect_is_following()
            .returning(move |_, _| Ok(follows_target));
        let svc = service(users, follow_repo, preferences, MockActivityRepository::new());

        let result = svc
            .get_profile(&Principal::user(requester, Vec::new()), &target)
            .await;
        if follows_target {
            result.expect("follower may view");
        } else {
            assert_eq!(
                result.expect_err("stranger rejected").code(),
                ErrorCode::Forbidden
            );
        }
    }

    #[tokio::test]
    async fn username_conflict_surfaces_as_conflict_code() {
        let caller = UserId::random();
        let mut users = MockUserRepository::new();
        users.expect_update_profile().returning(|_, _| {
            Err(UserRepositoryError::unique_violation("users_username_key"))
        });
        let svc = service(
            users,
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );

        let changes = ProfileUpdate {
            username: Some("taken".to_owned()),
            ..ProfileUpdate::default()
        };
        let err = svc
            .update_profile(&Principal::user(caller, Vec::new()), changes)
            .await
            .expect_err("duplicate username");
        assert_eq!(err.code(), ErrorCode::UsernameConflict);
    }

    #[tokio::test]
    async fn empty_update_is_a_validation_error() {
        let svc = service(
            MockUserRepository::new(),
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );
        let err = svc
            .update_profile(
                &Principal::user(UserId::random(), Vec::new()),
                ProfileUpdate::default(),
            )
            .await
            .expect_err("nothing to update");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    #[tokio::test]
    async fn activity_rejects_out_of_range_limit(#[case] limit: i64) {
        let svc = service(
            MockUserRepository::new(),
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );
        let err = svc
            .activity(&Principal::anonymous(), &UserId::random(), limit)
            .await
            .expect_err("out of range");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn stats_requires_admin_scope() {
        let svc = service(
            MockUserRepository::new(),
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );
        let err = svc
            .stats(&Principal::user(UserId::random(), Vec::new()))
            .await
            .expect_err("not admin");
        assert_eq!(err.code(), ErrorCode::Forbidden);

        let mut users = MockUserRepository::new();
        users.expect_stats().returning(|| Ok(UserStats::default()));
        let svc = service(
            users,
            MockFollowRepository::new(),
            MockPreferencesRepository::new(),
            MockActivityRepository::new(),
        );
        svc.stats(&Principal::user(UserId::random(), vec![Scope::Admin]))
            .await
            .expect("admin allowed");
    }
}
