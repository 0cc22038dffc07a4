//! Shared authorization rules applied across services.
//!
//! Visibility gating for profiles, social-graph listings, and activity feeds
//! all follow the same mapping from the target's privacy settings, so the
//! rule lives here once.

use super::preferences::Visibility;
use super::{Error, Principal, Scope, UserId};

/// Whether the requester is the target user.
pub(crate) fn is_self(requester: &Principal, target_id: &UserId) -> bool {
    requester.user_id() == Some(target_id)
}

/// Gate a read of `target_id`'s resource by its visibility setting.
///
/// The target themselves and admins bypass the gate; the caller supplies
/// `is_follower` for the followers-only arm. Rejections are uniform so the
/// response does not leak which setting is in force.
pub(crate) fn check_visibility(
    requester: &Principal,
    target_id: &UserId,
    visibility: Visibility,
    is_follower: bool,
) -> Result<(), Error> {
    if is_self(requester, target_id) || requester.is_admin() {
        return Ok(());
    }
    match visibility {
        Visibility::Public => Ok(()),
        Visibility::FollowersOnly if is_follower => Ok(()),
        Visibility::FollowersOnly | Visibility::Private => {
            Err(Error::forbidden("profile is private"))
        }
    }
}

/// Whether the followers-only arm of [`check_visibility`] needs a follow
/// lookup at all. Self, admins, and anonymous requesters never do.
pub(crate) fn needs_follow_check(requester: &Principal, target_id: &UserId) -> bool {
    !is_self(requester, target_id) && !requester.is_admin() && requester.user_id().is_some()
}

/// Requested preference access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PreferenceAccess {
    Read,
    Write,
}

/// Authorize a preference read or write against `target_id`.
///
/// Allowed for the target themselves, admins, and service accounts holding
/// the matching `user:read` / `user:write` scope.
pub(crate) fn authorize_preferences(
    requester: &Principal,
    target_id: &UserId,
    access: PreferenceAccess,
) -> Result<(), Error> {
    if requester.is_anonymous() {
        return Err(Error::unauthorized("authentication required"));
    }
    if is_self(requester, target_id) || requester.is_admin() {
        return Ok(());
    }
    let needed = match access {
        PreferenceAccess::Read => Scope::UserRead,
        PreferenceAccess::Write => Scope::UserWrite,
    };
    if requester.is_service() && requester.has_scope(needed) {
        return Ok(());
    }
    Err(Error::forbidden("cannot access another user's preferences"))
}

/// Require the admin scope, distinguishing missing identity from missing
/// privilege.
pub(crate) fn require_admin(requester: &Principal) -> Result<(), Error> {
    if requester.is_anonymous() {
        return Err(Error::unauthorized("authentication required"));
    }
    if requester.is_admin() {
        return Ok(());
    }
    Err(Error::forbidden("admin scope required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn user(id: &UserId) -> Principal {
        Principal::user(id.clone(), Vec::new())
    }

    #[rstest]
    fn self_and_admin_bypass_private_visibility() {
        let target = UserId::random();
        check_visibility(&user(&target), &target, Visibility::Private, false)
            .expect("self bypasses");
        let admin = Principal::user(UserId::random(), vec![Scope::Admin]);
        check_visibility(&admin, &target, Visibility::Private, false).expect("admin bypasses");
    }

    #[rstest]
    #[case(Visibility::Private, false)]
    #[case(Visibility::FollowersOnly, false)]
    fn strangers_are_rejected(#[case] visibility: Visibility, #[case] is_follower: bool) {
        let target = UserId::random();
        let err = check_visibility(&user(&UserId::random()), &target, visibility, is_follower)
            .expect_err("gated");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn followers_pass_followers_only() {
        let target = UserId::random();
        check_visibility(
            &user(&UserId::random()),
            &target,
            Visibility::FollowersOnly,
            true,
        )
        .expect("follower allowed");
    }

    #[rstest]
    fn anonymous_requesters_skip_follow_lookup() {
        let target = UserId::random();
        assert!(!needs_follow_check(&Principal::anonymous(), &target));
        assert!(!needs_follow_check(&user(&target), &target));
        assert!(needs_follow_check(&user(&UserId::random()), &target));
    }

    #[rstest]
    fn preference_access_requires_matching_scope() {
        let target = UserId::random();
        let reader = Principal::service("recipe-service", vec![Scope::UserRead]);
        authorize_preferences(&reader, &target, PreferenceAccess::Read).expect("scoped read");
        let err = authorize_preferences(&reader, &target, PreferenceAccess::Write)
            .expect_err("missing write scope");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn anonymous_preference_access_is_unauthorized() {
        let err = authorize_preferences(
            &Principal::anonymous(),
            &UserId::random(),
            PreferenceAccess::Read,
        )
        .expect_err("no identity");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn require_admin_distinguishes_identity_from_privilege() {
        assert_eq!(
            require_admin(&Principal::anonymous())
                .expect_err("anonymous")
                .code(),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            require_admin(&user(&UserId::random()))
                .expect_err("plain user")
                .code(),
            ErrorCode::Forbidden
        );
        require_admin(&Principal::user(UserId::random(), vec![Scope::Admin])).expect("admin");
    }
}
