//! Preference centre domain service.
//!
//! Reads substitute the canonical defaults when no row exists; updates are
//! read-merge-write upserts so absent patch fields preserve stored values
//! (or defaults when the row is new).

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::{self, PreferenceAccess};
use crate::domain::ports::{PreferenceCenter, PreferencesRepository, UserRepository};
use crate::domain::preferences::{
    PreferenceCategory, PreferencePatch, PreferenceRecord, PreferencesPatchSet, PreferencesSet,
};
use crate::domain::profile_service::{map_preferences_error, map_user_error};
use crate::domain::{Error, Principal, UserId};

/// Preference centre service implementing the [`PreferenceCenter`] port.
#[derive(Clone)]
pub struct PreferenceCenterService<U, P> {
    users: Arc<U>,
    preferences: Arc<P>,
}

impl<U, P> PreferenceCenterService<U, P> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, preferences: Arc<P>) -> Self {
        Self { users, preferences }
    }
}

macro_rules! merge_and_save {
    ($self:ident, $user_id:ident, $patch:ident, $fetch:ident, $save:ident, $record:ty, $variant:ident) => {{
        let mut record = $self
            .preferences
            .$fetch($user_id)
            .await
            .map_err(map_preferences_error)?
            .unwrap_or_else(<$record>::defaults);
        $patch.apply(&mut record);
        let stored = $self
            .preferences
            .$save($user_id, &record)
            .await
            .map_err(map_preferences_error)?;
        PreferenceRecord::$variant(stored)
    }};
}

macro_rules! fetch_or_defaults {
    ($self:ident, $user_id:ident, $fetch:ident, $record:ty) => {
        $self
            .preferences
            .$fetch($user_id)
            .await
            .map_err(map_preferences_error)?
            .unwrap_or_else(<$record>::defaults)
    };
}

impl<U, P> PreferenceCenterService<U, P>
where
    U: UserRepository,
    P: PreferencesRepository,
{
    async fn authorize(
        &self,
        requester: &Principal,
        target_id: &UserId,
        access: PreferenceAccess,
    ) -> Result<(), Error> {
        access::authorize_preferences(requester, target_id, access)?;
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

    async fn fetch_record(
        &self,
        user_id: &UserId,
        category: PreferenceCategory,
    ) -> Result<PreferenceRecord, Error> {
        use crate::domain::preferences::*;
        Ok(match category {
            PreferenceCategory::Notification => PreferenceRecord::Notification(
                fetch_or_defaults!(self, user_id, fetch_notification, NotificationPreferences),
            ),
            PreferenceCategory::Display => PreferenceRecord::Display(fetch_or_defaults!(
                self,
                user_id,
                fetch_display,
                DisplayPreferences
            )),
            PreferenceCategory::Privacy => PreferenceRecord::Privacy(fetch_or_defaults!(
                self,
                user_id,
                fetch_privacy,
                PrivacyPreferences
            )),
            PreferenceCategory::Accessibility => PreferenceRecord::Accessibility(
                fetch_or_defaults!(self, user_id, fetch_accessibility, AccessibilityPreferences),
            ),
            PreferenceCategory::Language => PreferenceRecord::Language(fetch_or_defaults!(
                self,
                user_id,
                fetch_language,
                LanguagePreferences
            )),
            PreferenceCategory::Security => PreferenceRecord::Security(fetch_or_defaults!(
                self,
                user_id,
                fetch_security,
                SecurityPreferences
            )),
            PreferenceCategory::Social => PreferenceRecord::Social(fetch_or_defaults!(
                self,
                user_id,
                fetch_social,
                SocialPreferences
            )),
            PreferenceCategory::Sound => PreferenceRecord::Sound(fetch_or_defaults!(
                self,
                user_id,
                fetch_sound,
                SoundPreferences
            )),
            PreferenceCategory::Theme => PreferenceRecord::Theme(fetch_or_defaults!(
                self,
                user_id,
                fetch_theme,
                ThemePreferences
            )),
        })
    }

    async fn apply_patch(
        &self,
        user_id: &UserId,
        patch: &PreferencePatch,
    ) -> Result<PreferenceRecord, Error> {
        use crate::domain::preferences::*;
        Ok(match patch {
            PreferencePatch::Notification(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_notification,
                save_notification,
                NotificationPreferences,
                Notification
            ),
            PreferencePatch::Display(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_display,
                save_display,
                DisplayPreferences,
                Display
            ),
            PreferencePatch::Privacy(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_privacy,
                save_privacy,
                PrivacyPreferences,
                Privacy
            ),
            PreferencePatch::Accessibility(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_accessibility,
                save_accessibility,
                AccessibilityPreferences,
                Accessibility
            ),
            PreferencePatch::Language(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_language,
                save_language,
                LanguagePreferences,
                Language
            ),
            PreferencePatch::Security(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_security,
                save_security,
                SecurityPreferences,
                Security
            ),
            PreferencePatch::Social(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_social,
                save_social,
                SocialPreferences,
                Social
            ),
            PreferencePatch::Sound(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_sound,
                save_sound,
                SoundPreferences,
                Sound
            ),
            PreferencePatch::Theme(patch) => merge_and_save!(
                self,
                user_id,
                patch,
                fetch_theme,
                save_theme,
                ThemePreferences,
                Theme
            ),
        })
    }

    fn place(set: &mut PreferencesSet, record: PreferenceRecord) {
        match record {
            PreferenceRecord::Notification(r) => set.notification = Some(r),
            PreferenceRecord::Display(r) => set.display = Some(r),
            PreferenceRecord::Privacy(r) => set.privacy = Some(r),
            PreferenceRecord::Accessibility(r) => set.accessibility = Some(r),
            PreferenceRecord::Language(r) => set.language = Some(r),
            PreferenceRecord::Security(r) => set.security = Some(r),
            PreferenceRecord::Social(r) => set.social = Some(r),
            PreferenceRecord::Sound(r) => set.sound = Some(r),
            PreferenceRecord::Theme(r) => set.theme = Some(r),
        }
    }
}

#[async_trait]
impl<U, P> PreferenceCenter for PreferenceCenterService<U, P>
where
    U: UserRepository,
    P: PreferencesRepository,
{
    async fn get_all(
        &self,
        requester: &Principal,
        target_id: &UserId,
        categories: Option<Vec<PreferenceCategory>>,
    ) -> Result<PreferencesSet, Error> {
        self.authorize(requester, target_id, PreferenceAccess::Read)
            .await?;

        let wanted = categories.unwrap_or_else(|| PreferenceCategory::ALL.to_vec());
        let mut set = PreferencesSet::default();
        for category in PreferenceCategory::ALL {
            if !wanted.contains(&category) {
                continue;
            }
            let record = self.fetch_record(target_id, category).await?;
            Self::place(&mut set, record);
        }
        Ok(set)
    }

    async fn get_category(
        &self,
        requester: &Principal,
        target_id: &UserId,
        category: PreferenceCategory,
    ) -> Result<PreferenceRecord, Error> {
        self.authorize(requester, target_id, PreferenceAccess::Read)
            .await?;
        self.fetch_record(target_id, category).await
    }

    async fn update_category(
        &self,
        requester: &Principal,
        target_id: &UserId,
        patch: PreferencePatch,
    ) -> Result<PreferenceRecord, Error> {
        self.authorize(requester, target_id, PreferenceAccess::Write)
            .await?;
        self.apply_patch(target_id, &patch).await
    }

    async fn update_many(
        &self,
        requester: &Principal,
        target_id: &UserId,
        patches: PreferencesPatchSet,
    ) -> Result<PreferencesSet, Error> {
        self.authorize(requester, target_id, PreferenceAccess::Write)
            .await?;

        let patches = patches.into_patches();
        if patches.is_empty() {
            return Err(Error::validation("no preference categories supplied"));
        }
        let mut set = PreferencesSet::default();
        for patch in &patches {
            let record = self.apply_patch(target_id, patch).await?;
            Self::place(&mut set, record);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPreferencesRepository, MockUserRepository};
    use crate::domain::preferences::{
        ColorScheme, DisplayPreferences, DisplayPreferencesPatch, FontSize, LayoutDensity,
        ThemePreferencesPatch,
    };
    use crate::domain::{ErrorCode, Scope};

    fn owner(user_id: &UserId) -> Principal {
        Principal::user(user_id.clone(), Vec::new())
    }

    fn existing_users() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_exists().returning(|_| Ok(true));
        users
    }

    fn service(
        users: MockUserRepository,
        preferences: MockPreferencesRepository,
    ) -> PreferenceCenterService<MockUserRepository, MockPreferencesRepository> {
        PreferenceCenterService::new(Arc::new(users), Arc::new(preferences))
    }

    #[tokio::test]
    async fn missing_row_reads_as_canonical_defaults() {
        let user_id = UserId::random();
        let mut preferences = MockPreferencesRepository::new();
        preferences.expect_fetch_display().returning(|_| Ok(None));
        let svc = service(existing_users(), preferences);

        let record = svc
            .get_category(&owner(&user_id), &user_id, PreferenceCategory::Display)
            .await
            .expect("defaults");
        let PreferenceRecord::Display(display) = record else {
            panic!("expected display record");
        };
        assert_eq!(display.font_size, FontSize::Medium);
        assert_eq!(display.color_scheme, ColorScheme::Light);
    }

    #[tokio::test]
    async fn patch_over_missing_row_fills_remaining_defaults() {
        let user_id = UserId::random();
        let mut preferences = MockPreferencesRepository::new();
        preferences.expect_fetch_display().returning(|_| Ok(None));
        preferences
            .expect_save_display()
            .withf(|_, record| {
                record.font_size == FontSize::Large
                    && record.color_scheme == ColorScheme::Light
                    && record.layout_density == LayoutDensity::Comfortable
                    && record.show_images
                    && !record.compact_mode
            })
            .returning(|_, record| Ok(record.clone()));
        let svc = service(existing_users(), preferences);

        let patch = PreferencePatch::Display(DisplayPreferencesPatch {
            font_size: Some(FontSize::Large),
            ..DisplayPreferencesPatch::default()
        });
        let record = svc
            .update_category(&owner(&user_id), &user_id, patch)
            .await
            .expect("merged update");
        let PreferenceRecord::Display(display) = record else {
            panic!("expected display record");
        };
        assert_eq!(display.font_size, FontSize::Large);
        assert!(display.show_images);
    }

    #[tokio::test]
    async fn patch_preserves_unmentioned_stored_fields() {
        let user_id = UserId::random();
        let stored = DisplayPreferences {
            font_size: FontSize::Small,
            color_scheme: ColorScheme::Dark,
            ..DisplayPreferences::defaults()
        };
        let mut preferences = MockPreferencesRepository::new();
        let fetched = stored.clone();
        preferences
            .expect_fetch_display()
            .returning(move |_| Ok(Some(fetched.clone())));
        preferences
            .expect_save_display()
            .withf(|_, record| {
                record.font_size == FontSize::Large && record.color_scheme == ColorScheme::Dark
            })
            .returning(|_, record| Ok(record.clone()));
        let svc = service(existing_users(), preferences);

        let patch = PreferencePatch::Display(DisplayPreferencesPatch {
            font_size: Some(FontSize::Large),
            ..DisplayPreferencesPatch::default()
        });
        svc.update_category(&owner(&user_id), &user_id, patch)
            .await
            .expect("merged update");
    }

    #[tokio::test]
    async fn cross_user_write_needs_write_scope() {
        let target = UserId::random();
        let reader = Principal::service("recipe-service", vec![Scope::UserRead]);
        let svc = service(MockUserRepository::new(), MockPreferencesRepository::new());

        let patch = PreferencePatch::Theme(ThemePreferencesPatch {
            dark_mode: Some(true),
            ..ThemePreferencesPatch::default()
        });
        let err = svc
            .update_category(&reader, &target, patch)
            .await
            .expect_err("read scope cannot write");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn absent_user_distinguished_from_absent_row() {
        let target = UserId::random();
        let mut users = MockUserRepository::new();
        users.expect_exists().returning(|_| Ok(false));
        let svc = service(users, MockPreferencesRepository::new());

        let err = svc
            .get_category(&owner(&target), &target, PreferenceCategory::Sound)
            .await
            .expect_err("absent user");
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn get_all_honours_category_filter() {
        let user_id = UserId::random();
        let mut preferences = MockPreferencesRepository::new();
        preferences.expect_fetch_sound().returning(|_| Ok(None));
        preferences.expect_fetch_theme().returning(|_| Ok(None));
        let svc = service(existing_users(), preferences);

        let set = svc
            .get_all(
                &owner(&user_id),
                &user_id,
                Some(vec![PreferenceCategory::Sound, PreferenceCategory::Theme]),
            )
            .await
            .expect("filtered set");
        assert!(set.sound.is_some());
        assert!(set.theme.is_some());
        assert!(set.notification.is_none());
        assert!(set.display.is_none());
    }

    #[tokio::test]
    async fn empty_multi_category_update_is_rejected() {
        let user_id = UserId::random();
        let svc = service(existing_users(), MockPreferencesRepository::new());

        let err = svc
            .update_many(&owner(&user_id), &user_id, PreferencesPatchSet::default())
            .await
            .expect_err("empty patch set");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}
