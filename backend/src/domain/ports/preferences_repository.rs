//! Port for per-category preference storage.

use async_trait::async_trait;

use crate::domain::preferences::{
    AccessibilityPreferences, DisplayPreferences, LanguagePreferences, NotificationPreferences,
    PrivacyPreferences, SecurityPreferences, SocialPreferences, SoundPreferences, ThemePreferences,
};
use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by preferences repository adapters.
    pub enum PreferencesRepositoryError {
        /// Connection to the store could not be established.
        Connection { message: String } =>
            "preferences repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "preferences repository query failed: {message}",
    }
}

/// Port for the nine per-category preference tables.
///
/// Each category has one fetch and one save. Fetch returns `None` when no
/// row exists; the service substitutes the canonical defaults. Save is an
/// upsert keyed by `user_id` and returns the stored row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    async fn fetch_notification(
        &self,
        user_id: &UserId,
    ) -> Result<Option<NotificationPreferences>, PreferencesRepositoryError>;

    async fn save_notification(
        &self,
        user_id: &UserId,
        record: &NotificationPreferences,
    ) -> Result<NotificationPreferences, PreferencesRepositoryError>;

    async fn fetch_display(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DisplayPreferences>, PreferencesRepositoryError>;

    async fn save_display(
        &self,
        user_id: &UserId,
        record: &DisplayPreferences,
    ) -> Result<DisplayPreferences, PreferencesRepositoryError>;

    async fn fetch_privacy(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PrivacyPreferences>, PreferencesRepositoryError>;

    async fn save_privacy(
        &self,
        user_id: &UserId,
        record: &PrivacyPreferences,
    ) -> Result<PrivacyPreferences, PreferencesRepositoryError>;

    async fn fetch_accessibility(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilityPreferences>, PreferencesRepositoryError>;

    async fn save_accessibility(
        &self,
        user_id: &UserId,
        record: &AccessibilityPreferences,
    ) -> Result<AccessibilityPreferences, PreferencesRepositoryError>;

    async fn fetch_language(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LanguagePreferences>, PreferencesRepositoryError>;

    async fn save_language(
        &self,
        user_id: &UserId,
        record: &LanguagePreferences,
    ) -> Result<LanguagePreferences, PreferencesRepositoryError>;

    async fn fetch_security(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SecurityPreferences>, PreferencesRepositoryError>;

    async fn save_security(
        &self,
        user_id: &UserId,
        record: &SecurityPreferences,
    ) -> Result<SecurityPreferences, PreferencesRepositoryError>;

    async fn fetch_social(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SocialPreferences>, PreferencesRepositoryError>;

    async fn save_social(
        &self,
        user_id: &UserId,
        record: &SocialPreferences,
    ) -> Result<SocialPreferences, PreferencesRepositoryError>;

    async fn fetch_sound(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SoundPreferences>, PreferencesRepositoryError>;

    async fn save_sound(
        &self,
        user_id: &UserId,
        record: &SoundPreferences,
    ) -> Result<SoundPreferences, PreferencesRepositoryError>;

    async fn fetch_theme(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ThemePreferences>, PreferencesRepositoryError>;

    async fn save_theme(
        &self,
        user_id: &UserId,
        record: &ThemePreferences,
    ) -> Result<ThemePreferences, PreferencesRepositoryError>;
}

/// Fixture implementation that stores nothing and echoes saves back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferencesRepository;

/// Expands to the whole fixture impl; the macro emits the `#[async_trait]`
/// impl block itself so the attribute macro sees fully expanded methods.
macro_rules! fixture_category {
    ($(($fetch:ident, $save:ident, $record:ty)),* $(,)?) => {
        #[async_trait]
        impl PreferencesRepository for FixturePreferencesRepository {
            $(
                async fn $fetch(
                    &self,
                    _user_id: &UserId,
                ) -> Result<Option<$record>, PreferencesRepositoryError> {
                    Ok(None)
                }

                async fn $save(
                    &self,
                    _user_id: &UserId,
                    record: &$record,
                ) -> Result<$record, PreferencesRepositoryError> {
                    Ok(record.clone())
                }
            )*
        }
    };
}

fixture_category!(
    (fetch_notification, save_notification, NotificationPreferences),
    (fetch_display, save_display, DisplayPreferences),
    (fetch_privacy, save_privacy, PrivacyPreferences),
    (fetch_accessibility, save_accessibility, AccessibilityPreferences),
    (fetch_language, save_language, LanguagePreferences),
    (fetch_security, save_security, SecurityPreferences),
    (fetch_social, save_social, SocialPreferences),
    (fetch_sound, save_sound, SoundPreferences),
    (fetch_theme, save_theme, ThemePreferences),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_fetch_returns_none_and_save_echoes() {
        let repo = FixturePreferencesRepository;
        let user_id = UserId::random();
        assert!(repo
            .fetch_display(&user_id)
            .await
            .expect("fixture fetch")
            .is_none());

        let record = DisplayPreferences::defaults();
        let stored = repo
            .save_display(&user_id, &record)
            .await
            .expect("fixture save");
        assert_eq!(stored, record);
    }
}
