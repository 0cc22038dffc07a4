//! PostgreSQL-backed `PreferencesRepository` implementation using Diesel.
//!
//! Nine single-row tables keyed by `user_id`. Saves are full-record upserts
//! (insert on conflict update), so the service's read-merge-write sequence
//! always lands the merged record whole.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PreferencesRepository, PreferencesRepositoryError};
use crate::domain::preferences::{
    AccessibilityPreferences, DisplayPreferences, LanguagePreferences, NotificationPreferences,
    PrivacyPreferences, SecurityPreferences, SocialPreferences, SoundPreferences, ThemePreferences,
};
use crate::domain::UserId;

use super::diesel_error::{classify_diesel, classify_pool, StoreError};
use super::models::{
    AccessibilityPreferencesRow, DisplayPreferencesRow, LanguagePreferencesRow,
    NotificationPreferencesRow, PrivacyPreferencesRow, SecurityPreferencesRow,
    SocialPreferencesRow, SoundPreferencesRow, ThemePreferencesRow,
};
use super::pool::DbPool;
use super::schema::{
    user_accessibility_preferences, user_display_preferences, user_language_preferences,
    user_notification_preferences, user_privacy_preferences, user_security_preferences,
    user_social_preferences, user_sound_preferences, user_theme_preferences,
};

/// Diesel-backed implementation of the `PreferencesRepository` port.
#[derive(Clone)]
pub struct DieselPreferencesRepository {
    pool: DbPool,
}

impl DieselPreferencesRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_store_error(error: StoreError) -> PreferencesRepositoryError {
    match error {
        StoreError::Connection(message) => PreferencesRepositoryError::connection(message),
        StoreError::Query(message) | StoreError::UniqueViolation(message) => {
            PreferencesRepositoryError::query(message)
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> PreferencesRepositoryError {
    map_store_error(classify_pool(error))
}

fn map_diesel(error: diesel::result::Error) -> PreferencesRepositoryError {
    map_store_error(classify_diesel(error))
}

/// Expands to the whole `PreferencesRepository` impl, one fetch/upsert pair
/// per category table. The macro emits the `#[async_trait]` impl block itself
/// so the attribute macro sees fully expanded methods.
macro_rules! preference_methods {
    ($(($fetch:ident, $save:ident, $table:ident, $row:ident, $record:ty)),* $(,)?) => {
        #[async_trait]
        impl PreferencesRepository for DieselPreferencesRepository {
            $(
                async fn $fetch(
                    &self,
                    user_id: &UserId,
                ) -> Result<Option<$record>, PreferencesRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool)?;

                    let row: Option<$row> = $table::table
                        .filter($table::user_id.eq(user_id.as_uuid()))
                        .select($row::as_select())
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(map_diesel)?;
                    Ok(row.map(<$record>::from))
                }

                async fn $save(
                    &self,
                    user_id: &UserId,
                    record: &$record,
                ) -> Result<$record, PreferencesRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool)?;

                    let row = $row::from_record(user_id, record);
                    let stored: $row = diesel::insert_into($table::table)
                        .values(&row)
                        .on_conflict($table::user_id)
                        .do_update()
                        .set(&row)
                        .returning($row::as_returning())
                        .get_result(&mut conn)
                        .await
                        .map_err(map_diesel)?;
                    Ok(stored.into())
                }
            )*
        }
    };
}

preference_methods!(
    (
        fetch_notification,
        save_notification,
        user_notification_preferences,
        NotificationPreferencesRow,
        NotificationPreferences
    ),
    (
        fetch_display,
        save_display,
        user_display_preferences,
        DisplayPreferencesRow,
        DisplayPreferences
    ),
    (
        fetch_privacy,
        save_privacy,
        user_privacy_preferences,
        PrivacyPreferencesRow,
        PrivacyPreferences
    ),
    (
        fetch_accessibility,
        save_accessibility,
        user_accessibility_preferences,
        AccessibilityPreferencesRow,
        AccessibilityPreferences
    ),
    (
        fetch_language,
        save_language,
        user_language_preferences,
        LanguagePreferencesRow,
        LanguagePreferences
    ),
    (
        fetch_security,
        save_security,
        user_security_preferences,
        SecurityPreferencesRow,
        SecurityPreferences
    ),
    (
        fetch_social,
        save_social,
        user_social_preferences,
        SocialPreferencesRow,
        SocialPreferences
    ),
    (
        fetch_sound,
        save_sound,
        user_sound_preferences,
        SoundPreferencesRow,
        SoundPreferences
    ),
    (
        fetch_theme,
        save_theme,
        user_theme_preferences,
        ThemePreferencesRow,
        ThemePreferences
    ),
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn store_errors_map_onto_port_variants() {
        assert!(matches!(
            map_store_error(StoreError::Connection("down".to_owned())),
            PreferencesRepositoryError::Connection { .. }
        ));
        assert!(matches!(
            map_store_error(StoreError::UniqueViolation("pk".to_owned())),
            PreferencesRepositoryError::Query { .. }
        ));
    }
}
