//! Row types bridging Diesel and the domain.
//!
//! Row structs are persistence-internal; repositories convert them to and
//! from domain values at this boundary and never leak them upward. Enum
//! columns are stored as lowercase strings; unrecognised stored values fall
//! back to the category default with a warning rather than failing the read.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::preferences::{
    AccessibilityPreferences, ColorScheme, DisplayPreferences, FontSize, LanguagePreferences,
    LayoutDensity, NotificationPreferences, PrivacyPreferences, SecurityPreferences,
    SocialPreferences, SoundPreferences, ThemePreferences, Visibility, Volume,
};
use crate::domain::{Notification, User, UserId, UserStats};

use super::schema::{
    notifications, user_accessibility_preferences, user_display_preferences,
    user_language_preferences, user_notification_preferences, user_privacy_preferences,
    user_security_preferences, user_social_preferences, user_sound_preferences,
    user_theme_preferences, users,
};

/// Parse a stored enum string, falling back to `fallback` on junk values.
fn parse_enum<T>(value: &str, fallback: T, column: &'static str, user_id: Uuid) -> T
where
    T: std::str::FromStr + Copy,
{
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(%user_id, column, value, "unrecognised stored value, using default");
        fallback
    })
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            bio: row.bio,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserProfileChangeset {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate counts computed by a single multi-subquery statement.
#[derive(Debug, QueryableByName)]
pub struct UserStatsRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_users: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub active_users: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub inactive_users: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub new_users_today: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub new_users_this_week: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub new_users_this_month: i64,
}

impl From<UserStatsRow> for UserStats {
    fn from(row: UserStatsRow) -> Self {
        Self {
            total_users: row.total_users,
            active_users: row.active_users,
            inactive_users: row.inactive_users,
            new_users_today: row.new_users_today,
            new_users_this_week: row.new_users_this_week,
            new_users_this_month: row.new_users_this_month,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            title: row.title,
            message: row.message,
            kind: row.kind,
            is_read: row.is_read,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_notification_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationPreferencesRow {
    pub user_id: Uuid,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    pub marketing_emails: bool,
    pub security_alerts: bool,
    pub activity_summaries: bool,
    pub recipe_recommendations: bool,
    pub social_interactions: bool,
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &NotificationPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            email_notifications: record.email_notifications,
            push_notifications: record.push_notifications,
            sms_notifications: record.sms_notifications,
            marketing_emails: record.marketing_emails,
            security_alerts: record.security_alerts,
            activity_summaries: record.activity_summaries,
            recipe_recommendations: record.recipe_recommendations,
            social_interactions: record.social_interactions,
            updated_at: record.updated_at,
        }
    }
}

impl From<NotificationPreferencesRow> for NotificationPreferences {
    fn from(row: NotificationPreferencesRow) -> Self {
        Self {
            email_notifications: row.email_notifications,
            push_notifications: row.push_notifications,
            sms_notifications: row.sms_notifications,
            marketing_emails: row.marketing_emails,
            security_alerts: row.security_alerts,
            activity_summaries: row.activity_summaries,
            recipe_recommendations: row.recipe_recommendations,
            social_interactions: row.social_interactions,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_display_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DisplayPreferencesRow {
    pub user_id: Uuid,
    pub font_size: String,
    pub color_scheme: String,
    pub layout_density: String,
    pub show_images: bool,
    pub compact_mode: bool,
    pub updated_at: DateTime<Utc>,
}

impl DisplayPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &DisplayPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            font_size: record.font_size.as_str().to_owned(),
            color_scheme: record.color_scheme.as_str().to_owned(),
            layout_density: record.layout_density.as_str().to_owned(),
            show_images: record.show_images,
            compact_mode: record.compact_mode,
            updated_at: record.updated_at,
        }
    }
}

impl From<DisplayPreferencesRow> for DisplayPreferences {
    fn from(row: DisplayPreferencesRow) -> Self {
        Self {
            font_size: parse_enum(&row.font_size, FontSize::Medium, "font_size", row.user_id),
            color_scheme: parse_enum(
                &row.color_scheme,
                ColorScheme::Light,
                "color_scheme",
                row.user_id,
            ),
            layout_density: parse_enum(
                &row.layout_density,
                LayoutDensity::Comfortable,
                "layout_density",
                row.user_id,
            ),
            show_images: row.show_images,
            compact_mode: row.compact_mode,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_privacy_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrivacyPreferencesRow {
    pub user_id: Uuid,
    pub profile_visibility: String,
    pub recipe_visibility: String,
    pub activity_visibility: String,
    pub contact_info_visibility: String,
    pub data_sharing: bool,
    pub analytics_tracking: bool,
    pub updated_at: DateTime<Utc>,
}

impl PrivacyPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &PrivacyPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            profile_visibility: record.profile_visibility.as_str().to_owned(),
            recipe_visibility: record.recipe_visibility.as_str().to_owned(),
            activity_visibility: record.activity_visibility.as_str().to_owned(),
            contact_info_visibility: record.contact_info_visibility.as_str().to_owned(),
            data_sharing: record.data_sharing,
            analytics_tracking: record.analytics_tracking,
            updated_at: record.updated_at,
        }
    }
}

impl From<PrivacyPreferencesRow> for PrivacyPreferences {
    fn from(row: PrivacyPreferencesRow) -> Self {
        Self {
            profile_visibility: parse_enum(
                &row.profile_visibility,
                Visibility::Public,
                "profile_visibility",
                row.user_id,
            ),
            recipe_visibility: parse_enum(
                &row.recipe_visibility,
                Visibility::Public,
                "recipe_visibility",
                row.user_id,
            ),
            activity_visibility: parse_enum(
                &row.activity_visibility,
                Visibility::Public,
                "activity_visibility",
                row.user_id,
            ),
            contact_info_visibility: parse_enum(
                &row.contact_info_visibility,
                Visibility::Private,
                "contact_info_visibility",
                row.user_id,
            ),
            data_sharing: row.data_sharing,
            analytics_tracking: row.analytics_tracking,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_accessibility_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessibilityPreferencesRow {
    pub user_id: Uuid,
    pub screen_reader: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub large_text: bool,
    pub keyboard_navigation: bool,
    pub updated_at: DateTime<Utc>,
}

impl AccessibilityPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &AccessibilityPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            screen_reader: record.screen_reader,
            high_contrast: record.high_contrast,
            reduced_motion: record.reduced_motion,
            large_text: record.large_text,
            keyboard_navigation: record.keyboard_navigation,
            updated_at: record.updated_at,
        }
    }
}

impl From<AccessibilityPreferencesRow> for AccessibilityPreferences {
    fn from(row: AccessibilityPreferencesRow) -> Self {
        Self {
            screen_reader: row.screen_reader,
            high_contrast: row.high_contrast,
            reduced_motion: row.reduced_motion,
            large_text: row.large_text,
            keyboard_navigation: row.keyboard_navigation,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_language_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct LanguagePreferencesRow {
    pub user_id: Uuid,
    pub primary_language: String,
    pub secondary_language: Option<String>,
    pub translation_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl LanguagePreferencesRow {
    pub fn from_record(user_id: &UserId, record: &LanguagePreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            primary_language: record.primary_language.clone(),
            secondary_language: record.secondary_language.clone(),
            translation_enabled: record.translation_enabled,
            updated_at: record.updated_at,
        }
    }
}

impl From<LanguagePreferencesRow> for LanguagePreferences {
    fn from(row: LanguagePreferencesRow) -> Self {
        Self {
            primary_language: row.primary_language,
            secondary_language: row.secondary_language,
            translation_enabled: row.translation_enabled,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_security_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SecurityPreferencesRow {
    pub user_id: Uuid,
    pub two_factor_enabled: bool,
    pub login_notifications: bool,
    pub session_timeout: bool,
    pub password_requirements: bool,
    pub updated_at: DateTime<Utc>,
}

impl SecurityPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &SecurityPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            two_factor_enabled: record.two_factor_enabled,
            login_notifications: record.login_notifications,
            session_timeout: record.session_timeout,
            password_requirements: record.password_requirements,
            updated_at: record.updated_at,
        }
    }
}

impl From<SecurityPreferencesRow> for SecurityPreferences {
    fn from(row: SecurityPreferencesRow) -> Self {
        Self {
            two_factor_enabled: row.two_factor_enabled,
            login_notifications: row.login_notifications,
            session_timeout: row.session_timeout,
            password_requirements: row.password_requirements,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_social_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialPreferencesRow {
    pub user_id: Uuid,
    pub friend_requests: bool,
    pub message_notifications: bool,
    pub group_invites: bool,
    pub share_activity: bool,
    pub updated_at: DateTime<Utc>,
}

impl SocialPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &SocialPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            friend_requests: record.friend_requests,
            message_notifications: record.message_notifications,
            group_invites: record.group_invites,
            share_activity: record.share_activity,
            updated_at: record.updated_at,
        }
    }
}

impl From<SocialPreferencesRow> for SocialPreferences {
    fn from(row: SocialPreferencesRow) -> Self {
        Self {
            friend_requests: row.friend_requests,
            message_notifications: row.message_notifications,
            group_invites: row.group_invites,
            share_activity: row.share_activity,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_sound_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SoundPreferencesRow {
    pub user_id: Uuid,
    pub notification_sounds: bool,
    pub system_sounds: bool,
    pub volume: String,
    pub mute: bool,
    pub updated_at: DateTime<Utc>,
}

impl SoundPreferencesRow {
    pub fn from_record(user_id: &UserId, record: &SoundPreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            notification_sounds: record.notification_sounds,
            system_sounds: record.system_sounds,
            volume: record.volume.as_str().to_owned(),
            mute: record.mute,
            updated_at: record.updated_at,
        }
    }
}

impl From<SoundPreferencesRow> for SoundPreferences {
    fn from(row: SoundPreferencesRow) -> Self {
        Self {
            notification_sounds: row.notification_sounds,
            system_sounds: row.system_sounds,
            volume: parse_enum(&row.volume, Volume::Medium, "volume", row.user_id),
            mute: row.mute,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_theme_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ThemePreferencesRow {
    pub user_id: Uuid,
    pub dark_mode: bool,
    pub light_mode: bool,
    pub auto_mode: bool,
    pub custom_theme: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ThemePreferencesRow {
    pub fn from_record(user_id: &UserId, record: &ThemePreferences) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            dark_mode: record.dark_mode,
            light_mode: record.light_mode,
            auto_mode: record.auto_mode,
            custom_theme: record.custom_theme.clone(),
            updated_at: record.updated_at,
        }
    }
}

impl From<ThemePreferencesRow> for ThemePreferences {
    fn from(row: ThemePreferencesRow) -> Self {
        Self {
            dark_mode: row.dark_mode,
            light_mode: row.light_mode,
            auto_mode: row.auto_mode,
            custom_theme: row.custom_theme,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn display_row_round_trips_enum_strings() {
        let user_id = UserId::random();
        let record = DisplayPreferences {
            font_size: FontSize::Large,
            color_scheme: ColorScheme::Dark,
            layout_density: LayoutDensity::Spacious,
            ..DisplayPreferences::defaults()
        };
        let row = DisplayPreferencesRow::from_record(&user_id, &record);
        assert_eq!(row.font_size, "large");
        assert_eq!(row.color_scheme, "dark");
        assert_eq!(row.layout_density, "spacious");

        let back: DisplayPreferences = row.into();
        assert_eq!(back, record);
    }

    #[rstest]
    fn junk_stored_enum_falls_back_to_default() {
        let row = DisplayPreferencesRow {
            user_id: Uuid::new_v4(),
            font_size: "gigantic".to_owned(),
            color_scheme: "light".to_owned(),
            layout_density: "comfortable".to_owned(),
            show_images: true,
            compact_mode: false,
            updated_at: Utc::now(),
        };
        let record: DisplayPreferences = row.into();
        assert_eq!(record.font_size, FontSize::Medium);
    }

    #[rstest]
    fn privacy_row_stores_snake_case_visibility() {
        let user_id = UserId::random();
        let record = PrivacyPreferences {
            profile_visibility: Visibility::FollowersOnly,
            ..PrivacyPreferences::defaults()
        };
        let row = PrivacyPreferencesRow::from_record(&user_id, &record);
        assert_eq!(row.profile_visibility, "followers_only");
        assert_eq!(row.contact_info_visibility, "private");
    }
}
