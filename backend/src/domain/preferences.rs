//! Preference categories, records, and partial-update patches.
//!
//! A user has zero or one stored record per category; "zero" is equivalent to
//! the canonical defaults defined here. Patches carry `Option` fields so that
//! absent fields preserve the stored value (or the default when no row
//! exists yet).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{Error, ErrorCode};

/// Error returned when parsing an unknown enumeration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {input}")]
pub struct ParsePreferenceError {
    pub kind: &'static str,
    pub input: String,
}

macro_rules! preference_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $db:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Database string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $db,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParsePreferenceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($db => Ok(Self::$variant),)*
                    other => Err(ParsePreferenceError {
                        kind: $kind,
                        input: other.to_owned(),
                    }),
                }
            }
        }
    };
}

preference_enum! {
    /// Who may read a resource.
    pub enum Visibility : "visibility" {
        Public = "public",
        FollowersOnly = "followers_only",
        Private = "private",
    }
}

preference_enum! {
    /// Display font size.
    pub enum FontSize : "font size" {
        Small = "small",
        Medium = "medium",
        Large = "large",
    }
}

preference_enum! {
    /// Display colour scheme.
    pub enum ColorScheme : "color scheme" {
        Light = "light",
        Dark = "dark",
    }
}

preference_enum! {
    /// Layout density.
    pub enum LayoutDensity : "layout density" {
        Compact = "compact",
        Comfortable = "comfortable",
        Spacious = "spacious",
    }
}

preference_enum! {
    /// Sound volume level.
    pub enum Volume : "volume" {
        Low = "low",
        Medium = "medium",
        High = "high",
    }
}

/// One of the nine independent preference categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceCategory {
    Notification,
    Display,
    Privacy,
    Accessibility,
    Language,
    Security,
    Social,
    Sound,
    Theme,
}

impl PreferenceCategory {
    /// All categories in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Notification,
        Self::Display,
        Self::Privacy,
        Self::Accessibility,
        Self::Language,
        Self::Security,
        Self::Social,
        Self::Sound,
        Self::Theme,
    ];

    /// Path-segment representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Display => "display",
            Self::Privacy => "privacy",
            Self::Accessibility => "accessibility",
            Self::Language => "language",
            Self::Security => "security",
            Self::Social => "social",
            Self::Sound => "sound",
            Self::Theme => "theme",
        }
    }

    /// Parse a path segment, producing `invalid-category` on failure.
    pub fn parse(segment: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == segment)
            .ok_or_else(|| {
                Error::new(
                    ErrorCode::InvalidCategory,
                    format!("unknown preference category: {segment}"),
                )
            })
    }
}

impl std::fmt::Display for PreferenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! preference_record {
    (
        $(#[$meta:meta])*
        pub struct $record:ident / $patch:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct $record {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
            pub updated_at: DateTime<Utc>,
        }

        impl $record {
            /// The canonical defaults for this category.
            pub fn defaults() -> Self {
                Self {
                    $($field: $default,)*
                    updated_at: Utc::now(),
                }
            }
        }

        /// Partial update; absent fields preserve the stored value.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "camelCase", deny_unknown_fields, default)]
        pub struct $patch {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $patch {
            /// Overlay the supplied fields onto `record`, bumping updated_at.
            pub fn apply(&self, record: &mut $record) {
                $(
                    if let Some(value) = self.$field.clone() {
                        record.$field = value;
                    }
                )*
                record.updated_at = Utc::now();
            }

            /// Whether the patch supplies no fields at all.
            pub fn is_empty(&self) -> bool {
                $(self.$field.is_none() &&)* true
            }
        }
    };
}

preference_record! {
    /// Notification channel and digest toggles.
    pub struct NotificationPreferences / NotificationPreferencesPatch {
        email_notifications: bool = true,
        push_notifications: bool = true,
        sms_notifications: bool = false,
        marketing_emails: bool = false,
        security_alerts: bool = true,
        activity_summaries: bool = true,
        recipe_recommendations: bool = true,
        social_interactions: bool = true,
    }
}

preference_record! {
    /// Rendering and layout options.
    pub struct DisplayPreferences / DisplayPreferencesPatch {
        font_size: FontSize = FontSize::Medium,
        color_scheme: ColorScheme = ColorScheme::Light,
        layout_density: LayoutDensity = LayoutDensity::Comfortable,
        show_images: bool = true,
        compact_mode: bool = false,
    }
}

preference_record! {
    /// Visibility and data-usage controls. `contact_info_visibility` gates
    /// whether email and full name appear on the public profile.
    pub struct PrivacyPreferences / PrivacyPreferencesPatch {
        profile_visibility: Visibility = Visibility::Public,
        recipe_visibility: Visibility = Visibility::Public,
        activity_visibility: Visibility = Visibility::Public,
        contact_info_visibility: Visibility = Visibility::Private,
        data_sharing: bool = false,
        analytics_tracking: bool = false,
    }
}

preference_record! {
    /// Assistive-technology toggles.
    pub struct AccessibilityPreferences / AccessibilityPreferencesPatch {
        screen_reader: bool = false,
        high_contrast: bool = false,
        reduced_motion: bool = false,
        large_text: bool = false,
        keyboard_navigation: bool = false,
    }
}

preference_record! {
    /// Language selection and translation.
    pub struct LanguagePreferences / LanguagePreferencesPatch {
        primary_language: String = "EN".to_owned(),
        secondary_language: Option<String> = None,
        translation_enabled: bool = false,
    }
}

preference_record! {
    /// Account security toggles.
    pub struct SecurityPreferences / SecurityPreferencesPatch {
        two_factor_enabled: bool = false,
        login_notifications: bool = true,
        session_timeout: bool = false,
        password_requirements: bool = true,
    }
}

preference_record! {
    /// Social interaction toggles. `friend_requests` doubles as the
    /// allow-follows switch consulted by the follow service.
    pub struct SocialPreferences / SocialPreferencesPatch {
        friend_requests: bool = true,
        message_notifications: bool = true,
        group_invites: bool = true,
        share_activity: bool = true,
    }
}

preference_record! {
    /// Sound feedback options.
    pub struct SoundPreferences / SoundPreferencesPatch {
        notification_sounds: bool = true,
        system_sounds: bool = true,
        volume: Volume = Volume::Medium,
        mute: bool = false,
    }
}

preference_record! {
    /// Theme selection.
    pub struct ThemePreferences / ThemePreferencesPatch {
        dark_mode: bool = false,
        light_mode: bool = true,
        auto_mode: bool = false,
        custom_theme: Option<String> = None,
    }
}

/// A record from any category, serialised as the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PreferenceRecord {
    Notification(NotificationPreferences),
    Display(DisplayPreferences),
    Privacy(PrivacyPreferences),
    Accessibility(AccessibilityPreferences),
    Language(LanguagePreferences),
    Security(SecurityPreferences),
    Social(SocialPreferences),
    Sound(SoundPreferences),
    Theme(ThemePreferences),
}

impl PreferenceRecord {
    /// The category this record belongs to.
    pub fn category(&self) -> PreferenceCategory {
        match self {
            Self::Notification(_) => PreferenceCategory::Notification,
            Self::Display(_) => PreferenceCategory::Display,
            Self::Privacy(_) => PreferenceCategory::Privacy,
            Self::Accessibility(_) => PreferenceCategory::Accessibility,
            Self::Language(_) => PreferenceCategory::Language,
            Self::Security(_) => PreferenceCategory::Security,
            Self::Social(_) => PreferenceCategory::Social,
            Self::Sound(_) => PreferenceCategory::Sound,
            Self::Theme(_) => PreferenceCategory::Theme,
        }
    }
}

/// A patch from any category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencePatch {
    Notification(NotificationPreferencesPatch),
    Display(DisplayPreferencesPatch),
    Privacy(PrivacyPreferencesPatch),
    Accessibility(AccessibilityPreferencesPatch),
    Language(LanguagePreferencesPatch),
    Security(SecurityPreferencesPatch),
    Social(SocialPreferencesPatch),
    Sound(SoundPreferencesPatch),
    Theme(ThemePreferencesPatch),
}

impl PreferencePatch {
    /// Deserialise a request body into the patch shape of `category`.
    ///
    /// Unknown fields and malformed enum values surface as
    /// `validation-error`.
    pub fn from_json(category: PreferenceCategory, body: Value) -> Result<Self, Error> {
        fn parse<T: serde::de::DeserializeOwned>(
            category: PreferenceCategory,
            body: Value,
        ) -> Result<T, Error> {
            serde_json::from_value(body).map_err(|err| {
                Error::validation(format!("invalid {category} preferences payload: {err}"))
            })
        }

        Ok(match category {
            PreferenceCategory::Notification => Self::Notification(parse(category, body)?),
            PreferenceCategory::Display => Self::Display(parse(category, body)?),
            PreferenceCategory::Privacy => Self::Privacy(parse(category, body)?),
            PreferenceCategory::Accessibility => Self::Accessibility(parse(category, body)?),
            PreferenceCategory::Language => Self::Language(parse(category, body)?),
            PreferenceCategory::Security => Self::Security(parse(category, body)?),
            PreferenceCategory::Social => Self::Social(parse(category, body)?),
            PreferenceCategory::Sound => Self::Sound(parse(category, body)?),
            PreferenceCategory::Theme => Self::Theme(parse(category, body)?),
        })
    }

    /// The category this patch targets.
    pub fn category(&self) -> PreferenceCategory {
        match self {
            Self::Notification(_) => PreferenceCategory::Notification,
            Self::Display(_) => PreferenceCategory::Display,
            Self::Privacy(_) => PreferenceCategory::Privacy,
            Self::Accessibility(_) => PreferenceCategory::Accessibility,
            Self::Language(_) => PreferenceCategory::Language,
            Self::Security(_) => PreferenceCategory::Security,
            Self::Social(_) => PreferenceCategory::Social,
            Self::Sound(_) => PreferenceCategory::Sound,
            Self::Theme(_) => PreferenceCategory::Theme,
        }
    }
}

/// Every category for one user, optionally filtered to a subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacyPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguagePreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreferences>,
}

/// Multi-category partial update for `PUT .../preferences`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PreferencesPatchSet {
    pub notification: Option<NotificationPreferencesPatch>,
    pub display: Option<DisplayPreferencesPatch>,
    pub privacy: Option<PrivacyPreferencesPatch>,
    pub accessibility: Option<AccessibilityPreferencesPatch>,
    pub language: Option<LanguagePreferencesPatch>,
    pub security: Option<SecurityPreferencesPatch>,
    pub social: Option<SocialPreferencesPatch>,
    pub sound: Option<SoundPreferencesPatch>,
    pub theme: Option<ThemePreferencesPatch>,
}

impl PreferencesPatchSet {
    /// Flatten into individual category patches, in canonical order.
    pub fn into_patches(self) -> Vec<PreferencePatch> {
        let mut patches = Vec::new();
        if let Some(p) = self.notification {
            patches.push(PreferencePatch::Notification(p));
        }
        if let Some(p) = self.display {
            patches.push(PreferencePatch::Display(p));
        }
        if let Some(p) = self.privacy {
            patches.push(PreferencePatch::Privacy(p));
        }
        if let Some(p) = self.accessibility {
            patches.push(PreferencePatch::Accessibility(p));
        }
        if let Some(p) = self.language {
            patches.push(PreferencePatch::Language(p));
        }
        if let Some(p) = self.security {
            patches.push(PreferencePatch::Security(p));
        }
        if let Some(p) = self.social {
            patches.push(PreferencePatch::Social(p));
        }
        if let Some(p) = self.sound {
            patches.push(PreferencePatch::Sound(p));
        }
        if let Some(p) = self.theme {
            patches.push(PreferencePatch::Theme(p));
        }
        patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn notification_defaults_match_canonical_set() {
        let defaults = NotificationPreferences::defaults();
        assert!(defaults.email_notifications);
        assert!(defaults.push_notifications);
        assert!(!defaults.sms_notifications);
        assert!(!defaults.marketing_emails);
        assert!(defaults.security_alerts);
        assert!(defaults.activity_summaries);
        assert!(defaults.recipe_recommendations);
        assert!(defaults.social_interactions);
    }

    #[rstest]
    fn display_defaults_match_canonical_set() {
        let defaults = DisplayPreferences::defaults();
        assert_eq!(defaults.font_size, FontSize::Medium);
        assert_eq!(defaults.color_scheme, ColorScheme::Light);
        assert_eq!(defaults.layout_density, LayoutDensity::Comfortable);
        assert!(defaults.show_images);
        assert!(!defaults.compact_mode);
    }

    #[rstest]
    fn privacy_defaults_match_canonical_set() {
        let defaults = PrivacyPreferences::defaults();
        assert_eq!(defaults.profile_visibility, Visibility::Public);
        assert_eq!(defaults.recipe_visibility, Visibility::Public);
        assert_eq!(defaults.activity_visibility, Visibility::Public);
        assert_eq!(defaults.contact_info_visibility, Visibility::Private);
        assert!(!defaults.data_sharing);
        assert!(!defaults.analytics_tracking);
    }

    #[rstest]
    fn remaining_defaults_match_canonical_set() {
        let accessibility = AccessibilityPreferences::defaults();
        assert!(!accessibility.screen_reader);
        assert!(!accessibility.keyboard_navigation);

        let language = LanguagePreferences::defaults();
        assert_eq!(language.primary_language, "EN");
        assert!(language.secondary_language.is_none());
        assert!(!language.translation_enabled);

        let security = SecurityPreferences::defaults();
        assert!(!security.two_factor_enabled);
        assert!(security.login_notifications);
        assert!(security.password_requirements);

        let social = SocialPreferences::defaults();
        assert!(social.friend_requests && social.share_activity);

        let sound = SoundPreferences::defaults();
        assert_eq!(sound.volume, Volume::Medium);
        assert!(!sound.mute);

        let theme = ThemePreferences::defaults();
        assert!(theme.light_mode && !theme.dark_mode && !theme.auto_mode);
        assert!(theme.custom_theme.is_none());
    }

    #[rstest]
    fn patch_apply_overlays_only_supplied_fields() {
        let mut record = DisplayPreferences::defaults();
        let before = record.clone();
        let patch = DisplayPreferencesPatch {
            font_size: Some(FontSize::Large),
            ..DisplayPreferencesPatch::default()
        };
        patch.apply(&mut record);

        assert_eq!(record.font_size, FontSize::Large);
        assert_eq!(record.color_scheme, before.color_scheme);
        assert_eq!(record.layout_density, before.layout_density);
        assert_eq!(record.show_images, before.show_images);
        assert_eq!(record.compact_mode, before.compact_mode);
    }

    #[rstest]
    fn empty_patch_reports_empty() {
        assert!(NotificationPreferencesPatch::default().is_empty());
        let patch = NotificationPreferencesPatch {
            sms_notifications: Some(true),
            ..NotificationPreferencesPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[rstest]
    fn display_values_serialise_uppercase() {
        let json = serde_json::to_value(DisplayPreferences::defaults()).expect("serialise");
        assert_eq!(json["fontSize"], "MEDIUM");
        assert_eq!(json["colorScheme"], "LIGHT");
        assert_eq!(json["layoutDensity"], "COMFORTABLE");
    }

    #[rstest]
    fn visibility_serialises_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(Visibility::FollowersOnly).expect("serialise"),
            json!("FOLLOWERS_ONLY")
        );
        assert_eq!(
            "followers_only".parse::<Visibility>().expect("db string"),
            Visibility::FollowersOnly
        );
    }

    #[rstest]
    #[case("notification", PreferenceCategory::Notification)]
    #[case("display", PreferenceCategory::Display)]
    #[case("theme", PreferenceCategory::Theme)]
    fn category_parses_path_segments(#[case] segment: &str, #[case] expected: PreferenceCategory) {
        assert_eq!(PreferenceCategory::parse(segment).expect("known"), expected);
    }

    #[rstest]
    fn category_rejects_unknown_segment() {
        let err = PreferenceCategory::parse("flavour").expect_err("unknown category");
        assert_eq!(err.code(), ErrorCode::InvalidCategory);
    }

    #[rstest]
    fn patch_from_json_accepts_scenario_payload() {
        let patch =
            PreferencePatch::from_json(PreferenceCategory::Display, json!({"fontSize": "LARGE"}))
                .expect("valid payload");
        let PreferencePatch::Display(display) = patch else {
            panic!("expected display patch");
        };
        assert_eq!(display.font_size, Some(FontSize::Large));
        assert!(display.color_scheme.is_none());
    }

    #[rstest]
    fn patch_from_json_rejects_unknown_fields() {
        let err = PreferencePatch::from_json(
            PreferenceCategory::Display,
            json!({"fontWeight": "BOLD"}),
        )
        .expect_err("unknown field");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[rstest]
    fn patch_set_flattens_in_canonical_order() {
        let set = PreferencesPatchSet {
            theme: Some(ThemePreferencesPatch {
                dark_mode: Some(true),
                ..ThemePreferencesPatch::default()
            }),
            display: Some(DisplayPreferencesPatch::default()),
            ..PreferencesPatchSet::default()
        };
        let patches = set.into_patches();
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].category(), PreferenceCategory::Display);
        assert_eq!(patches[1].category(), PreferenceCategory::Theme);
    }
}
