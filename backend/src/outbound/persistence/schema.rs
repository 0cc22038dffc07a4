//! Diesel table definitions for the user-management schema.
//!
//! `users` is owned by the sibling registration service; follow edges,
//! notifications, and the nine preference tables are owned here. Recipes,
//! reviews, and favorites belong to sibling services and are read-only.

diesel::table! {
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Nullable<Varchar>,
        full_name -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_follows (follower_id, followee_id) {
        follower_id -> Uuid,
        followee_id -> Uuid,
        followed_at -> Timestamptz,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        message -> Text,
        kind -> Varchar,
        is_read -> Bool,
        is_deleted -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_notification_preferences (user_id) {
        user_id -> Uuid,
        email_notifications -> Bool,
        push_notifications -> Bool,
        sms_notifications -> Bool,
        marketing_emails -> Bool,
        security_alerts -> Bool,
        activity_summaries -> Bool,
        recipe_recommendations -> Bool,
        social_interactions -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_display_preferences (user_id) {
        user_id -> Uuid,
        font_size -> Varchar,
        color_scheme -> Varchar,
        layout_density -> Varchar,
        show_images -> Bool,
        compact_mode -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_privacy_preferences (user_id) {
        user_id -> Uuid,
        profile_visibility -> Varchar,
        recipe_visibility -> Varchar,
        activity_visibility -> Varchar,
        contact_info_visibility -> Varchar,
        data_sharing -> Bool,
        analytics_tracking -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_accessibility_preferences (user_id) {
        user_id -> Uuid,
        screen_reader -> Bool,
        high_contrast -> Bool,
        reduced_motion -> Bool,
        large_text -> Bool,
        keyboard_navigation -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_language_preferences (user_id) {
        user_id -> Uuid,
        primary_language -> Varchar,
        secondary_language -> Nullable<Varchar>,
        translation_enabled -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_security_preferences (user_id) {
        user_id -> Uuid,
        two_factor_enabled -> Bool,
        login_notifications -> Bool,
        session_timeout -> Bool,
        password_requirements -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_social_preferences (user_id) {
        user_id -> Uuid,
        friend_requests -> Bool,
        message_notifications -> Bool,
        group_invites -> Bool,
        share_activity -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_sound_preferences (user_id) {
        user_id -> Uuid,
        notification_sounds -> Bool,
        system_sounds -> Bool,
        volume -> Varchar,
        mute -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_theme_preferences (user_id) {
        user_id -> Uuid,
        dark_mode -> Bool,
        light_mode -> Bool,
        auto_mode -> Bool,
        custom_theme -> Nullable<Varchar>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        author_id -> Uuid,
        title -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_reviews (id) {
        id -> Uuid,
        user_id -> Uuid,
        recipe_id -> Uuid,
        rating -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_favorites (user_id, recipe_id) {
        user_id -> Uuid,
        recipe_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, user_follows);
