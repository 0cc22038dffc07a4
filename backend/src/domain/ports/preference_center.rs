//! Driving port for preference reads and partial updates.

use async_trait::async_trait;

use crate::domain::preferences::{
    PreferenceCategory, PreferencePatch, PreferenceRecord, PreferencesPatchSet, PreferencesSet,
};
use crate::domain::{Error, Principal, UserId};

/// Domain use-case port for the nine preference categories.
///
/// Callers may touch only their own preferences unless they carry the admin
/// scope or a service account with the matching `user:read` / `user:write`
/// scope. A missing row reads as the canonical defaults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceCenter: Send + Sync {
    /// Every category, optionally filtered to a subset.
    async fn get_all(
        &self,
        requester: &Principal,
        target_id: &UserId,
        categories: Option<Vec<PreferenceCategory>>,
    ) -> Result<PreferencesSet, Error>;

    /// One category's record.
    async fn get_category(
        &self,
        requester: &Principal,
        target_id: &UserId,
        category: PreferenceCategory,
    ) -> Result<PreferenceRecord, Error>;

    /// Partial-merge update of one category; absent fields preserve stored
    /// values, or defaults when no row existed.
    async fn update_category(
        &self,
        requester: &Principal,
        target_id: &UserId,
        patch: PreferencePatch,
    ) -> Result<PreferenceRecord, Error>;

    /// Partial-merge update across several categories at once.
    async fn update_many(
        &self,
        requester: &Principal,
        target_id: &UserId,
        patches: PreferencesPatchSet,
    ) -> Result<PreferencesSet, Error>;
}

/// Fixture centre where no users exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferenceCenter;

#[async_trait]
impl PreferenceCenter for FixturePreferenceCenter {
    async fn get_all(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _categories: Option<Vec<PreferenceCategory>>,
    ) -> Result<PreferencesSet, Error> {
        Err(Error::user_not_found())
    }

    async fn get_category(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _category: PreferenceCategory,
    ) -> Result<PreferenceRecord, Error> {
        Err(Error::user_not_found())
    }

    async fn update_category(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _patch: PreferencePatch,
    ) -> Result<PreferenceRecord, Error> {
        Err(Error::user_not_found())
    }

    async fn update_many(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _patches: PreferencesPatchSet,
    ) -> Result<PreferencesSet, Error> {
        Err(Error::user_not_found())
    }
}
