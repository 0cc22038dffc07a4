//! Shared validation helpers for inbound HTTP adapters.

use serde::Deserialize;
use serde_json::json;

use pagination::{PageRequest, PageRequestError};

use crate::domain::preferences::PreferenceCategory;
use crate::domain::{Error, UserId, DEFAULT_PER_TYPE_LIMIT};

/// Pagination query parameters accepted by every list endpoint.
///
/// `countOnly` is the canonical spelling; unknown parameters are rejected so
/// a misspelt flag fails loudly instead of silently returning a full page.
#[derive(Debug, Default, Clone, Copy, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub count_only: Option<bool>,
}

impl PageQuery {
    /// Validate into a [`PageRequest`], surfacing bounds failures as
    /// validation errors.
    pub fn into_page_request(self) -> Result<PageRequest, Error> {
        PageRequest::new(self.limit, self.offset, self.count_only.unwrap_or(false)).map_err(
            |err| {
                let (field, value) = match err {
                    PageRequestError::LimitOutOfRange { value } => ("limit", value),
                    PageRequestError::NegativeOffset { value } => ("offset", value),
                };
                Error::validation(err.to_string())
                    .with_details(json!({ "field": field, "value": value }))
            },
        )
    }
}

/// Query parameters for the activity endpoint.
#[derive(Debug, Default, Clone, Copy, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ActivityQuery {
    pub per_type_limit: Option<i64>,
}

impl ActivityQuery {
    /// The requested per-type cap, defaulting when absent. Range checking
    /// stays in the service.
    pub fn per_type_limit(self) -> i64 {
        self.per_type_limit.unwrap_or(DEFAULT_PER_TYPE_LIMIT)
    }
}

/// Parse a `{user-id}` path segment.
pub fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::validation("user id must be a UUID").with_details(json!({ "value": raw }))
    })
}

/// Parse an optional comma-separated `categories` filter.
pub fn parse_categories(raw: Option<&str>) -> Result<Option<Vec<PreferenceCategory>>, Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let categories = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PreferenceCategory::parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(categories).filter(|c| !c.is_empty()))
}
