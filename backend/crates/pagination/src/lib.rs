//! Limit/offset pagination primitives shared by list endpoints.
//!
//! Every paginated endpoint accepts `limit`, `offset`, and `countOnly`
//! parameters with the same bounds. [`PageRequest`] validates those bounds in
//! one place so handlers and services never re-implement them, and [`Page`]
//! carries a result slice together with the total row count.

use serde::Serialize;

/// Default page size applied when the client omits `limit`.
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound on `limit`; larger values are rejected, not clamped.
pub const MAX_LIMIT: i64 = 100;

/// Validation failures for pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `limit` was outside `[1, MAX_LIMIT]`.
    #[error("limit must be between 1 and 100")]
    LimitOutOfRange { value: i64 },

    /// `offset` was negative.
    #[error("offset must not be negative")]
    NegativeOffset { value: i64 },
}

/// Validated pagination parameters for a list request.
///
/// ## Invariants
/// - `limit` is in `[1, MAX_LIMIT]`.
/// - `offset` is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: i64,
    offset: i64,
    count_only: bool,
}

impl PageRequest {
    /// Validate raw pagination parameters, filling in defaults for absent
    /// values (`limit` 20, `offset` 0).
    pub fn new(
        limit: Option<i64>,
        offset: Option<i64>,
        count_only: bool,
    ) -> Result<Self, PageRequestError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PageRequestError::LimitOutOfRange { value: limit });
        }
        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(PageRequestError::NegativeOffset { value: offset });
        }
        Ok(Self {
            limit,
            offset,
            count_only,
        })
    }

    /// Page size.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// When true, the caller wants only the total count; the item list is
    /// omitted from the response.
    pub fn count_only(&self) -> bool {
        self.count_only
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            count_only: false,
        }
    }
}

/// One page of results plus the total number of matching rows.
///
/// An empty page with `total == 0` is a valid result, not an error. A
/// count-only page carries no item list at all and the `items` key is
/// omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<T>>,
    pub total: i64,
}

impl<T> Page<T> {
    /// Build a page from items and a total count.
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self {
            items: Some(items),
            total,
        }
    }

    /// A count-only page: total preserved, item list omitted.
    pub fn count_only(total: i64) -> Self {
        Self { items: None, total }
    }

    /// Map the item type while keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.map(|items| items.into_iter().map(f).collect()),
            total: self.total,
        }
    }
}
