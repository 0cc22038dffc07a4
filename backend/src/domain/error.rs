//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps the stable
//! [`ErrorCode`] taxonomy to status codes; the service layer never names a
//! status code itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
///
/// Serialised with kebab-case strings (`"user-not-found"`, ...) which appear
/// verbatim in the response envelope's `error.code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// Request shape, enumerations, or numeric ranges violated.
    ValidationError,
    /// No principal on an endpoint that requires one, or principal malformed.
    Unauthorized,
    /// Principal present but disallowed for this resource.
    Forbidden,
    /// The target user does not exist or is deactivated.
    UserNotFound,
    /// No live notification with the given id is owned by the caller.
    NotificationNotFound,
    /// Unknown preference category in the request path.
    InvalidCategory,
    /// Unique-violation on the username column during profile update.
    UsernameConflict,
    /// A user attempted to follow themselves.
    CannotFollowSelf,
    /// A user attempted to unfollow themselves.
    CannotUnfollowSelf,
    /// No deletion-confirmation token is stored for this user.
    TokenExpiredOrMissing,
    /// A token is stored but does not match the presented one.
    TokenInvalid,
    /// The cache is unreachable.
    CacheUnavailable,
    /// The relational store is unreachable.
    ServiceUnavailable,
    /// Catch-all; the underlying cause is logged, never surfaced.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "validation-error")]
    code: ErrorCode,
    #[schema(example = "limit must be between 1 and 100")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// # Panics
    /// Panics when `message` is empty after trimming; error messages are
    /// always literals or formatted strings under the service's control.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(
            !message.trim().is_empty(),
            "error messages must not be empty"
        );
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::UserNotFound`].
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "user not found")
    }

    /// Convenience constructor for [`ErrorCode::NotificationNotFound`].
    pub fn notification_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotificationNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::CacheUnavailable`].
    pub fn cache_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
