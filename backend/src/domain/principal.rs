//! Authenticated-principal value consumed from the transport layer.
//!
//! The service core never authenticates anyone itself; it trusts the
//! [`Principal`] the transport attaches to each request. Absence of a user id
//! and client id means the request is anonymous.

use serde::{Deserialize, Serialize};

use super::user::UserId;
use super::Error;

/// A named capability attached to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Full administrative access.
    Admin,
    /// Read access to other users' data for service accounts.
    UserRead,
    /// Write access to other users' data for service accounts.
    UserWrite,
}

impl Scope {
    /// Wire representation used in the `X-Scopes` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::UserRead => "user:read",
            Self::UserWrite => "user:write",
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = UnknownScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user:read" => Ok(Self::UserRead),
            "user:write" => Ok(Self::UserWrite),
            other => Err(UnknownScopeError {
                input: other.to_owned(),
            }),
        }
    }
}

/// Error returned when parsing an unrecognised scope string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scope: {input}")]
pub struct UnknownScopeError {
    pub input: String,
}

/// The authenticated-caller value attached to the request context.
///
/// ## Invariants
/// - An anonymous principal has no user id, no client id, and no scopes.
/// - `is_service` implies a client id is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: Option<UserId>,
    client_id: Option<String>,
    is_service: bool,
    scopes: Vec<Scope>,
}

impl Principal {
    /// A principal for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            client_id: None,
            is_service: false,
            scopes: Vec::new(),
        }
    }

    /// A principal for an authenticated end user.
    pub fn user(user_id: UserId, scopes: Vec<Scope>) -> Self {
        Self {
            user_id: Some(user_id),
            client_id: None,
            is_service: false,
            scopes,
        }
    }

    /// A principal for a service account acting without an end user.
    pub fn service(client_id: impl Into<String>, scopes: Vec<Scope>) -> Self {
        Self {
            user_id: None,
            client_id: Some(client_id.into()),
            is_service: true,
            scopes,
        }
    }

    /// The authenticated user's id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// The calling service's client id, if any.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Whether the caller is a service account rather than an end user.
    pub fn is_service(&self) -> bool {
        self.is_service
    }

    /// Whether no identity at all is attached.
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && self.client_id.is_none()
    }

    /// Whether the principal carries the given scope.
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Whether the principal carries the `admin` scope.
    pub fn is_admin(&self) -> bool {
        self.has_scope(Scope::Admin)
    }

    /// The authenticated user's id, or `unauthorized` when absent.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id
            .clone()
            .ok_or_else(|| Error::unauthorized("authentication required"))
    }
}
