//! Principal extraction from request headers.
//!
//! Until a dedicated auth layer fronts this service, the caller's identity
//! arrives in plain headers: `X-User-Id` (end users), `X-Client-Id` plus
//! `X-Scopes` (service accounts), and `X-User-Role: admin` which folds into
//! the scope set. Absent headers yield an anonymous principal; handlers that
//! need identity reject it themselves.

use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::{Error, Principal, Scope, UserId};

const USER_ID_HEADER: &str = "X-User-Id";
const USER_ROLE_HEADER: &str = "X-User-Role";
const CLIENT_ID_HEADER: &str = "X-Client-Id";
const SCOPES_HEADER: &str = "X-Scopes";

/// Extractor wrapping the request's [`Principal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPrincipal(Principal);

impl RequestPrincipal {
    /// The extracted principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    /// Unwrap into the domain value.
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, Error> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|raw| Some(raw.trim()).filter(|s| !s.is_empty()))
            .map_err(|_| Error::unauthorized(format!("{name} header is not valid UTF-8"))),
    }
}

fn parse_scopes(raw: Option<&str>) -> Result<Vec<Scope>, Error> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Scope::from_str(s).map_err(|err| Error::unauthorized(format!("{err} in {SCOPES_HEADER}")))
        })
        .collect()
}

/// Build the principal from request headers.
///
/// `X-User-Id` wins over `X-Client-Id` when both are present; an admin role
/// header is equivalent to the `admin` scope.
pub fn principal_from_headers(headers: &HeaderMap) -> Result<Principal, Error> {
    let mut scopes = parse_scopes(header_str(headers, SCOPES_HEADER)?)?;
    let is_admin_role = header_str(headers, USER_ROLE_HEADER)?
        .is_some_and(|role| role.eq_ignore_ascii_case("admin"));
    if is_admin_role && !scopes.contains(&Scope::Admin) {
        scopes.push(Scope::Admin);
    }

    if let Some(raw_id) = header_str(headers, USER_ID_HEADER)? {
        let user_id = UserId::new(raw_id)
            .map_err(|_| Error::unauthorized(format!("{USER_ID_HEADER} header is not a UUID")))?;
        return Ok(Principal::user(user_id, scopes));
    }

    if let Some(client_id) = header_str(headers, CLIENT_ID_HEADER)? {
        return Ok(Principal::service(client_id, scopes));
    }

    Ok(Principal::anonymous())
}

impl FromRequest for RequestPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_from_headers(req.headers()).map(RequestPrincipal))
    }
}
