//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod envelope;
pub mod error;
pub mod follows;
pub mod health;
pub mod metrics;
pub mod notifications;
pub mod preferences;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
