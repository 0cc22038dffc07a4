//! Outbound adapters for PostgreSQL and Redis.

pub mod cache;
pub mod persistence;
