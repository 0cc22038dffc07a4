//! Liveness and readiness probes.
//!
//! `/health` answers as long as the process serves requests. `/ready` pings
//! the relational store and the cache with a short per-call timeout and
//! reports each dependency's state; it always answers 200 so load balancers
//! read degradation from the body, not from the status code.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use actix_web::{get, web, HttpResponse};
use serde_json::{json, Value};

use super::state::HttpState;

const PING_TIMEOUT: Duration = Duration::from_secs(1);

async fn probe<E: Display>(ping: impl Future<Output = Result<(), E>>) -> Value {
    match tokio::time::timeout(PING_TIMEOUT, ping).await {
        Ok(Ok(())) => json!({ "status": "UP" }),
        Ok(Err(err)) => json!({ "status": "DOWN", "error": err.to_string() }),
        Err(_) => json!({ "status": "DOWN", "error": "ping timed out" }),
    }
}

fn is_up(blob: &Value) -> bool {
    blob["status"] == "UP"
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/health",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service is up"))
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "UP" }))
}

/// Readiness probe reporting per-dependency health.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/ready",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Dependency health report"))
)]
#[get("/ready")]
pub async fn ready(state: web::Data<HttpState>) -> HttpResponse {
    let database = probe(state.store_health.ping()).await;
    let cache = probe(state.cache.ping()).await;
    let status = if is_up(&database) && is_up(&cache) {
        "READY"
    } else {
        "DEGRADED"
    };
    HttpResponse::Ok().json(json!({
        "status": status,
        "database": database,
        "cache": cache,
    }))
}
