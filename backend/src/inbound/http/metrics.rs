//! Read-only observability blobs.
//!
//! ```text
//! GET /api/v1/user-management/metrics/performance
//! GET /api/v1/user-management/metrics/cache
//! GET /api/v1/user-management/metrics/system
//! GET /api/v1/user-management/metrics/health/detailed
//! ```
//!
//! These endpoints report coarse process and dependency state for dashboards.
//! They are not a metrics pipeline; structured logs carry the detailed
//! signal.

use std::time::Instant;

use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::{json, Value};

use crate::inbound::http::envelope::ok_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Process-scoped facts captured at startup.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    started_at: Instant,
    version: &'static str,
}

impl ServiceInfo {
    /// Capture the process start instant and crate version.
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self::new()
    }
}

async fn dependency_blob<E: std::fmt::Display>(
    ping: impl std::future::Future<Output = Result<(), E>>,
) -> Value {
    let started = Instant::now();
    let latency_ms = |start: Instant| start.elapsed().as_millis() as u64;
    match ping.await {
        Ok(()) => json!({ "status": "UP", "latencyMs": latency_ms(started) }),
        Err(err) => json!({ "status": "DOWN", "error": err.to_string() }),
    }
}

/// Coarse performance counters.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/metrics/performance",
    tags = ["metrics"],
    responses((status = 200, description = "Performance blob"))
)]
#[get("/metrics/performance")]
pub async fn performance_metrics(info: web::Data<ServiceInfo>) -> ApiResult<HttpResponse> {
    Ok(ok_json(json!({
        "uptimeSeconds": info.uptime_seconds(),
        "timestamp": Utc::now(),
    })))
}

/// Cache reachability and latency.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/metrics/cache",
    tags = ["metrics"],
    responses((status = 200, description = "Cache blob"))
)]
#[get("/metrics/cache")]
pub async fn cache_metrics(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(ok_json(json!({
        "cache": dependency_blob(state.cache.ping()).await,
        "timestamp": Utc::now(),
    })))
}

/// Process identity and version.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/metrics/system",
    tags = ["metrics"],
    responses((status = 200, description = "System blob"))
)]
#[get("/metrics/system")]
pub async fn system_metrics(info: web::Data<ServiceInfo>) -> ApiResult<HttpResponse> {
    Ok(ok_json(json!({
        "service": "user-management",
        "version": info.version,
        "uptimeSeconds": info.uptime_seconds(),
        "timestamp": Utc::now(),
    })))
}

/// Per-dependency health with latencies.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/metrics/health/detailed",
    tags = ["metrics"],
    responses((status = 200, description = "Detailed health blob"))
)]
#[get("/metrics/health/detailed")]
pub async fn detailed_health(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let database = dependency_blob(state.store_health.ping()).await;
    let cache = dependency_blob(state.cache.ping()).await;
    let healthy = database["status"] == "UP" && cache["status"] == "UP";
    Ok(ok_json(json!({
        "status": if healthy { "READY" } else { "DEGRADED" },
        "database": database,
        "cache": cache,
        "timestamp": Utc::now(),
    })))
}
