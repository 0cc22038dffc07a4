//! Server construction and middleware wiring.
//!
//! This is the composition root: it builds the connection pool and cache
//! client, wires the Diesel and Redis adapters into the domain services, and
//! mounts every HTTP handler under `/api/v1/user-management`.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use serde_json::json;

use crate::domain::{
    AccountLifecycleService, Error, NotificationInboxService, PreferenceCenterService,
    SocialGraphService, UserDirectoryService,
};
use crate::inbound::http::metrics::ServiceInfo;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, admin, follows, health, metrics, notifications, preferences, users};
use crate::middleware::Trace;
use crate::outbound::cache::{RedisCacheError, RedisCacheStore};
use crate::outbound::persistence::{
    DbPool, DieselActivityRepository, DieselFollowRepository, DieselNotificationRepository,
    DieselPreferencesRepository, DieselUserRepository, PoolError,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Startup failures from building shared resources.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Cache(#[from] RedisCacheError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build the HTTP state from the shared pool and cache client.
pub fn build_http_state(pool: DbPool, cache: RedisCacheStore) -> HttpState {
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let follow_repo = Arc::new(DieselFollowRepository::new(pool.clone()));
    let preferences_repo = Arc::new(DieselPreferencesRepository::new(pool.clone()));
    let activity_repo = Arc::new(DieselActivityRepository::new(pool.clone()));
    let notification_repo = Arc::new(DieselNotificationRepository::new(pool.clone()));
    let cache = Arc::new(cache);

    HttpState {
        directory: Arc::new(UserDirectoryService::new(
            user_repo.clone(),
            follow_repo.clone(),
            preferences_repo.clone(),
            activity_repo,
        )),
        social: Arc::new(SocialGraphService::new(
            user_repo.clone(),
            follow_repo,
            preferences_repo.clone(),
        )),
        preferences: Arc::new(PreferenceCenterService::new(
            user_repo.clone(),
            preferences_repo,
        )),
        lifecycle: Arc::new(AccountLifecycleService::new(user_repo, cache.clone())),
        notifications: Arc::new(NotificationInboxService::new(notification_repo)),
        store_health: Arc::new(pool),
        cache,
    }
}

fn json_error_handler(err: impl std::fmt::Display) -> actix_web::Error {
    Error::validation(format!("malformed request: {err}"))
        .with_details(json!({ "source": "body" }))
        .into()
}

fn query_error_handler(err: impl std::fmt::Display) -> actix_web::Error {
    Error::validation(format!("malformed query string: {err}"))
        .with_details(json!({ "source": "query" }))
        .into()
}

/// Build the application with every route mounted.
///
/// Literal segments (`search`, `profile`, `account`, `read-all`,
/// `preferences`) register before their parameterised siblings so they are
/// not captured as path variables.
pub fn build_app(
    state: web::Data<HttpState>,
    info: web::Data<ServiceInfo>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1/user-management")
        .app_data(web::JsonConfig::default().error_handler(|err, _| json_error_handler(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| query_error_handler(err)))
        .service(health::health)
        .service(health::ready)
        .service(users::search_users)
        .service(users::update_profile)
        .service(accounts::request_account_deletion)
        .service(accounts::confirm_account_deletion)
        .service(users::get_profile)
        .service(users::get_activity)
        .service(follows::follow_user)
        .service(follows::unfollow_user)
        .service(follows::list_followers)
        .service(follows::list_following)
        .service(preferences::get_preferences)
        .service(preferences::update_preferences)
        .service(preferences::get_preference_category)
        .service(preferences::update_preference_category)
        .service(users::get_user)
        .service(notifications::mark_all_notifications_read)
        .service(preferences::get_notification_preferences)
        .service(preferences::update_notification_preferences)
        .service(notifications::mark_notification_read)
        .service(notifications::list_notifications)
        .service(notifications::delete_notifications)
        .service(admin::get_user_stats)
        .service(admin::clear_cache)
        .service(metrics::performance_metrics)
        .service(metrics::cache_metrics)
        .service(metrics::system_metrics)
        .service(metrics::detailed_health);

    App::new()
        .app_data(state)
        .app_data(info)
        .wrap(Trace)
        .service(api)
}

/// Construct the Actix HTTP server from pre-built shared resources.
pub fn create_server(config: &AppConfig, state: HttpState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let info = web::Data::new(ServiceInfo::new());

    let server = HttpServer::new(move || build_app(state.clone(), info.clone()))
        .shutdown_timeout(SHUTDOWN_TIMEOUT.as_secs())
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}

/// Read configuration, build the pool and cache client, and start serving.
pub async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let pool = DbPool::new(config.pool_config()).await?;
    let cache = RedisCacheStore::connect(&config.redis_url, config.redis_pool_size).await?;
    let state = build_http_state(pool, cache);

    tracing::info!(addr = %config.bind_addr, "starting user management service");
    create_server(&config, state)?.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn fixture_app() -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        build_app(
            web::Data::new(HttpState::fixture()),
            web::Data::new(ServiceInfo::new()),
        )
    }

    #[actix_web::test]
    async fn search_route_wins_over_the_user_id_capture() {
        let app = actix_test::init_service(fixture_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/user-management/users/search?query=ada")
                .to_request(),
        )
        .await;
        // The fixture search returns an empty page rather than the
        // validation error a `{user_id}` capture of "search" would raise.
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["data"]["items"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn read_all_route_wins_over_the_notification_id_capture() {
        let app = actix_test::init_service(fixture_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/user-management/notifications/read-all")
                .insert_header(("X-User-Id", crate::domain::UserId::random().to_string()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }

    #[actix_web::test]
    async fn responses_carry_a_trace_id_header() {
        let app = actix_test::init_service(fixture_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/user-management/health")
                .to_request(),
        )
        .await;
        assert!(response.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn malformed_json_bodies_map_to_validation_errors() {
        let app = actix_test::init_service(fixture_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/user-management/notifications")
                .insert_header(("X-User-Id", crate::domain::UserId::random().to_string()))
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"]["code"], "validation-error");
    }
}
