use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::request_id;
use crate::routes::{admin, auth, devices, health, issues, stores};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Store and issue routes
    let issue_routes = Router::new()
        .route("/stores", get(stores::list_stores))
        .route("/issues", post(issues::add_issue))
        .route("/issues/by-store", get(issues::issues_by_store))
        .route("/issues/search", get(issues::search_issues))
        .route("/issues/update", post(issues::update_issue))
        .route("/issues/delete", post(issues::delete_issue))
        .route("/issues/all", get(issues::all_issues))
        .route("/devices/by-store", get(devices::devices_by_store));

    // Auth routes (stateless; credentials verified on every call)
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/quick-login", post(auth::quick_login))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/change-pin", post(auth::change_pin));

    // Admin routes (embedded admin credentials in every request body)
    let admin_routes = Router::new()
        .route("/admin/verify", post(admin::verify))
        .route("/admin/users", post(admin::list_users))
        .route(
            "/admin/change-user-password",
            post(admin::change_user_password),
        )
        .route("/admin/change-user-pin", post(admin::change_user_pin))
        .route("/admin/delete-user", post(admin::delete_user))
        .route("/admin/restart-api", post(admin::restart_api));

    // Public status routes
    let status_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check));

    // Merge all routes
    Router::new()
        .merge(status_routes)
        .merge(issue_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
