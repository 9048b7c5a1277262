pub mod auth;
pub mod companies;
pub mod users;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::middleware;

/// Assemble the full router: routes, soft-fail authentication, and the
/// config-driven layers. The binary serves this; integration tests drive
/// it in-process.
pub fn app() -> Router {
    let config = config::config();

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(auth_public_routes())
        // Directory API
        .merge(company_routes())
        .merge(user_routes())
        .merge(auth_routes())
        // Identity context for every route; guards decide per handler
        .layer(axum::middleware::from_fn(middleware::authenticate))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn auth_public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        .route("/auth/token", post(auth::token_post))
        .route("/auth/register", post(auth::register_post))
}

fn auth_routes() -> Router {
    Router::new().route("/api/auth/whoami", get(auth::whoami_get))
}

fn company_routes() -> Router {
    Router::new()
        .route(
            "/api/companies",
            get(companies::company_list).post(companies::company_create),
        )
        .route(
            "/api/companies/:handle",
            get(companies::company_get)
                .patch(companies::company_update)
                .delete(companies::company_delete),
        )
}

fn user_routes() -> Router {
    Router::new()
        .route("/api/users", get(users::user_list).post(users::user_create))
        .route(
            "/api/users/:username",
            get(users::user_get)
                .patch(users::user_update)
                .delete(users::user_delete),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Roster API",
            "version": version,
            "description": "Company directory backend",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/token, /auth/register (public - token acquisition)",
                "whoami": "/api/auth/whoami (authenticated)",
                "companies": "/api/companies[/:handle] (list/get public, mutations admin)",
                "users": "/api/users[/:username] (admin, or admin-or-self per record)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
