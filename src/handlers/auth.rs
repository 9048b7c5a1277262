use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_token, Claims};
use crate::config;
use crate::database::users::{NewUser, UserStore};
use crate::middleware::{guards, ApiResponse, ApiResult, AuthSession};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/token - authenticate a username/password pair and return a
/// signed token for the directory API.
pub async fn token_post(Json(input): Json<LoginRequest>) -> ApiResult<Value> {
    let user = UserStore::authenticate(&input.username, &input.password).await?;

    let claims = Claims::new(user.username.as_str(), user.is_admin);
    let token = generate_token(&claims, &config::config().security.jwt_secret)?;

    Ok(ApiResponse::success(json!({ "token": token })))
}

/// POST /auth/register - self-service signup. Never grants admin; an
/// admin-created account is the only path to the privilege flag.
pub async fn register_post(Json(mut input): Json<NewUser>) -> ApiResult<Value> {
    input.is_admin = false;
    let user = UserStore::create(input).await?;

    let claims = Claims::new(user.username.as_str(), user.is_admin);
    let token = generate_token(&claims, &config::config().security.jwt_secret)?;

    Ok(ApiResponse::created(json!({ "token": token })))
}

/// GET /api/auth/whoami - echo the verified identity
pub async fn whoami_get(Extension(AuthSession(session)): Extension<AuthSession>) -> ApiResult<Value> {
    let user = guards::require_authenticated(session.as_ref())?;

    Ok(ApiResponse::success(json!({
        "username": user.username,
        "isAdmin": user.is_admin,
        "issuedAt": user.issued_at,
    })))
}
