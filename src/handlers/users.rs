use axum::{extract::Path, Extension, Json};
use serde_json::{json, Map, Value};

use crate::database::models::User;
use crate::database::users::{NewUser, UserStore};
use crate::middleware::{guards, ApiResponse, ApiResult, AuthSession};

/// GET /api/users - list all users. Admin only.
pub async fn user_list(Extension(AuthSession(session)): Extension<AuthSession>) -> ApiResult<Vec<User>> {
    guards::require_admin(session.as_ref())?;
    Ok(ApiResponse::success(UserStore::find_all().await?))
}

/// POST /api/users - create a user, optionally with the admin flag.
/// Admin only; self-service signup goes through /auth/register.
pub async fn user_create(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Json(input): Json<NewUser>,
) -> ApiResult<User> {
    guards::require_admin(session.as_ref())?;
    Ok(ApiResponse::created(UserStore::create(input).await?))
}

/// GET /api/users/:username - fetch one user. Admin or the user themselves.
pub async fn user_get(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Path(username): Path<String>,
) -> ApiResult<User> {
    guards::require_admin_or_self(session.as_ref(), &username)?;
    Ok(ApiResponse::success(UserStore::get(&username).await?))
}

/// PATCH /api/users/:username - partial update of the supplied fields.
/// Admin or the user themselves.
pub async fn user_update(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Path(username): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> ApiResult<User> {
    guards::require_admin_or_self(session.as_ref(), &username)?;
    Ok(ApiResponse::success(UserStore::update(&username, payload).await?))
}

/// DELETE /api/users/:username - remove a user. Admin or the user
/// themselves.
pub async fn user_delete(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Path(username): Path<String>,
) -> ApiResult<Value> {
    guards::require_admin_or_self(session.as_ref(), &username)?;
    UserStore::remove(&username).await?;
    Ok(ApiResponse::success(json!({ "deleted": username })))
}
