use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde_json::{json, Map, Value};

use crate::database::companies::{CompanyStore, NewCompany};
use crate::database::models::Company;
use crate::middleware::{guards, ApiResponse, ApiResult, AuthSession};
use crate::sql::CompanyFilter;

/// GET /api/companies - list companies, optionally filtered by
/// `name` / `minEmployees` / `maxEmployees`. Anonymous allowed.
pub async fn company_list(Query(filter): Query<CompanyFilter>) -> ApiResult<Vec<Company>> {
    let companies = CompanyStore::find_all(&filter).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /api/companies/:handle - fetch one company. Anonymous allowed.
pub async fn company_get(Path(handle): Path<String>) -> ApiResult<Company> {
    Ok(ApiResponse::success(CompanyStore::get(&handle).await?))
}

/// POST /api/companies - create a company. Admin only.
pub async fn company_create(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Json(input): Json<NewCompany>,
) -> ApiResult<Company> {
    guards::require_admin(session.as_ref())?;
    Ok(ApiResponse::created(CompanyStore::create(input).await?))
}

/// PATCH /api/companies/:handle - partial update of the supplied fields.
/// Admin only.
pub async fn company_update(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Path(handle): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> ApiResult<Company> {
    guards::require_admin(session.as_ref())?;
    Ok(ApiResponse::success(CompanyStore::update(&handle, &payload).await?))
}

/// DELETE /api/companies/:handle - remove a company. Admin only.
pub async fn company_delete(
    Extension(AuthSession(session)): Extension<AuthSession>,
    Path(handle): Path<String>,
) -> ApiResult<Value> {
    guards::require_admin(session.as_ref())?;
    CompanyStore::remove(&handle).await?;
    Ok(ApiResponse::success(json!({ "deleted": handle })))
}
