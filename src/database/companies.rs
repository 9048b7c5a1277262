use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::config;
use crate::error::ApiError;
use crate::sql::{update_set, ColumnMap, CompanyFilter};

use super::manager::DatabaseManager;
use super::models::Company;
use super::{bind_param_query_as, reject_unknown_fields};

/// API field -> column translations; everything else maps verbatim.
static COLUMNS: Lazy<ColumnMap> = Lazy::new(|| {
    HashMap::from([
        ("numEmployees", "num_employees"),
        ("logoUrl", "logo_url"),
    ])
});

const UPDATABLE_FIELDS: &[&str] = &["name", "description", "numEmployees", "logoUrl"];

const RETURNING: &str = "handle, name, description, num_employees, logo_url";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Persistence glue for the companies table. All statement text is owned
/// here; values reach Postgres through positional binds only.
pub struct CompanyStore;

impl CompanyStore {
    /// Insert a company; the handle must be unused.
    pub async fn create(input: NewCompany) -> Result<Company, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let duplicate = sqlx::query("SELECT handle FROM companies WHERE handle = $1")
            .bind(&input.handle)
            .fetch_optional(&pool)
            .await?;
        if duplicate.is_some() {
            return Err(ApiError::bad_request(format!("Duplicate company: {}", input.handle)));
        }

        let query = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            RETURNING
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(&input.handle)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.num_employees)
            .bind(&input.logo_url)
            .fetch_one(&pool)
            .await?;

        Ok(company)
    }

    /// List companies, narrowed by whatever filter criteria are present.
    pub async fn find_all(filter: &CompanyFilter) -> Result<Vec<Company>, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let where_sql = filter.to_where_sql(1)?;
        let mut query = format!("SELECT {} FROM companies", RETURNING);
        if !where_sql.query.is_empty() {
            query.push(' ');
            query.push_str(&where_sql.query);
        }
        query.push_str(" ORDER BY name");

        if config::config().database.enable_query_logging {
            tracing::debug!(%query, "company search");
        }

        let mut q = sqlx::query_as::<_, Company>(&query);
        for p in where_sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(&pool).await?)
    }

    pub async fn get(handle: &str) -> Result<Company, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let query = format!("SELECT {} FROM companies WHERE handle = $1", RETURNING);
        sqlx::query_as::<_, Company>(&query)
            .bind(handle)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No company: {}", handle)))
    }

    /// Partial update: only the supplied fields change. The SET clause
    /// binds $1..$n; the handle follows at $n+1.
    pub async fn update(handle: &str, payload: &Map<String, Value>) -> Result<Company, ApiError> {
        reject_unknown_fields(payload, UPDATABLE_FIELDS)?;
        let set = update_set(payload, &COLUMNS)?;

        let pool = DatabaseManager::pool().await?;
        let query = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            set.query,
            set.params.len() + 1,
            RETURNING
        );

        if config::config().database.enable_query_logging {
            tracing::debug!(%query, "company update");
        }

        let mut q = sqlx::query_as::<_, Company>(&query);
        for p in set.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q.bind(handle)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No company: {}", handle)))
    }

    pub async fn remove(handle: &str) -> Result<(), ApiError> {
        let pool = DatabaseManager::pool().await?;

        let deleted = sqlx::query("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&pool)
            .await?;
        if deleted.is_none() {
            return Err(ApiError::not_found(format!("No company: {}", handle)));
        }
        Ok(())
    }
}
