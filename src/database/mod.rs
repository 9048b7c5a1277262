pub mod companies;
pub mod manager;
pub mod models;
pub mod users;

use serde_json::{Map, Value};
use sqlx::{self, postgres::PgArguments, FromRow};

use crate::error::ApiError;

/// Reject update payload keys outside a model's updatable set before any
/// clause is built from them.
pub(crate) fn reject_unknown_fields(payload: &Map<String, Value>, allowed: &[&str]) -> Result<(), ApiError> {
    for key in payload.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(ApiError::bad_request(format!("Unknown field: {}", key)));
        }
    }
    Ok(())
}

/// Bind one JSON parameter value at the next positional slot.
///
/// The SQL builders emit `serde_json::Value` parameter lists; this helper
/// translates each value to the matching Postgres bind without ever
/// touching the statement text.
pub(crate) fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()),
    }
}
