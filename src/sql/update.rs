use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::SqlError;
use super::types::SqlResult;

/// API field name -> physical column name. Fields absent from the map use
/// the field name verbatim as the column.
pub type ColumnMap = HashMap<&'static str, &'static str>;

/// Build a parameterized SET clause from a partial-update payload.
///
/// Each payload key becomes a `"column"=$n` fragment in iteration order,
/// with `n` the 1-based key position; `params` carries the values in the
/// same order, so the caller binds them positionally and continues its own
/// bindings at `params.len() + 1`.
///
/// ```
/// use roster_api::sql::update_set;
/// use serde_json::{json, Map};
/// use std::collections::HashMap;
///
/// let mut payload = Map::new();
/// payload.insert("name".into(), json!("Acme"));
/// payload.insert("logoUrl".into(), json!("/logos/acme.png"));
/// let columns = HashMap::from([("logoUrl", "logo_url")]);
///
/// let set = update_set(&payload, &columns).unwrap();
/// assert_eq!(set.query, r#""name"=$1, "logo_url"=$2"#);
/// ```
pub fn update_set(payload: &Map<String, Value>, columns: &ColumnMap) -> Result<SqlResult, SqlError> {
    if payload.is_empty() {
        return Err(SqlError::EmptyUpdate);
    }

    let fragments: Vec<String> = payload
        .keys()
        .enumerate()
        .map(|(idx, field)| {
            let column = columns.get(field.as_str()).copied().unwrap_or(field.as_str());
            // 1-based positional parameters
            format!("\"{}\"=${}", column, idx + 1)
        })
        .collect();

    Ok(SqlResult {
        query: fragments.join(", "),
        params: payload.values().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_columns() -> ColumnMap {
        HashMap::from([
            ("firstName", "first_name"),
            ("lastName", "last_name"),
            ("isAdmin", "is_admin"),
        ])
    }

    #[test]
    fn single_field() {
        let mut payload = Map::new();
        payload.insert("lastName".to_string(), json!("New last name"));

        let set = update_set(&payload, &user_columns()).unwrap();
        assert_eq!(set.query, r#""last_name"=$1"#);
        assert_eq!(set.params, vec![json!("New last name")]);
    }

    #[test]
    fn multiple_fields_keep_payload_order() {
        let mut payload = Map::new();
        payload.insert("firstName".to_string(), json!("A"));
        payload.insert("lastName".to_string(), json!("B"));

        let set = update_set(&payload, &user_columns()).unwrap();
        assert_eq!(set.query, r#""first_name"=$1, "last_name"=$2"#);
        assert_eq!(set.params, vec![json!("A"), json!("B")]);
    }

    #[test]
    fn unmapped_field_falls_back_to_raw_key() {
        let mut payload = Map::new();
        payload.insert("description".to_string(), json!("text"));
        payload.insert("isAdmin".to_string(), json!(true));

        let set = update_set(&payload, &user_columns()).unwrap();
        assert_eq!(set.query, r#""description"=$1, "is_admin"=$2"#);
        assert_eq!(set.params, vec![json!("text"), json!(true)]);
    }

    #[test]
    fn empty_payload_is_rejected() {
        let payload = Map::new();
        let err = update_set(&payload, &user_columns()).unwrap_err();
        assert!(matches!(err, SqlError::EmptyUpdate));
    }

    #[test]
    fn repeated_builds_are_identical() {
        let mut payload = Map::new();
        payload.insert("name".to_string(), json!("Acme"));
        payload.insert("numEmployees".to_string(), json!(12));
        let columns = HashMap::from([("numEmployees", "num_employees")]);

        let first = update_set(&payload, &columns).unwrap();
        let second = update_set(&payload, &columns).unwrap();
        assert_eq!(first.query, second.query);
        assert_eq!(first.params, second.params);
    }
}
