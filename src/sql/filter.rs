use serde::Deserialize;
use serde_json::json;

use super::error::SqlError;
use super::types::SqlResult;

const NAME_COLUMN: &str = "name";
const COUNT_COLUMN: &str = "num_employees";

/// Optional company search criteria, deserialized straight from the list
/// endpoint's query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Build a parameterized WHERE clause for the present criteria.
    ///
    /// Fragments appear in fixed order (name, min, max) joined with `AND`;
    /// absent criteria are omitted entirely. The name match is a
    /// case-insensitive substring search: the pattern is wrapped `%...%`
    /// inside the bound parameter, never in the clause text. With no
    /// criteria the result is the empty string and the caller appends
    /// nothing.
    ///
    /// Parameters are numbered from `starting_param_index` so the clause
    /// can follow bindings the caller already made.
    pub fn to_where_sql(&self, starting_param_index: usize) -> Result<SqlResult, SqlError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(SqlError::InvalidBounds { min, max });
            }
        }

        let mut fragments = vec![];
        let mut params = vec![];
        let mut index = starting_param_index;

        if let Some(name) = &self.name {
            fragments.push(format!("\"{}\" ILIKE ${}", NAME_COLUMN, index));
            params.push(json!(format!("%{}%", name)));
            index += 1;
        }
        if let Some(min) = self.min_employees {
            fragments.push(format!("\"{}\" >= ${}", COUNT_COLUMN, index));
            params.push(json!(min));
            index += 1;
        }
        if let Some(max) = self.max_employees {
            fragments.push(format!("\"{}\" <= ${}", COUNT_COLUMN, index));
            params.push(json!(max));
        }

        if fragments.is_empty() {
            return Ok(SqlResult::empty());
        }

        Ok(SqlResult {
            query: format!("WHERE {}", fragments.join(" AND ")),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_criteria_yields_empty_clause() {
        let filter = CompanyFilter::default();
        let sql = filter.to_where_sql(1).unwrap();
        assert_eq!(sql.query, "");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(5),
            ..Default::default()
        };
        let err = filter.to_where_sql(1).unwrap_err();
        assert!(matches!(err, SqlError::InvalidBounds { min: 10, max: 5 }));
    }

    #[test]
    fn all_criteria_in_fixed_order() {
        let filter = CompanyFilter {
            name: Some("Se".to_string()),
            min_employees: Some(10),
            max_employees: Some(1000),
        };
        let sql = filter.to_where_sql(1).unwrap();
        assert_eq!(
            sql.query,
            r#"WHERE "name" ILIKE $1 AND "num_employees" >= $2 AND "num_employees" <= $3"#
        );
        assert_eq!(sql.params, vec![json!("%Se%"), json!(10), json!(1000)]);
    }

    #[test]
    fn name_only() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            ..Default::default()
        };
        let sql = filter.to_where_sql(1).unwrap();
        assert_eq!(sql.query, r#"WHERE "name" ILIKE $1"#);
        assert_eq!(sql.params, vec![json!("%net%")]);
    }

    #[test]
    fn min_only_keeps_the_bound() {
        let filter = CompanyFilter {
            min_employees: Some(50),
            ..Default::default()
        };
        let sql = filter.to_where_sql(1).unwrap();
        assert_eq!(sql.query, r#"WHERE "num_employees" >= $1"#);
        assert_eq!(sql.params, vec![json!(50)]);
    }

    #[test]
    fn max_only_skips_earlier_fragments_without_dangling_and() {
        let filter = CompanyFilter {
            max_employees: Some(300),
            ..Default::default()
        };
        let sql = filter.to_where_sql(1).unwrap();
        assert_eq!(sql.query, r#"WHERE "num_employees" <= $1"#);
        assert_eq!(sql.params, vec![json!(300)]);
    }

    #[test]
    fn starting_param_index_offsets_placeholders() {
        let filter = CompanyFilter {
            name: Some("Se".to_string()),
            min_employees: Some(2),
            ..Default::default()
        };
        let sql = filter.to_where_sql(3).unwrap();
        assert_eq!(sql.query, r#"WHERE "name" ILIKE $3 AND "num_employees" >= $4"#);
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let filter = CompanyFilter {
            min_employees: Some(7),
            max_employees: Some(7),
            ..Default::default()
        };
        let sql = filter.to_where_sql(1).unwrap();
        assert_eq!(
            sql.query,
            r#"WHERE "num_employees" >= $1 AND "num_employees" <= $2"#
        );
    }

    #[test]
    fn repeated_builds_are_identical() {
        let filter = CompanyFilter {
            name: Some("Se".to_string()),
            min_employees: Some(1),
            max_employees: Some(9),
        };
        let first = filter.to_where_sql(1).unwrap();
        let second = filter.to_where_sql(1).unwrap();
        assert_eq!(first.query, second.query);
        assert_eq!(first.params, second.params);
    }
}
