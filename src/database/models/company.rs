use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A directory entry. `handle` is the stable primary key; `name` is the
/// display name clients search on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}
