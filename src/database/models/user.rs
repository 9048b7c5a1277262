use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A directory account. The stored password digest lives only in the users
/// store; it is never part of this model or any response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}
