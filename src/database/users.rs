use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::sql::{update_set, ColumnMap};

use super::manager::DatabaseManager;
use super::models::User;
use super::{bind_param_query_as, reject_unknown_fields};

static COLUMNS: Lazy<ColumnMap> = Lazy::new(|| {
    HashMap::from([
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ])
});

const UPDATABLE_FIELDS: &[&str] = &["firstName", "lastName", "password", "email"];

const RETURNING: &str = "username, first_name, last_name, email, is_admin";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Row shape for credential checks; the digest never leaves this module.
#[derive(sqlx::FromRow)]
struct StoredUser {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    is_admin: bool,
    password: String,
}

impl From<StoredUser> for User {
    fn from(stored: StoredUser) -> Self {
        Self {
            username: stored.username,
            first_name: stored.first_name,
            last_name: stored.last_name,
            email: stored.email,
            is_admin: stored.is_admin,
        }
    }
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Persistence glue for the users table.
pub struct UserStore;

impl UserStore {
    /// Insert a user; the username must be unused. The password is
    /// digested before storage.
    pub async fn create(input: NewUser) -> Result<User, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let duplicate = sqlx::query("SELECT username FROM users WHERE username = $1")
            .bind(&input.username)
            .fetch_optional(&pool)
            .await?;
        if duplicate.is_some() {
            return Err(ApiError::bad_request(format!("Duplicate username: {}", input.username)));
        }

        let query = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            RETURNING
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(hash_password(&input.password))
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.is_admin)
            .fetch_one(&pool)
            .await?;

        Ok(user)
    }

    /// Check a username/password pair. Unknown user and wrong password
    /// fail identically, with no hint which it was.
    pub async fn authenticate(username: &str, password: &str) -> Result<User, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let query = format!("SELECT {}, password FROM users WHERE username = $1", RETURNING);
        let stored = sqlx::query_as::<_, StoredUser>(&query)
            .bind(username)
            .fetch_optional(&pool)
            .await?;

        if let Some(stored) = stored {
            if stored.password == hash_password(password) {
                return Ok(stored.into());
            }
        }
        Err(ApiError::unauthorized("Invalid username/password"))
    }

    pub async fn find_all() -> Result<Vec<User>, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let query = format!("SELECT {} FROM users ORDER BY username", RETURNING);
        Ok(sqlx::query_as::<_, User>(&query).fetch_all(&pool).await?)
    }

    pub async fn get(username: &str) -> Result<User, ApiError> {
        let pool = DatabaseManager::pool().await?;

        let query = format!("SELECT {} FROM users WHERE username = $1", RETURNING);
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No user: {}", username)))
    }

    /// Partial update. A supplied password is digested before the SET
    /// clause is built, so the plaintext never reaches a statement param.
    pub async fn update(username: &str, mut payload: Map<String, Value>) -> Result<User, ApiError> {
        reject_unknown_fields(&payload, UPDATABLE_FIELDS)?;

        if let Some(value) = payload.get("password") {
            let plain = value
                .as_str()
                .ok_or_else(|| ApiError::bad_request("password must be a string"))?;
            let digest = hash_password(plain);
            payload.insert("password".to_string(), json!(digest));
        }

        let set = update_set(&payload, &COLUMNS)?;

        let pool = DatabaseManager::pool().await?;
        let query = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {}",
            set.query,
            set.params.len() + 1,
            RETURNING
        );

        let mut q = sqlx::query_as::<_, User>(&query);
        for p in set.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q.bind(username)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No user: {}", username)))
    }

    pub async fn remove(username: &str) -> Result<(), ApiError> {
        let pool = DatabaseManager::pool().await?;

        let deleted = sqlx::query("DELETE FROM users WHERE username = $1 RETURNING username")
            .bind(username)
            .fetch_optional(&pool)
            .await?;
        if deleted.is_none() {
            return Err(ApiError::not_found(format!("No user: {}", username)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_is_stable_hex() {
        let digest = hash_password("password1");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, hash_password("password1"));
        assert_ne!(digest, hash_password("password2"));
    }
}
