//! Authorization guards.
//!
//! Stateless predicates over the per-request identity; each protected
//! handler invokes exactly one at the top of its body and short-circuits
//! with `?`. Authentication (who the caller is) happens earlier, in the
//! soft-fail middleware; these decide whether that caller may continue.

use crate::error::ApiError;

use super::auth::AuthUser;

/// Allow any verified identity.
pub fn require_authenticated(session: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    session.ok_or_else(|| ApiError::unauthorized("Authentication required"))
}

/// Allow only identities carrying the admin flag.
pub fn require_admin(session: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    match session {
        Some(user) if user.is_admin => Ok(user),
        _ => Err(ApiError::unauthorized("Admin privileges required")),
    }
}

/// Allow admins, or the user whose own record is being addressed.
pub fn require_admin_or_self<'a>(
    session: Option<&'a AuthUser>,
    username: &str,
) -> Result<&'a AuthUser, ApiError> {
    match session {
        Some(user) if user.is_admin || user.username == username => Ok(user),
        _ => Err(ApiError::unauthorized("Admin privileges or account ownership required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, is_admin: bool) -> AuthUser {
        AuthUser {
            username: username.to_string(),
            is_admin,
            issued_at: 1_666_393_780,
        }
    }

    #[test]
    fn all_guards_deny_anonymous_requests() {
        assert!(require_authenticated(None).is_err());
        assert!(require_admin(None).is_err());
        assert!(require_admin_or_self(None, "maya1").is_err());
    }

    #[test]
    fn authenticated_allows_any_identity() {
        let u = user("maya1", false);
        assert_eq!(require_authenticated(Some(&u)).unwrap().username, "maya1");
    }

    #[test]
    fn admin_denies_non_admin_regardless_of_subject() {
        let u = user("maya1", false);
        assert!(require_admin(Some(&u)).is_err());
    }

    #[test]
    fn admin_allows_admin() {
        let u = user("root", true);
        assert!(require_admin(Some(&u)).is_ok());
    }

    #[test]
    fn admin_or_self_allows_matching_subject() {
        let u = user("maya1", false);
        assert!(require_admin_or_self(Some(&u), "maya1").is_ok());
    }

    #[test]
    fn admin_or_self_denies_mismatched_non_admin() {
        let u = user("maya1", false);
        assert!(require_admin_or_self(Some(&u), "other").is_err());
    }

    #[test]
    fn admin_or_self_allows_admin_for_any_subject() {
        let u = user("root", true);
        assert!(require_admin_or_self(Some(&u), "other").is_ok());
    }

    #[test]
    fn denials_map_to_401() {
        let err = require_admin(None).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
