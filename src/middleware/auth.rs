use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, Claims};
use crate::config;

/// Verified identity extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
    pub issued_at: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            is_admin: claims.is_admin,
            issued_at: claims.iat,
        }
    }
}

/// Per-request identity context. `None` means the request is anonymous -
/// either no credential was supplied or the supplied one failed
/// verification. Created once by [`authenticate`], read-only afterward.
#[derive(Clone, Debug, Default)]
pub struct AuthSession(pub Option<AuthUser>);

/// Soft-fail authentication middleware, applied to every route.
///
/// A missing header is not an error; neither is a malformed, forged, or
/// expired token - all of them leave the request anonymous and let the
/// authorization guards decide whether that is acceptable for the route.
pub async fn authenticate(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    let identity = bearer_token(&headers).and_then(|token| {
        match verify_token(&token, &config::config().security.jwt_secret) {
            Ok(claims) => Some(AuthUser::from(claims)),
            Err(e) => {
                // No signal to the client, but keep one for operators
                tracing::debug!("Discarding unverifiable bearer token: {}", e);
                None
            }
        }
    });

    request.extensions_mut().insert(AuthSession(identity));
    next.run(request).await
}

/// Pull the bearer token out of the Authorization header, if any.
///
/// Strips a case-insensitive `Bearer ` prefix and surrounding whitespace.
/// A header without the prefix is passed through trimmed; verification
/// will reject it if it is not a valid token.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;

    let token = if auth_str.len() >= 7 && auth_str[..7].eq_ignore_ascii_case("bearer ") {
        &auth_str[7..]
    } else {
        auth_str
    };

    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
