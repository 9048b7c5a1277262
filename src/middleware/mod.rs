pub mod auth;
pub mod guards;
pub mod response;

pub use auth::{authenticate, AuthSession, AuthUser};
pub use guards::{require_admin, require_admin_or_self, require_authenticated};
pub use response::{ApiResponse, ApiResult, IntoApiResponse};
