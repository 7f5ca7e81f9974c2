pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{optional_claims, AuthenticatedUser};
pub use utils::{
    authenticate_bearer, extract_claims_from_context, require_allowed_domain, require_owner,
};
