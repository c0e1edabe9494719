//! Authentication module
//!
//! JWT validation at the HTTP boundary:
//! - [`JwtService`] - token validation and minting
//! - [`CurrentUser`] - authenticated principal
//! - [`require_auth`] - authentication middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
