//! Authentication for the Jobboard API
//!
//! Issues and validates access/refresh token pairs, hashes passwords, and
//! provides axum extractors that work with any domain state implementing
//! `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod password;
mod types;

pub use backend::AuthBackend;
pub use claims::{TokenClaims, TokenType};
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{AuthUser, EmployerUser, MaybeAuthUser};
pub use jwt::TokenPair;
pub use types::{AuthIdentity, AuthRole};
