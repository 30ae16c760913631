//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::AuthRole;

/// Which half of a token pair a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by tokens issued at register/login/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub role: AuthRole,
    pub token_type: TokenType,
    /// Unique token ID
    pub jti: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
