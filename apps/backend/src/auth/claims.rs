//! Claims carried by backend-issued access tokens.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Claims included in our backend-issued access tokens.
///
/// Immutable once issued; a fresh login mints a new token rather than
/// mutating an old one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User id (users.id)
    pub sub: i64,
    pub role: Role,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
