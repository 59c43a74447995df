use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::domain::Role;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access tokens live for 72 hours.
pub const TOKEN_TTL_SECS: i64 = 72 * 60 * 60;

/// Why a token failed verification. Collapsed to a single generic 401 at the
/// gate; the distinction exists for logging and tests only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Mint a signed access token for a user with a 72-hour TTL.
pub fn mint_access_token(
    user_id: i64,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        role,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// Checks structure, signature, expiry, and that the declared algorithm is
/// the configured one (a token declaring any other algorithm is rejected, so
/// algorithm substitution cannot forge an assertion). Pure computation, no
/// I/O.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    // Default Validation already checks exp; pin algorithm to the configured one.
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
        jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        _ => TokenError::Malformed,
    })
}
