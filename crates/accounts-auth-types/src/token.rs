//! JWT access/refresh token issuance and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access-token lifetime in seconds (4 hours).
pub const ACCESS_TOKEN_EXP: u64 = 14400;

/// Default refresh-token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_EXP: u64 = 604800;

/// Which side of the token pair a JWT belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Errors returned by token validation and issuance.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("unexpected token kind")]
    WrongKind,
    #[error("token encoding failed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `kind` | custom `typ` | `access` or `refresh` |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    pub exp: u64,
}

/// User identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub exp: u64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign a token of `kind` for `user_id`, valid for `ttl_secs`.
pub fn issue_token(
    user_id: Uuid,
    kind: TokenKind,
    ttl_secs: u64,
    secret: &str,
) -> Result<IssuedToken, AuthError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        kind,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Encoding)?;
    Ok(IssuedToken { token, exp })
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Validation: HS256, exp checked, required claims `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

fn validate_kind(token: &str, secret: &str, kind: TokenKind) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.kind != kind {
        return Err(AuthError::WrongKind);
    }
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        exp: claims.exp,
    })
}

/// Validate a bearer access token.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_kind(token, secret, TokenKind::Access)
}

/// Validate a refresh token. Access tokens are rejected with [`AuthError::WrongKind`].
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_kind(token, secret, TokenKind::Refresh)
}
