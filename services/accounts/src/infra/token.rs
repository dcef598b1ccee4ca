use uuid::Uuid;

use accounts_auth_types::identity::TokenSecret;
use accounts_auth_types::token::{
    TokenKind, issue_token, validate_access_token, validate_refresh_token,
};

use crate::domain::repository::TokenIssuer;
use crate::domain::types::TokenPair;
use crate::error::AccountsServiceError;

/// HS256 JWT issuer sharing its secret with the bearer extractor.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    pub secret: TokenSecret,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl JwtTokenIssuer {
    fn sign(&self, user_id: Uuid, kind: TokenKind, ttl: u64) -> Result<String, AccountsServiceError> {
        issue_token(user_id, kind, ttl, &self.secret.0)
            .map(|issued| issued.token)
            .map_err(|e| AccountsServiceError::Internal(e.into()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AccountsServiceError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, TokenKind::Access, self.access_ttl_secs)?,
            refresh_token: self.sign(user_id, TokenKind::Refresh, self.refresh_ttl_secs)?,
        })
    }

    fn refresh_access(&self, refresh_token: &str) -> Result<String, AccountsServiceError> {
        let info = validate_refresh_token(refresh_token, &self.secret.0)
            .map_err(|_| AccountsServiceError::InvalidRefreshToken)?;
        self.sign(info.user_id, TokenKind::Access, self.access_ttl_secs)
    }

    fn decode_access(&self, access_token: &str) -> Result<Uuid, AccountsServiceError> {
        validate_access_token(access_token, &self.secret.0)
            .map(|info| info.user_id)
            .map_err(|_| AccountsServiceError::InvalidToken)
    }
}
