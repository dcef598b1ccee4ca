use uuid::Uuid;

use crate::domain::repository::TokenIssuer;
use crate::error::AccountsServiceError;

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub user_id: Uuid,
    pub access_token: String,
    /// The caller's refresh token, returned unchanged. Refresh tokens are not rotated.
    pub refresh_token: String,
}

pub struct RefreshTokenUseCase<K: TokenIssuer> {
    pub tokens: K,
}

impl<K: TokenIssuer> RefreshTokenUseCase<K> {
    pub async fn execute(
        &self,
        refresh_token: String,
    ) -> Result<RefreshTokenOutput, AccountsServiceError> {
        let access_token = self.tokens.refresh_access(&refresh_token)?;
        let user_id = self.tokens.decode_access(&access_token)?;
        Ok(RefreshTokenOutput {
            user_id,
            access_token,
            refresh_token,
        })
    }
}
