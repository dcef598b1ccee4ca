use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::token::RefreshTokenUseCase;

// ── POST /api/v1/accounts/refresh_token ──────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshTokenResponse {
    pub user_id: uuid::Uuid,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, AccountsServiceError> {
    let usecase = RefreshTokenUseCase {
        tokens: state.token_issuer(),
    };
    let out = usecase.execute(body.refresh_token).await?;
    Ok(Json(RefreshTokenResponse {
        user_id: out.user_id,
        access_token: out.access_token,
        refresh_token: out.refresh_token,
    }))
}
