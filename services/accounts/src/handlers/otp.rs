use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::error::AccountsServiceError;
use crate::handlers::MessageProfile;
use crate::state::AppState;
use crate::usecase::otp::{
    OtpPurpose, ResetPasswordInput, ResetPasswordUseCase, SendOtpInput, SendOtpUseCase,
    VerifyOtpInput, VerifyOtpUseCase,
};

async fn send_code(
    state: AppState,
    email: String,
    purpose: OtpPurpose,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    let usecase = SendOtpUseCase {
        users: state.user_repo(),
        otp: state.otp_generator(),
        tasks: state.tasks.clone(),
    };
    let outcome = usecase.execute(SendOtpInput { email, purpose }).await?;
    Ok(Json(outcome.into()))
}

// ── GET /api/v1/accounts/otp/send/{email} ────────────────────────────────────

pub async fn send_otp(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    send_code(state, email, OtpPurpose::Verification).await
}

// ── GET /api/v1/accounts/forgot_password/{email} ─────────────────────────────

pub async fn forgot_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    send_code(state, email, OtpPurpose::PasswordReset).await
}

// ── POST /api/v1/accounts/otp/verify ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otp: state.otp_generator(),
    };
    let outcome = usecase
        .execute(VerifyOtpInput {
            email: body.email,
            otp: body.otp,
        })
        .await?;
    Ok(Json(outcome.into()))
}

// ── POST /api/v1/accounts/reset_password/{email} ─────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        otp: state.otp_generator(),
    };
    let outcome = usecase
        .execute(ResetPasswordInput {
            email,
            token: body.token,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(outcome.into()))
}
