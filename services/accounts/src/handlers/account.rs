use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use accounts_auth_types::identity::BearerIdentity;

use crate::error::AccountsServiceError;
use crate::handlers::MessageProfile;
use crate::state::AppState;
use crate::usecase::account::{
    AuthenticatedUser, ChangePasswordUseCase, CheckUsernameUseCase, LoginInput, LoginUseCase,
    PasswordChange, SignupInput, SignupUseCase, SuggestUsernamesUseCase, UpdateUsernameUseCase,
};

/// Signup and login response.
#[derive(Serialize)]
pub struct UserTokenProfile {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthenticatedUser> for UserTokenProfile {
    fn from(out: AuthenticatedUser) -> Self {
        Self {
            user_id: out.user.id,
            username: out.user.username,
            email: out.user.email,
            access_token: out.tokens.access_token,
            refresh_token: out.tokens.refresh_token,
        }
    }
}

// ── GET /api/v1/accounts/check/username/{username} ───────────────────────────

pub async fn check_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    let usecase = CheckUsernameUseCase {
        users: state.user_repo(),
    };
    let outcome = usecase.execute(&username).await?;
    Ok(Json(outcome.into()))
}

// ── POST /api/v1/accounts/suggest/username ───────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestUsernameRequest {
    pub name: String,
}

pub async fn suggest_username(
    State(state): State<AppState>,
    Json(body): Json<SuggestUsernameRequest>,
) -> Result<Json<Vec<String>>, AccountsServiceError> {
    let usecase = SuggestUsernamesUseCase {
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(&body.name).await?))
}

// ── PATCH /api/v1/accounts/change/username ───────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUsernameRequest {
    pub new_username: String,
}

pub async fn update_username(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(body): Json<UpdateUsernameRequest>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    let usecase = UpdateUsernameUseCase {
        users: state.user_repo(),
        social: state.social.clone(),
    };
    let outcome = usecase
        .execute(identity.user_id, &body.new_username)
        .await?;
    Ok(Json(outcome.into()))
}

// ── POST /api/v1/accounts/signup ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        tokens: state.token_issuer(),
        tasks: state.tasks.clone(),
    };

    let out = usecase
        .execute(SignupInput {
            username: body.username,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserTokenProfile::from(out))))
}

// ── POST /api/v1/accounts/login ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserTokenProfile>, AccountsServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        tokens: state.token_issuer(),
    };

    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(out.into()))
}

// ── PATCH /api/v1/accounts/change_password ───────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageProfile>, AccountsServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };

    let outcome = usecase
        .execute(
            identity.user_id,
            PasswordChange {
                old_password: body.old_password,
                new_password: body.new_password,
            },
        )
        .await?;

    Ok(Json(outcome.into()))
}
