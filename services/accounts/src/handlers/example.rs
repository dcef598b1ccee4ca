use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use accounts_core::serde::opt_to_rfc3339_ms;

use crate::domain::types::Example;
use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::example::{CreateExampleInput, CreateExampleUseCase, GetExampleUseCase};

#[derive(Deserialize)]
pub struct ExampleCreate {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub active: bool,
}

#[derive(Serialize)]
pub struct ExampleView {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Example> for ExampleView {
    fn from(example: Example) -> Self {
        Self {
            id: example.id,
            name: example.name,
            active: example.active,
            created_at: example.created_at,
            updated_at: example.updated_at,
        }
    }
}

// ── POST /api/v1/examples ────────────────────────────────────────────────────

pub async fn create_example(
    State(state): State<AppState>,
    Json(body): Json<ExampleCreate>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = CreateExampleUseCase {
        repo: state.example_repo(),
    };
    let example = usecase
        .execute(CreateExampleInput {
            id: body.id,
            name: body.name,
            active: body.active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ExampleView::from(example))))
}

// ── GET /api/v1/examples/{id} ────────────────────────────────────────────────

pub async fn get_example(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExampleView>, AccountsServiceError> {
    let usecase = GetExampleUseCase {
        repo: state.example_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}
