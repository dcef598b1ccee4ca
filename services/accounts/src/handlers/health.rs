use axum::{extract::State, http::StatusCode};
use tracing::warn;

use crate::state::AppState;

/// `GET /readyz`: ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            warn!(error = %e, "readiness check failed: database unreachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
