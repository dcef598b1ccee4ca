use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
