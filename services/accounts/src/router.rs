use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use accounts_core::health::healthz;
use accounts_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{change_password, check_username, login, signup, suggest_username, update_username},
    example::{create_example, get_example},
    health::readyz,
    otp::{forgot_password, reset_password, send_otp, verify_otp},
    token::refresh_token,
};
use crate::state::AppState;

fn account_routes() -> Router<AppState> {
    Router::new()
        // Username
        .route("/check/username/{username}", get(check_username))
        .route("/suggest/username", post(suggest_username))
        .route("/change/username", patch(update_username))
        // OTP
        .route("/otp/send/{email}", get(send_otp))
        .route("/otp/verify", post(verify_otp))
        // Signup / login
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh_token", post(refresh_token))
        // Password
        .route("/change_password", patch(change_password))
        .route("/forgot_password/{email}", get(forgot_password))
        .route("/reset_password/{email}", post(reset_password))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .nest("/api/v1/accounts", account_routes())
        // Examples
        .route("/api/v1/examples", post(create_example))
        .route("/api/v1/examples/{id}", get(get_example))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
