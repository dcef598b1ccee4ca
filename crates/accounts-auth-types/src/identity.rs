//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_access_token;

/// HMAC secret used to validate access tokens. Provide it from the router
/// state with `FromRef`.
#[derive(Clone)]
pub struct TokenSecret(pub Arc<str>);

impl TokenSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Rejection for requests without a valid bearer access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHORIZED",
            "message": "unauthorized",
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Caller identity resolved from `Authorization: Bearer <access token>`.
///
/// Rejects with 401 when the header is absent, not a bearer credential, or
/// the token fails validation (bad signature, expired, refresh token).
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    S: Send + Sync,
    TokenSecret: FromRef<S>,
{
    type Rejection = Unauthorized;

    // Resolve synchronously and hand back a 'static future; `async fn` here
    // would capture the `parts`/`state` lifetimes.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let result = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(Unauthorized)
            .and_then(|Authorization(bearer)| {
                validate_access_token(bearer.token(), &secret.0).map_err(|e| {
                    tracing::debug!(error = %e, "bearer token rejected");
                    Unauthorized
                })
            })
            .map(|info| Self {
                user_id: info.user_id,
            });

        async move { result }
    }
}
