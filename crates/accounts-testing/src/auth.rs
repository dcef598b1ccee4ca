//! Bearer credentials for integration tests.
//!
//! `MockAuth` signs real access/refresh tokens with the test secret so the
//! service's `BearerIdentity` extractor runs unmodified.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use accounts_auth_types::token::{TokenKind, issue_token};

pub const TEST_TOKEN_SECRET: &str = "accounts-test-secret-for-tests-only";

pub struct MockAuth {
    pub user_id: Uuid,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            secret: TEST_TOKEN_SECRET.to_owned(),
        }
    }

    pub fn access_token(&self) -> String {
        issue_token(self.user_id, TokenKind::Access, 60, &self.secret)
            .unwrap()
            .token
    }

    pub fn refresh_token(&self) -> String {
        issue_token(self.user_id, TokenKind::Refresh, 600, &self.secret)
            .unwrap()
            .token
    }

    /// `Authorization: Bearer <access token>`.
    pub fn headers(&self) -> HeaderMap {
        bearer_headers(&self.access_token())
    }
}

pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    map
}
