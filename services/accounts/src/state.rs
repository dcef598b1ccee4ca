use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use accounts_auth_types::identity::TokenSecret;

use crate::infra::db::{DbExampleRepository, DbOtpRepository, DbUserRepository};
use crate::infra::social::HttpSocialClient;
use crate::infra::tasks::TaskQueue;
use crate::infra::token::JwtTokenIssuer;
use crate::usecase::otp::OtpGenerator;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub token_secret: TokenSecret,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub otp_ttl_secs: i64,
    pub social: HttpSocialClient,
    pub tasks: TaskQueue,
}

impl FromRef<AppState> for TokenSecret {
    fn from_ref(state: &AppState) -> Self {
        state.token_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn example_repo(&self) -> DbExampleRepository {
        DbExampleRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_generator(&self) -> OtpGenerator<DbOtpRepository> {
        OtpGenerator {
            codes: self.otp_repo(),
            ttl_secs: self.otp_ttl_secs,
        }
    }

    pub fn token_issuer(&self) -> JwtTokenIssuer {
        JwtTokenIssuer {
            secret: self.token_secret.clone(),
            access_ttl_secs: self.access_token_ttl_secs,
            refresh_ttl_secs: self.refresh_token_ttl_secs,
        }
    }
}
