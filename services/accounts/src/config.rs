use serde::Deserialize;

use accounts_auth_types::token::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use accounts_core::config::Config;

use crate::domain::types::DEFAULT_OTP_TTL_SECS;

/// Accounts service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing access and refresh tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3110). Env var: `ACCOUNTS_PORT`.
    #[serde(default = "default_accounts_port")]
    pub accounts_port: u16,
    /// Social service base URL (e.g. "http://social:3120"). Env var: `SOCIAL_BASE_URL`.
    pub social_base_url: String,
    /// Mail relay endpoint. Unset → mail is logged, not sent. Env var: `MAIL_API_URL`.
    #[serde(default)]
    pub mail_api_url: Option<String>,
    /// Sender address. Env var: `MAIL_FROM`.
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    #[serde(default = "default_otp_ttl_secs")]
    pub otp_ttl_secs: i64,
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_refresh_token_ttl_secs")]
    pub refresh_token_ttl_secs: u64,
}

impl Config for AccountsConfig {}

fn default_accounts_port() -> u16 {
    3110
}

fn default_mail_from() -> String {
    "no-reply@localhost".to_owned()
}

fn default_otp_ttl_secs() -> i64 {
    DEFAULT_OTP_TTL_SECS
}

fn default_access_token_ttl_secs() -> u64 {
    ACCESS_TOKEN_EXP
}

fn default_refresh_token_ttl_secs() -> u64 {
    REFRESH_TOKEN_EXP
}
