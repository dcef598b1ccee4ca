use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account record owned by the accounts service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-time code tied to a single user.
#[derive(Debug, Clone)]
pub struct OtpCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub attempts: u32,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// Unused, unexpired, and still below the attempt limit.
    pub fn is_pending(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now() && self.attempts < OTP_MAX_ATTEMPTS
    }
}

/// A username change that must be mirrored to the social service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameChange {
    pub user_id: Uuid,
    pub username: String,
}

/// Result of a check that reports failure as a value: OTP verification,
/// password reset, password change, username availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub success: bool,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

/// Access/refresh token pair for a freshly authenticated user.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Outgoing email handed to the background worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<String>,
}

/// Profile data pushed to the social service after signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSeed {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Work executed after the response has been produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundTask {
    SendMail(MailMessage),
    CreateProfile(ProfileSeed),
}

impl BackgroundTask {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SendMail(_) => "send_mail",
            Self::CreateProfile(_) => "create_profile",
        }
    }
}

/// Persisted example record.
#[derive(Debug, Clone)]
pub struct Example {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Number of digits in a one-time code.
pub const OTP_LEN: usize = 6;

/// Wrong guesses allowed before a code stops being pending.
pub const OTP_MAX_ATTEMPTS: u32 = 5;

/// Default one-time code time-to-live in seconds.
pub const DEFAULT_OTP_TTL_SECS: i64 = 600;

/// Maximum number of usernames returned by the suggestion endpoint.
pub const MAX_USERNAME_SUGGESTIONS: usize = 5;
