#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    BackgroundTask, Example, MailMessage, OtpCode, ProfileSeed, TokenPair, User, UsernameChange,
};
use crate::error::AccountsServiceError;

/// Repository for account records.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError>;
    async fn username_exists(&self, username: &str) -> Result<bool, AccountsServiceError>;
    async fn email_exists(&self, email: &str) -> Result<bool, AccountsServiceError>;

    /// Insert a new user. Unique violations map to `UserAlreadyExists`.
    async fn create(&self, user: &User) -> Result<(), AccountsServiceError>;

    /// Rename a user. Returns one change per record the social service must
    /// mirror, in propagation order; empty when the username is unchanged.
    ///
    /// Fails with `UserNotFound` or `UsernameTaken`.
    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<Vec<UsernameChange>, AccountsServiceError>;

    async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Store for one-time codes.
pub trait OtpRepository: Send + Sync {
    /// Newest pending (unused, unexpired, under attempt limit) code for a user.
    async fn find_pending(&self, user_id: Uuid) -> Result<Option<OtpCode>, AccountsServiceError>;
    async fn create(&self, code: &OtpCode) -> Result<(), AccountsServiceError>;
    /// Set `used_at = now` if the code is still unused. Returns `false` when
    /// another caller consumed it first.
    async fn mark_used(&self, id: Uuid) -> Result<bool, AccountsServiceError>;
    async fn increment_attempts(&self, id: Uuid) -> Result<(), AccountsServiceError>;
}

pub trait ExampleRepository: Send + Sync {
    /// Fails with `ExampleAlreadyExists` when the id is taken.
    async fn create(&self, example: &Example) -> Result<(), AccountsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Example>, AccountsServiceError>;
}

/// Token issuance and exchange.
pub trait TokenIssuer: Send + Sync {
    fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AccountsServiceError>;

    /// Exchange a refresh token for a new access token.
    /// Fails with `InvalidRefreshToken`.
    fn refresh_access(&self, refresh_token: &str) -> Result<String, AccountsServiceError>;

    /// Recover the user id from an access token. Fails with `InvalidToken`.
    fn decode_access(&self, access_token: &str) -> Result<Uuid, AccountsServiceError>;
}

/// Port for the social service that mirrors public profile data.
pub trait SocialPort: Send + Sync {
    async fn create_profile(&self, seed: &ProfileSeed) -> Result<(), AccountsServiceError>;
    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Outgoing mail transport.
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), AccountsServiceError>;
}

/// Fire-and-forget submission of post-response work.
///
/// Delivery is at-most-once and best effort: `submit` never blocks and never
/// reports whether the task eventually ran.
pub trait TaskSubmitter: Send + Sync {
    fn submit(&self, task: BackgroundTask);
}
