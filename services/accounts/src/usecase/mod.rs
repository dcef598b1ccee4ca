pub mod account;
pub mod example;
pub mod otp;
pub mod token;

use accounts_domain::user::{is_valid_email, normalize_email};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::AccountsServiceError;

/// Resolve an email address to its user; `InvalidEmail` for malformed
/// input, `UserNotFound` when no account owns it.
pub(crate) async fn find_user_by_email<U: UserRepository>(
    users: &U,
    email: &str,
) -> Result<User, AccountsServiceError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(AccountsServiceError::InvalidEmail);
    }
    users
        .find_by_email(&email)
        .await?
        .ok_or(AccountsServiceError::UserNotFound)
}
