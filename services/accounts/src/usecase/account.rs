use chrono::Utc;
use rand::RngExt;
use uuid::Uuid;

use accounts_domain::user::{
    USERNAME_MIN_LEN, Username, is_acceptable_password, is_valid_email, normalize_email,
    username_slug,
};

use crate::domain::repository::{SocialPort, TaskSubmitter, TokenIssuer, UserRepository};
use crate::domain::types::{
    BackgroundTask, MAX_USERNAME_SUGGESTIONS, Outcome, ProfileSeed, TokenPair, User,
};
use crate::error::AccountsServiceError;
use crate::infra::password::{spawn_hash_password, spawn_verify_password};

/// Candidates generated per suggestion request before filtering.
const SUGGESTION_CANDIDATES: usize = 20;

// ── CheckUsername ────────────────────────────────────────────────────────────

pub const USERNAME_AVAILABLE: &str = "Username is available";
pub const USERNAME_TAKEN: &str = "Username is already taken";

pub struct CheckUsernameUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CheckUsernameUseCase<U> {
    pub async fn execute(&self, username: &str) -> Result<Outcome, AccountsServiceError> {
        let username = Username::parse(username)?;
        if self.users.username_exists(username.as_str()).await? {
            Ok(Outcome::failure(USERNAME_TAKEN))
        } else {
            Ok(Outcome::success(USERNAME_AVAILABLE))
        }
    }
}

// ── SuggestUsernames ─────────────────────────────────────────────────────────

/// Slug of `name` followed by slug + 2–4 digit suffixes, deduplicated.
fn candidate_usernames(name: &str) -> Vec<String> {
    let mut base = username_slug(name);
    if base.len() < USERNAME_MIN_LEN {
        base = if base.is_empty() {
            "user".to_owned()
        } else {
            format!("{base}_user")
        };
    }

    let mut rng = rand::rng();
    let mut candidates = vec![base.clone()];
    while candidates.len() < SUGGESTION_CANDIDATES {
        let digits = rng.random_range(2..=4u32);
        let suffix = rng.random_range(10u32.pow(digits - 1)..10u32.pow(digits));
        let candidate = format!("{base}{suffix}");
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

pub struct SuggestUsernamesUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SuggestUsernamesUseCase<U> {
    pub async fn execute(&self, name: &str) -> Result<Vec<String>, AccountsServiceError> {
        let mut suggestions = Vec::with_capacity(MAX_USERNAME_SUGGESTIONS);
        for candidate in candidate_usernames(name) {
            let Ok(username) = Username::parse(&candidate) else {
                continue;
            };
            if self.users.username_exists(username.as_str()).await? {
                continue;
            }
            suggestions.push(String::from(username));
            if suggestions.len() == MAX_USERNAME_SUGGESTIONS {
                break;
            }
        }
        Ok(suggestions)
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignupUseCase<U, K, T>
where
    U: UserRepository,
    K: TokenIssuer,
    T: TaskSubmitter,
{
    pub users: U,
    pub tokens: K,
    pub tasks: T,
}

impl<U, K, T> SignupUseCase<U, K, T>
where
    U: UserRepository,
    K: TokenIssuer,
    T: TaskSubmitter,
{
    pub async fn execute(
        &self,
        input: SignupInput,
    ) -> Result<AuthenticatedUser, AccountsServiceError> {
        let username = Username::parse(&input.username)?;
        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(AccountsServiceError::InvalidEmail);
        }
        if !is_acceptable_password(&input.password) {
            return Err(AccountsServiceError::WeakPassword);
        }
        if self.users.email_exists(&email).await?
            || self.users.username_exists(username.as_str()).await?
        {
            return Err(AccountsServiceError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: username.into(),
            email,
            password_hash: spawn_hash_password(input.password).await?,
            first_name: input.first_name,
            last_name: input.last_name,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let tokens = self.tokens.issue_pair(user.id)?;

        self.tasks.submit(BackgroundTask::CreateProfile(ProfileSeed {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }));

        Ok(AuthenticatedUser { user, tokens })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository, K: TokenIssuer> {
    pub users: U,
    pub tokens: K,
}

impl<U: UserRepository, K: TokenIssuer> LoginUseCase<U, K> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthenticatedUser, AccountsServiceError> {
        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(AccountsServiceError::InvalidCredential)?;

        if !spawn_verify_password(user.password_hash.clone(), input.password).await? {
            return Err(AccountsServiceError::InvalidCredential);
        }

        let tokens = self.tokens.issue_pair(user.id)?;
        Ok(AuthenticatedUser { user, tokens })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub const PASSWORD_CHANGED: &str = "Password changed successfully";
pub const OLD_PASSWORD_INCORRECT: &str = "Old password is incorrect";

pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        change: PasswordChange,
    ) -> Result<Outcome, AccountsServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)?;

        if !spawn_verify_password(user.password_hash.clone(), change.old_password).await? {
            return Ok(Outcome::failure(OLD_PASSWORD_INCORRECT));
        }
        if !is_acceptable_password(&change.new_password) {
            return Err(AccountsServiceError::WeakPassword);
        }

        let hash = spawn_hash_password(change.new_password).await?;
        self.users.update_password(user.id, &hash).await?;
        Ok(Outcome::success(PASSWORD_CHANGED))
    }
}

// ── UpdateUsername ───────────────────────────────────────────────────────────

pub struct UpdateUsernameUseCase<U: UserRepository, S: SocialPort> {
    pub users: U,
    pub social: S,
}

impl<U: UserRepository, S: SocialPort> UpdateUsernameUseCase<U, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        new_username: &str,
    ) -> Result<Outcome, AccountsServiceError> {
        let username = Username::parse(new_username)?;

        let changes = self
            .users
            .update_username(user_id, username.as_str())
            .await?;

        // Propagate in order, one call per change, before answering.
        for change in &changes {
            self.social
                .update_username(change.user_id, &change.username)
                .await?;
        }

        Ok(Outcome::success(format!("Username updated to {username}")))
    }
}
