use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use accounts::domain::repository::{
    ExampleRepository, Mailer, OtpRepository, SocialPort, TaskSubmitter, TokenIssuer, UserRepository,
};
use accounts::domain::types::{
    BackgroundTask, Example, MailMessage, OtpCode, ProfileSeed, TokenPair, User, UsernameChange,
};
use accounts::error::AccountsServiceError;
use accounts::infra::password::hash_password;
use accounts::usecase::otp::OtpGenerator;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    /// `(user_id, password_hash)` for every `update_password` call.
    pub password_updates: Arc<Mutex<Vec<(Uuid, String)>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            password_updates: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn password_update_count(&self) -> usize {
        self.password_updates.lock().unwrap().len()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AccountsServiceError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AccountsServiceError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<Vec<UsernameChange>, AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username && u.id != user_id) {
            return Err(AccountsServiceError::UsernameTaken);
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AccountsServiceError::UserNotFound)?;
        if user.username == username {
            return Ok(vec![]);
        }
        user.username = username.to_owned();
        Ok(vec![UsernameChange {
            user_id,
            username: username.to_owned(),
        }])
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        self.password_updates
            .lock()
            .unwrap()
            .push((user_id, password_hash.to_owned()));
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == user_id) {
            user.password_hash = password_hash.to_owned();
        }
        Ok(())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOtpRepo {
    pub codes: Arc<Mutex<Vec<OtpCode>>>,
}

impl MockOtpRepo {
    pub fn new(codes: Vec<OtpCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.codes.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<OtpCode> {
        self.codes.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }

    pub fn generator(&self) -> OtpGenerator<MockOtpRepo> {
        OtpGenerator {
            codes: self.clone(),
            ttl_secs: 600,
        }
    }
}

impl OtpRepository for MockOtpRepo {
    async fn find_pending(&self, user_id: Uuid) -> Result<Option<OtpCode>, AccountsServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id && c.is_pending())
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn create(&self, code: &OtpCode) -> Result<(), AccountsServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, AccountsServiceError> {
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id && c.used_at.is_none()) {
            Some(c) => {
                c.used_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        if let Some(c) = self.codes.lock().unwrap().iter_mut().find(|c| c.id == id) {
            c.attempts += 1;
        }
        Ok(())
    }
}

// ── RendezvousOtpRepo ────────────────────────────────────────────────────────

/// Holds every `find_pending` caller until `parties` callers have read the
/// pending code, so concurrent checks race on `mark_used`.
#[derive(Clone)]
pub struct RendezvousOtpRepo {
    pub inner: MockOtpRepo,
    pub barrier: Arc<tokio::sync::Barrier>,
}

impl RendezvousOtpRepo {
    pub fn new(inner: MockOtpRepo, parties: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(tokio::sync::Barrier::new(parties)),
        }
    }
}

impl OtpRepository for RendezvousOtpRepo {
    async fn find_pending(&self, user_id: Uuid) -> Result<Option<OtpCode>, AccountsServiceError> {
        let pending = self.inner.find_pending(user_id).await?;
        self.barrier.wait().await;
        Ok(pending)
    }

    async fn create(&self, code: &OtpCode) -> Result<(), AccountsServiceError> {
        self.inner.create(code).await
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, AccountsServiceError> {
        self.inner.mark_used(id).await
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        self.inner.increment_attempts(id).await
    }
}

// ── MockExampleRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockExampleRepo {
    pub examples: Arc<Mutex<Vec<Example>>>,
}

impl MockExampleRepo {
    pub fn new(examples: Vec<Example>) -> Self {
        Self {
            examples: Arc::new(Mutex::new(examples)),
        }
    }
}

impl ExampleRepository for MockExampleRepo {
    async fn create(&self, example: &Example) -> Result<(), AccountsServiceError> {
        let mut examples = self.examples.lock().unwrap();
        if examples.iter().any(|e| e.id == example.id) {
            return Err(AccountsServiceError::ExampleAlreadyExists);
        }
        examples.push(example.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Example>, AccountsServiceError> {
        Ok(self
            .examples
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }
}

// ── MockSocial ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSocial {
    pub renames: Arc<Mutex<Vec<(Uuid, String)>>>,
    pub profiles: Arc<Mutex<Vec<ProfileSeed>>>,
    pub fail: bool,
}

impl MockSocial {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rename_count(&self) -> usize {
        self.renames.lock().unwrap().len()
    }
}

impl SocialPort for MockSocial {
    async fn create_profile(&self, seed: &ProfileSeed) -> Result<(), AccountsServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("social service unavailable").into());
        }
        self.profiles.lock().unwrap().push(seed.clone());
        Ok(())
    }

    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<(), AccountsServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("social service unavailable").into());
        }
        self.renames
            .lock()
            .unwrap()
            .push((user_id, username.to_owned()));
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<MailMessage>>>,
    pub fail: bool,
}

impl Mailer for MockMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), AccountsServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("mail relay unavailable").into());
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// ── RecordingTasks ───────────────────────────────────────────────────────────

/// Captures submitted tasks instead of running them.
#[derive(Clone, Default)]
pub struct RecordingTasks {
    pub tasks: Arc<Mutex<Vec<BackgroundTask>>>,
}

impl RecordingTasks {
    pub fn submitted(&self) -> Vec<BackgroundTask> {
        self.tasks.lock().unwrap().clone()
    }
}

impl TaskSubmitter for RecordingTasks {
    fn submit(&self, task: BackgroundTask) {
        self.tasks.lock().unwrap().push(task);
    }
}

// ── FakeTokenIssuer ──────────────────────────────────────────────────────────

/// Accepts exactly one refresh token and mints predictable access tokens.
pub struct FakeTokenIssuer {
    pub user_id: Uuid,
    pub accepted_refresh: String,
}

impl FakeTokenIssuer {
    pub fn accepting(user_id: Uuid, refresh_token: &str) -> Self {
        Self {
            user_id,
            accepted_refresh: refresh_token.to_owned(),
        }
    }
}

impl TokenIssuer for FakeTokenIssuer {
    fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AccountsServiceError> {
        Ok(TokenPair {
            access_token: format!("access-{user_id}"),
            refresh_token: format!("refresh-{user_id}"),
        })
    }

    fn refresh_access(&self, refresh_token: &str) -> Result<String, AccountsServiceError> {
        if refresh_token == self.accepted_refresh {
            Ok(format!("access-{}", self.user_id))
        } else {
            Err(AccountsServiceError::InvalidRefreshToken)
        }
    }

    fn decode_access(&self, access_token: &str) -> Result<Uuid, AccountsServiceError> {
        access_token
            .strip_prefix("access-")
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or(AccountsServiceError::InvalidToken)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        first_name: Some("Alice".to_owned()),
        last_name: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_otp(user_id: Uuid, code: &str) -> OtpCode {
    let now = Utc::now();
    OtpCode {
        id: Uuid::new_v4(),
        user_id,
        code: code.to_owned(),
        attempts: 0,
        expires_at: now + Duration::seconds(600),
        used_at: None,
        created_at: now,
    }
}
