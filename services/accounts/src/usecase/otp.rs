use chrono::{Duration, Utc};
use rand::RngExt;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::domain::repository::{OtpRepository, TaskSubmitter, UserRepository};
use crate::domain::types::{BackgroundTask, MailMessage, OTP_LEN, OtpCode, Outcome};
use crate::error::AccountsServiceError;
use crate::infra::password::spawn_hash_password;
use crate::usecase::find_user_by_email;

pub const OTP_VERIFIED: &str = "OTP verified successfully";
pub const OTP_INVALID: &str = "Invalid OTP";
pub const OTP_MISSING: &str = "OTP expired or not found";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

// ── OtpGenerator ─────────────────────────────────────────────────────────────

/// Creates and checks one-time codes for a user.
pub struct OtpGenerator<O: OtpRepository> {
    pub codes: O,
    pub ttl_secs: i64,
}

impl<O: OtpRepository> OtpGenerator<O> {
    /// Return the user's pending code, or store and return a fresh one.
    pub async fn get_otp(&self, user_id: Uuid) -> Result<String, AccountsServiceError> {
        if let Some(pending) = self.codes.find_pending(user_id).await? {
            return Ok(pending.code);
        }

        let now = Utc::now();
        let code = OtpCode {
            id: Uuid::new_v4(),
            user_id,
            code: generate_code(),
            attempts: 0,
            expires_at: now + Duration::seconds(self.ttl_secs),
            used_at: None,
            created_at: now,
        };
        self.codes.create(&code).await?;
        Ok(code.code)
    }

    /// Compare `candidate` with the pending code. A match consumes the code;
    /// a mismatch counts against the attempt limit.
    pub async fn check_otp(
        &self,
        user_id: Uuid,
        candidate: &str,
    ) -> Result<Outcome, AccountsServiceError> {
        let Some(pending) = self.codes.find_pending(user_id).await? else {
            return Ok(Outcome::failure(OTP_MISSING));
        };

        let matches = pending.code.len() == candidate.len()
            && bool::from(pending.code.as_bytes().ct_eq(candidate.as_bytes()));
        if !matches {
            self.codes.increment_attempts(pending.id).await?;
            return Ok(Outcome::failure(OTP_INVALID));
        }

        // Conditional update; a concurrent check may have consumed it.
        if !self.codes.mark_used(pending.id).await? {
            return Ok(Outcome::failure(OTP_MISSING));
        }
        Ok(Outcome::success(OTP_VERIFIED))
    }
}

// ── SendOtp (verification + forgot password) ─────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Verification,
    PasswordReset,
}

impl OtpPurpose {
    fn mail(self, code: &str, recipient: String) -> MailMessage {
        let (subject, body) = match self {
            Self::Verification => (
                "OTP",
                format!("Complete your verification process with this OTP: {code}"),
            ),
            Self::PasswordReset => (
                "Forgot Password",
                format!(
                    "You requested to reset your password.\n\
                     Complete the process with this token: {code}"
                ),
            ),
        };
        MailMessage {
            subject: subject.to_owned(),
            body,
            recipients: vec![recipient],
        }
    }

    fn response(self) -> &'static str {
        match self {
            Self::Verification => "OTP has been sent to your email",
            Self::PasswordReset => "Password reset token has been sent to your email",
        }
    }
}

pub struct SendOtpInput {
    pub email: String,
    pub purpose: OtpPurpose,
}

pub struct SendOtpUseCase<U, O, T>
where
    U: UserRepository,
    O: OtpRepository,
    T: TaskSubmitter,
{
    pub users: U,
    pub otp: OtpGenerator<O>,
    pub tasks: T,
}

impl<U, O, T> SendOtpUseCase<U, O, T>
where
    U: UserRepository,
    O: OtpRepository,
    T: TaskSubmitter,
{
    pub async fn execute(&self, input: SendOtpInput) -> Result<Outcome, AccountsServiceError> {
        // 1. Resolve email → 404 before any code or mail exists
        let user = find_user_by_email(&self.users, &input.email).await?;

        // 2. Reuse or create the pending code
        let code = self.otp.get_otp(user.id).await?;

        // 3. Queue the mail; the response does not wait for delivery
        self.tasks
            .submit(BackgroundTask::SendMail(input.purpose.mail(&code, user.email)));

        Ok(Outcome::success(input.purpose.response()))
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

pub struct VerifyOtpUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otp: OtpGenerator<O>,
}

impl<U: UserRepository, O: OtpRepository> VerifyOtpUseCase<U, O> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<Outcome, AccountsServiceError> {
        let user = find_user_by_email(&self.users, &input.email).await?;
        self.otp.check_otp(user.id, &input.otp).await
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub const PASSWORD_RESET: &str = "Password reset successfully";

pub struct ResetPasswordInput {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otp: OtpGenerator<O>,
}

impl<U: UserRepository, O: OtpRepository> ResetPasswordUseCase<U, O> {
    pub async fn execute(
        &self,
        input: ResetPasswordInput,
    ) -> Result<Outcome, AccountsServiceError> {
        let user = find_user_by_email(&self.users, &input.email).await?;
        if !accounts_domain::user::is_acceptable_password(&input.new_password) {
            return Err(AccountsServiceError::WeakPassword);
        }

        let verdict = self.otp.check_otp(user.id, &input.token).await?;
        if !verdict.success {
            return Ok(verdict);
        }

        let hash = spawn_hash_password(input.new_password).await?;
        self.users.update_password(user.id, &hash).await?;
        Ok(Outcome::success(PASSWORD_RESET))
    }
}
