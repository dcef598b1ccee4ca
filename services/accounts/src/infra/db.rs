use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use accounts_schema::{examples, otp_codes, users};

use crate::domain::repository::{ExampleRepository, OtpRepository, UserRepository};
use crate::domain::types::{Example, OTP_MAX_ATTEMPTS, OtpCode, User, UsernameChange};
use crate::error::AccountsServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AccountsServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AccountsServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count users by email")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AccountsServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<Vec<UsernameChange>, AccountsServiceError> {
        let txn = self.db.begin().await.context("begin username update")?;

        let current = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .context("find user for username update")?
            .ok_or(AccountsServiceError::UserNotFound)?;
        if current.username == username {
            return Ok(vec![]);
        }

        let taken = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Id.ne(user_id))
            .count(&txn)
            .await
            .context("check username owner")?;
        if taken > 0 {
            return Err(AccountsServiceError::UsernameTaken);
        }

        let updated = users::ActiveModel {
            id: Set(user_id),
            username: Set(username.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&txn)
        .await;
        match updated {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(AccountsServiceError::UsernameTaken),
            Err(e) => return Err(anyhow::Error::new(e).context("update username").into()),
        }

        txn.commit().await.context("commit username update")?;
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
        let result = users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .context("update password")?;
        if result.rows_affected == 0 {
            return Err(AccountsServiceError::UserNotFound);
        }
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn find_pending(&self, user_id: Uuid) -> Result<Option<OtpCode>, AccountsServiceError> {
        let now = Utc::now();
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::UserId.eq(user_id))
            .filter(otp_codes::Column::UsedAt.is_null())
            .filter(otp_codes::Column::ExpiresAt.gt(now))
            .filter(otp_codes::Column::Attempts.lt(OTP_MAX_ATTEMPTS as i32))
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find pending otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn create(&self, code: &OtpCode) -> Result<(), AccountsServiceError> {
        otp_codes::ActiveModel {
            id: Set(code.id),
            user_id: Set(code.user_id),
            code: Set(code.code.clone()),
            attempts: Set(code.attempts as i32),
            expires_at: Set(code.expires_at),
            used_at: Set(code.used_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create otp")?;
        Ok(())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, AccountsServiceError> {
        let result = otp_codes::Entity::update_many()
            .col_expr(otp_codes::Column::UsedAt, Expr::value(Utc::now()))
            .filter(otp_codes::Column::Id.eq(id))
            .filter(otp_codes::Column::UsedAt.is_null())
            .exec(&self.db)
            .await
            .context("mark otp used")?;
        Ok(result.rows_affected > 0)
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        otp_codes::Entity::update_many()
            .col_expr(
                otp_codes::Column::Attempts,
                Expr::col(otp_codes::Column::Attempts).add(1),
            )
            .filter(otp_codes::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("increment otp attempts")?;
        Ok(())
    }
}

fn otp_from_model(model: otp_codes::Model) -> OtpCode {
    OtpCode {
        id: model.id,
        user_id: model.user_id,
        code: model.code,
        attempts: model.attempts.max(0) as u32,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}

// ── Example repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbExampleRepository {
    pub db: DatabaseConnection,
}

impl ExampleRepository for DbExampleRepository {
    async fn create(&self, example: &Example) -> Result<(), AccountsServiceError> {
        let result = examples::ActiveModel {
            id: Set(example.id),
            name: Set(example.name.clone()),
            active: Set(example.active),
            created_at: Set(example.created_at),
            updated_at: Set(example.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AccountsServiceError::ExampleAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create example").into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Example>, AccountsServiceError> {
        let model = examples::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find example by id")?;
        Ok(model.map(Example::from))
    }
}

impl From<examples::Model> for Example {
    fn from(model: examples::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
