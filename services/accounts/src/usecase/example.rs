use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::ExampleRepository;
use crate::domain::types::Example;
use crate::error::AccountsServiceError;

pub struct CreateExampleInput {
    pub id: Option<Uuid>,
    pub name: String,
    pub active: bool,
}

pub struct CreateExampleUseCase<R: ExampleRepository> {
    pub repo: R,
}

impl<R: ExampleRepository> CreateExampleUseCase<R> {
    pub async fn execute(&self, input: CreateExampleInput) -> Result<Example, AccountsServiceError> {
        let now = Utc::now();
        let example = Example {
            id: input.id.unwrap_or_else(Uuid::now_v7),
            name: input.name,
            active: input.active,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.repo.create(&example).await?;
        Ok(example)
    }
}

pub struct GetExampleUseCase<R: ExampleRepository> {
    pub repo: R,
}

impl<R: ExampleRepository> GetExampleUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Example, AccountsServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AccountsServiceError::ExampleNotFound)
    }
}
