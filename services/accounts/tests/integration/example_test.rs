use uuid::Uuid;

use accounts::error::AccountsServiceError;
use accounts::usecase::example::{CreateExampleInput, CreateExampleUseCase, GetExampleUseCase};

use crate::helpers::MockExampleRepo;

// ── CreateExampleUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_client_supplied_id() {
    let repo = MockExampleRepo::default();
    let id = Uuid::new_v4();
    let usecase = CreateExampleUseCase { repo: repo.clone() };

    let example = usecase
        .execute(CreateExampleInput {
            id: Some(id),
            name: "sample".to_owned(),
            active: true,
        })
        .await
        .unwrap();

    assert_eq!(example.id, id);
    assert_eq!(example.name, "sample");
    assert!(example.active);
    assert_eq!(repo.examples.lock().unwrap()[0].id, id);
}

#[tokio::test]
async fn should_generate_id_and_timestamps() {
    let repo = MockExampleRepo::default();
    let usecase = CreateExampleUseCase { repo: repo.clone() };

    let example = usecase
        .execute(CreateExampleInput {
            id: None,
            name: "generated".to_owned(),
            active: false,
        })
        .await
        .unwrap();

    assert!(!example.id.is_nil());
    assert_eq!(example.id.get_version_num(), 7);
    assert!(example.created_at.is_some());
    assert_eq!(example.created_at, example.updated_at);
    assert_eq!(repo.examples.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_example_id() {
    let repo = MockExampleRepo::default();
    let id = Uuid::new_v4();
    let usecase = CreateExampleUseCase { repo: repo.clone() };
    let input = |name: &str| CreateExampleInput {
        id: Some(id),
        name: name.to_owned(),
        active: true,
    };

    usecase.execute(input("first")).await.unwrap();
    let result = usecase.execute(input("second")).await;

    assert!(
        matches!(result, Err(AccountsServiceError::ExampleAlreadyExists)),
        "expected ExampleAlreadyExists, got {result:?}"
    );
    let stored = repo.examples.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "first");
}

// ── GetExampleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_stored_example() {
    let repo = MockExampleRepo::default();
    let created = CreateExampleUseCase { repo: repo.clone() }
        .execute(CreateExampleInput {
            id: None,
            name: "lookup".to_owned(),
            active: true,
        })
        .await
        .unwrap();

    let found = GetExampleUseCase { repo }.execute(created.id).await.unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "lookup");
}

#[tokio::test]
async fn should_return_not_found_for_missing_example() {
    let usecase = GetExampleUseCase {
        repo: MockExampleRepo::new(vec![]),
    };
    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::ExampleNotFound)),
        "expected ExampleNotFound, got {result:?}"
    );
}
