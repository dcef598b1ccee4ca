use uuid::Uuid;

use accounts::error::AccountsServiceError;
use accounts::usecase::token::RefreshTokenUseCase;

use crate::helpers::FakeTokenIssuer;

#[tokio::test]
async fn should_echo_refresh_token() {
    let user_id = Uuid::new_v4();
    let usecase = RefreshTokenUseCase {
        tokens: FakeTokenIssuer::accepting(user_id, "R1"),
    };

    let out = usecase.execute("R1".to_owned()).await.unwrap();

    assert_eq!(out.refresh_token, "R1");
    assert_eq!(out.user_id, user_id);
    assert_eq!(out.access_token, format!("access-{user_id}"));
}

#[tokio::test]
async fn should_reject_unknown_refresh_token() {
    let usecase = RefreshTokenUseCase {
        tokens: FakeTokenIssuer::accepting(Uuid::new_v4(), "R1"),
    };

    let result = usecase.execute("R2".to_owned()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}
