use sea_orm::Database;
use tracing::info;

use accounts::config::AccountsConfig;
use accounts::infra::mail::MailTransport;
use accounts::infra::social::HttpSocialClient;
use accounts::infra::tasks::{TaskQueue, TaskWorker};
use accounts::router::build_router;
use accounts::state::AppState;
use accounts_auth_types::identity::TokenSecret;
use accounts_core::config::Config;
use accounts_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let http = reqwest::Client::new();
    let social = HttpSocialClient::new(http.clone(), &config.social_base_url);
    let mailer = MailTransport::from_config(
        http,
        config.mail_api_url.as_deref(),
        &config.mail_from,
    );

    // Background tasks run detached; the worker exits once every queue handle is dropped.
    let (tasks, rx) = TaskQueue::channel();
    tokio::spawn(
        TaskWorker {
            rx,
            mailer,
            social: social.clone(),
        }
        .run(),
    );

    let state = AppState {
        db,
        token_secret: TokenSecret::new(config.jwt_secret),
        access_token_ttl_secs: config.access_token_ttl_secs,
        refresh_token_ttl_secs: config.refresh_token_ttl_secs,
        otp_ttl_secs: config.otp_ttl_secs,
        social,
        tasks,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
