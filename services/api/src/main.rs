use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use hrdesk_api::config::ApiConfig;
use hrdesk_api::infra::blob::FsBlobStore;
use hrdesk_api::infra::password::BcryptHasher;
use hrdesk_api::infra::sms::HttpSmsGateway;
use hrdesk_api::router::build_router;
use hrdesk_api::state::AppState;
use hrdesk_auth_types::bearer::JwtSecret;

#[tokio::main]
async fn main() {
    hrdesk_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client");
    let sms = HttpSmsGateway::new(http, &config.sms_gateway_url, config.sms_template)
        .expect("invalid SMS_GATEWAY_URL");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        sms,
        blobs: FsBlobStore::new(config.image_dir),
        hasher: BcryptHasher::default(),
        public_base_url: Arc::from(config.public_base_url),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
