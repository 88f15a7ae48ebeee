//! Patient gateway entry point.

use std::sync::Arc;

use common::config::{AppConfig, Credentials};
use gateway::service::PgDataAccess;
use gateway::state::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "gateway";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::load(DEFAULT_PORT);

    // Credentials are assembled exactly once; a missing field is fatal here.
    let credentials =
        Credentials::from_env(&config.database).expect("invalid database credential configuration");

    let state = AppState::new(config.clone(), Arc::new(PgDataAccess::new(credentials)));
    let app = gateway::create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "starting gateway");

    let listener = TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
