use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use swiftcab::config::AppConfig;
use swiftcab::db;
use swiftcab::router;
use swiftcab::services::distance::RandomDistanceEstimator;
use swiftcab::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        distance: Box::new(RandomDistanceEstimator),
    });

    let app = router::build(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
