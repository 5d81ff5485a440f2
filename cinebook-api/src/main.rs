use std::net::SocketAddr;
use std::sync::Arc;

use cinebook_api::{app, AppState};
use cinebook_store::{seed, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinebook_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cinebook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Cinebook API on port {}", config.server.port);

    // Explicit startup: connect, migrate, seed. A broken database URL
    // fails the process here instead of on the first request.
    let store = PgStore::connect(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    store.migrate().await.expect("Failed to run migrations");
    seed::ensure_seed_data(&store)
        .await
        .expect("Failed to seed database");

    let state = AppState::from_store(Arc::new(store), config.booking.clone());
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
