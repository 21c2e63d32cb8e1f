use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{auth, rides};
use crate::config::Config;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/ride/request", post(rides::request_ride))
        .route("/ride/accept", post(rides::accept_ride))
        .route("/ride/complete", post(rides::complete_ride))
        .route("/rides", get(rides::list_rides))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    let state = Arc::new(AppState { db: pool });
    let app = router(state);

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;

    tracing::info!("Server running on http://{}", config.bind_address);

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
