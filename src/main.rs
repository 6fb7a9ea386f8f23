use axum::middleware::from_fn;
use dotenvy::dotenv;
use std::sync::Arc;
use storage::Storage;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod components;
mod config;
mod controllers;
mod errors;
mod filter;
mod htmx;
mod middleware;
mod models;
mod navigation;
mod repository;
mod routes;
mod storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("notebook=info".parse()?),
        )
        .init();

    let config = config::Config::from_env()?;
    let storage = open_storage(&config).await?;
    let repo = repository::NoteRepository::open(storage).await;
    let state = models::AppState::new(repo);
    let app = routes::get_routes()
        .layer(from_fn(middleware::html_headers))
        .layer(from_fn(middleware::htmx_error_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("listening on {}", config.listen_addr);
    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

/// No Postgres configured means no durable store: the app still works, but
/// notes only live as long as the process.
async fn open_storage(
    config: &config::Config,
) -> anyhow::Result<Option<Arc<dyn Storage>>> {
    match &config.postgres_url {
        Some(url) => {
            let storage: Arc<dyn Storage> =
                Arc::new(storage::PgStorage::connect(url).await?);
            info!("using postgres storage");
            Ok(Some(storage))
        }
        None => {
            tracing::warn!(
                "POSTGRES_* not set; notes will be kept in memory only"
            );
            Ok(None)
        }
    }
}
