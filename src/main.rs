use book_api::config::ServiceConfig;
use book_api::search::engine::SearchEngine;
use book_api::search::trace::TracingObserver;
use book_api::server::router::{ROUTES, build_router};
use book_api::storage::file_store::FileStore;
use book_api::storage::repository::FileBookRepository;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    // 1. Storage layer:
    let store = Arc::new(FileStore::open(&config.data_file)?);
    tracing::info!("Using data file {}", store.path().display());
    let repo = Arc::new(FileBookRepository::new(store));

    // 2. Search engine:
    let engine = Arc::new(
        SearchEngine::new(repo.clone())
            .with_config(config.search())
            .with_observer(Arc::new(TracingObserver)),
    );
    tracing::info!(
        "Parallel search threshold: {} books",
        engine.config().parallel_threshold
    );

    // 3. HTTP Router:
    let app = build_router(repo, engine);

    // 4. Start HTTP server:
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Starting server on {}", addr);
    tracing::info!("Available routes:");
    for (method, path) in ROUTES {
        tracing::info!("{:<6} {}", method, path);
    }
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down server...");
}
