//! CodeJudge - Application Entry Point
//!
//! This is the main entry point for the CodeJudge server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codejudge::{
    config::CONFIG,
    handlers,
    judge::{Judge, dispatcher::Dispatcher},
    sandbox::ProcessSandbox,
    seed,
    state::AppState,
    store::{MemoryStore, Store},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodeJudge server...");

    // Build the store and seed it with demo data
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    seed::seed_if_empty(store.as_ref()).await?;

    // Wire the evaluation pipeline
    let backend = Arc::new(ProcessSandbox::new(CONFIG.sandbox.clone()));
    let judge = Arc::new(Judge::new(store.clone(), backend));
    let dispatcher = Dispatcher::new(judge, CONFIG.judge.workers, CONFIG.judge.queue_capacity);
    tracing::info!(
        "Evaluation pipeline ready with {} workers, queue capacity {}",
        CONFIG.judge.workers,
        CONFIG.judge.queue_capacity
    );

    // Create application state
    let state = AppState::new(store, dispatcher);

    // Build the router
    let app = Router::new()
        .nest("/api/v1", handlers::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
