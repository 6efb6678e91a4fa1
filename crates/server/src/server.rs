use axum::{
    Router,
    routing::{delete, get},
};

use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{dashboard, expenses, invoices};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn health() -> &'static str {
    "Finance Tracker API is running"
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/dashboard", get(dashboard::get_stats))
        .route("/api/invoices", get(invoices::list).post(invoices::create))
        .route(
            "/api/invoices/{id}",
            get(invoices::get)
                .put(invoices::update)
                .delete(invoices::delete),
        )
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/{id}", delete(expenses::delete))
        // the browser client is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the API router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

/// Bind `bind:port` and serve until the listener fails.
pub async fn run(engine: Engine, bind: &str, port: u16) {
    let listener = match tokio::net::TcpListener::bind((bind, port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {bind}:{port}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
