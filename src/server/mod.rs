pub mod api;

use crate::error::Result;
use crate::services::SharedDataStore;
use axum::{extract::FromRef, routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub data: SharedDataStore,
}

impl FromRef<AppState> for SharedDataStore {
    fn from_ref(app_state: &AppState) -> SharedDataStore {
        app_state.data.clone()
    }
}

/// Build the API router
pub fn router(data: SharedDataStore) -> Router {
    // Browser front-ends may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/stocks", get(api::get_sectors_handler))
        .route("/api/stocks/", get(api::missing_ticker_handler))
        .route("/api/stocks/{ticker}", get(api::get_stocks_handler))
        .fallback(api::not_found_handler)
        .layer(cors)
        .with_state(AppState { data })
}

/// Serve the API on an already bound listener until the process stops
pub async fn serve_on(listener: TcpListener, data: SharedDataStore) -> Result<()> {
    let app = router(data);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the axum server on all interfaces
pub async fn serve(data: SharedDataStore, port: u16) -> Result<()> {
    tracing::info!("Registering routes:");
    tracing::info!("  GET /api/stocks");
    tracing::info!("  GET /api/stocks/{{ticker}}?period=7D");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    serve_on(listener, data).await
}
