use analytics::AnalyticsEngine;
use axum::{
    Router,
    routing::{get, post},
};
use engine::DashboardStore;
use events::DashboardSignal;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DashboardStore>,
    /// Feeds the signal loop that owns refreshes.
    pub signal_tx: mpsc::Sender<DashboardSignal>,
    pub engine: AnalyticsEngine,
}

impl AppState {
    pub fn new(store: Arc<DashboardStore>, signal_tx: mpsc::Sender<DashboardSignal>) -> Self {
        Self {
            store,
            signal_tx,
            engine: AnalyticsEngine::new(),
        }
    }
}

/// Builds the application router with its middleware.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/dashboard/forecast-series", get(handlers::get_forecast_series))
        .route("/api/dashboard/refresh", post(handlers::post_refresh))
        .route("/api/dashboard/reconfigured", post(handlers::post_reconfigured))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
