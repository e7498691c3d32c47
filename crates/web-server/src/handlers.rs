use crate::{AppState, error::AppError};
use analytics::{
    DashboardReport, ForecastSeries, ProfitBar, SeriesPoint,
    series::{forecast_series, profit_series, sales_series},
};
use axum::{Json, extract::State, http::StatusCode};
use events::{DashboardSignal, DashboardState};
use serde::Serialize;
use std::sync::Arc;

/// Chart-ready points for the sales line and the profit bars.
#[derive(Debug, Serialize)]
pub struct DashboardCharts {
    pub sales: Vec<SeriesPoint>,
    pub profit: Vec<ProfitBar>,
}

/// The current snapshot together with the figures and chart series derived from it.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub state: DashboardState,
    pub report: DashboardReport,
    pub charts: DashboardCharts,
}

/// # GET /api/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let snapshot = state.store.snapshot();
    let report = state.engine.calculate(
        &snapshot.sales,
        snapshot.forecast.as_ref(),
        &snapshot.categories,
        &snapshot.profit,
    );

    let charts = DashboardCharts {
        sales: sales_series(&snapshot.sales),
        profit: profit_series(&snapshot.profit),
    };

    Json(DashboardResponse {
        state: DashboardState::clone(&snapshot),
        report,
        charts,
    })
}

/// # GET /api/dashboard/forecast-series
/// The historical, continuation and regression lines for the forecast chart.
pub async fn get_forecast_series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ForecastSeries>, AppError> {
    let snapshot = state.store.snapshot();
    let forecast = snapshot
        .forecast
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No forecast is available".to_string()))?;

    Ok(Json(forecast_series(forecast)))
}

/// # POST /api/dashboard/refresh
/// Queues a refresh. Rejected while the current snapshot is still loading.
pub async fn post_refresh(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    if state.store.snapshot().loading {
        return Err(AppError::RefreshInProgress);
    }
    send_signal(&state, DashboardSignal::Refresh).await
}

/// # POST /api/dashboard/reconfigured
/// Called by the upload workflow after the active dataset has been replaced.
pub async fn post_reconfigured(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    send_signal(&state, DashboardSignal::DataReconfigured).await
}

async fn send_signal(state: &AppState, signal: DashboardSignal) -> Result<StatusCode, AppError> {
    state
        .signal_tx
        .send(signal)
        .await
        .map_err(|_| AppError::SignalChannelClosed)?;
    tracing::debug!(?signal, "Queued dashboard signal.");
    Ok(StatusCode::ACCEPTED)
}
