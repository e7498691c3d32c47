use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("A refresh is already in progress")]
    RefreshInProgress,
    #[error("The dashboard signal loop is not running")]
    SignalChannelClosed,
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RefreshInProgress => StatusCode::CONFLICT,
            AppError::SignalChannelClosed => {
                tracing::error!("Dashboard signal channel is closed.");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            AppError::NotFound("no forecast".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::RefreshInProgress.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::SignalChannelClosed.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
