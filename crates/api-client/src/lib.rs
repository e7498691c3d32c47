use crate::responses::{
    ApiErrorResponse, HealthResponse, RawCategorySales, RawForecastPayload, RawMonthlySales,
    RawProfit,
};
use async_trait::async_trait;
use configuration::ServiceConfig;
use core_types::{CategorySalesPoint, ForecastPayload, MonthlySalesPoint, ProfitPoint};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ApiError;

/// The read-only interface of the remote analytics service.
///
/// The aggregation engine only ever sees this trait, so a live HTTP client and an in-memory
/// stub are interchangeable.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Liveness probe. Any failure (network or non-2xx) is reported as an error.
    async fn check_health(&self) -> Result<(), ApiError>;

    /// Monthly sales totals, oldest first.
    async fn fetch_monthly_sales(&self) -> Result<Vec<MonthlySalesPoint>, ApiError>;

    /// The next-month forecast, as a single object or a list.
    async fn fetch_forecast(&self) -> Result<ForecastPayload, ApiError>;

    /// Sales per category, in rank order.
    async fn fetch_category_sales(&self) -> Result<Vec<CategorySalesPoint>, ApiError>;

    /// Profit per period.
    async fn fetch_profit_trend(&self) -> Result<Vec<ProfitPoint>, ApiError>;
}

/// A concrete implementation of `AnalyticsApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpAnalyticsClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpAnalyticsClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(status, &text),
            })
        }
    }
}

/// Picks the human-readable reason for a failed request: the body's `error` field when the
/// body is JSON and carries one, otherwise `HTTP <code>: <reason phrase>`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsClient {
    async fn check_health(&self) -> Result<(), ApiError> {
        let health: HealthResponse = self.get_json(&self.config.endpoints.health).await?;
        tracing::debug!(message = ?health.message, "Analytics service is up.");
        Ok(())
    }

    async fn fetch_monthly_sales(&self) -> Result<Vec<MonthlySalesPoint>, ApiError> {
        let rows: Vec<RawMonthlySales> = self.get_json(&self.config.endpoints.sales).await?;
        RawMonthlySales::into_points(rows)
    }

    async fn fetch_forecast(&self) -> Result<ForecastPayload, ApiError> {
        let raw: RawForecastPayload = self.get_json(&self.config.endpoints.forecast).await?;
        raw.try_into()
    }

    async fn fetch_category_sales(&self) -> Result<Vec<CategorySalesPoint>, ApiError> {
        let rows: Vec<RawCategorySales> =
            self.get_json(&self.config.endpoints.category_sales).await?;
        Ok(rows.into_iter().map(CategorySalesPoint::from).collect())
    }

    async fn fetch_profit_trend(&self) -> Result<Vec<ProfitPoint>, ApiError> {
        let rows: Vec<RawProfit> = self.get_json(&self.config.endpoints.profit_trend).await?;
        Ok(rows.into_iter().map(ProfitPoint::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "sales.csv not found"}"#,
        "sales.csv not found"
    )]
    #[case(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail": "boom"}"#,
        "HTTP 500: Internal Server Error"
    )]
    #[case(StatusCode::NOT_FOUND, "<html>not found</html>", "HTTP 404: Not Found")]
    #[case(StatusCode::BAD_GATEWAY, r#"{"error": ""}"#, "HTTP 502: Bad Gateway")]
    fn error_message_prefers_body_field(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(error_message(status, body), expected);
    }

    #[test]
    fn status_error_displays_its_message() {
        let err = ApiError::Status {
            status: 503,
            message: "HTTP 503: Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }
}
