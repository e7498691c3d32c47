use crate::error::ApiError;
use core_types::{
    CategorySalesPoint, ConfidenceMetrics, ForecastComponents, ForecastPayload, ForecastResult,
    MonthlySalesPoint, ProfitPoint, Provenance, TrendAnalysis, YearMonth,
};
use serde::Deserialize;
use std::collections::BTreeMap;

// The service is a pandas backend: column names arrive capitalised (`Month`, `Sales`), nested
// objects in snake_case.

/// One row of `GET /sales`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMonthlySales {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Sales")]
    pub sales: f64,
}

/// One row of `GET /category-sales`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategorySales {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sales")]
    pub sales: f64,
}

/// One row of `GET /profit-trend`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfit {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Profit")]
    pub profit: f64,
}

/// The body of `GET /forecast`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub forecast: f64,
    pub method: String,
    #[serde(default)]
    pub last_3_months: BTreeMap<String, f64>,
    pub data_source: Option<String>,
    pub forecast_period: Option<String>,
    pub forecast_components: Option<ForecastComponents>,
    pub trend_analysis: Option<TrendAnalysis>,
    pub confidence_metrics: Option<ConfidenceMetrics>,
}

/// `GET /forecast` has been seen answering with a bare object and with a one-element list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawForecastPayload {
    Many(Vec<RawForecast>),
    Single(RawForecast),
}

/// Represents an error response from the analytics service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<String>,
}

/// The liveness probe answer of `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub message: Option<String>,
}

fn parse_period(raw: &str) -> Result<YearMonth, ApiError> {
    raw.parse()
        .map_err(|e: core_types::CoreError| ApiError::InvalidData(e.to_string()))
}

impl RawMonthlySales {
    /// Converts a whole response, returning the points sorted by period.
    pub fn into_points(rows: Vec<Self>) -> Result<Vec<MonthlySalesPoint>, ApiError> {
        let mut points = rows
            .into_iter()
            .map(|row| {
                Ok(MonthlySalesPoint {
                    period: parse_period(&row.month)?,
                    amount: row.sales,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;
        points.sort_by_key(|point| point.period);
        Ok(points)
    }
}

impl From<RawCategorySales> for CategorySalesPoint {
    fn from(raw: RawCategorySales) -> Self {
        Self {
            category: raw.category,
            amount: raw.sales,
        }
    }
}

impl From<RawProfit> for ProfitPoint {
    fn from(raw: RawProfit) -> Self {
        Self {
            period: raw.month,
            profit: raw.profit,
        }
    }
}

impl TryFrom<RawForecast> for ForecastResult {
    type Error = ApiError;

    fn try_from(raw: RawForecast) -> Result<Self, Self::Error> {
        let historical_window = raw
            .last_3_months
            .iter()
            .map(|(month, amount)| Ok((parse_period(month)?, *amount)))
            .collect::<Result<BTreeMap<_, _>, ApiError>>()?;

        Ok(Self {
            forecast_amount: raw.forecast,
            method: raw.method,
            historical_window,
            provenance: Provenance::from_wire(raw.data_source.as_deref()),
            forecast_period: raw.forecast_period,
            components: raw.forecast_components,
            trend: raw.trend_analysis,
            confidence: raw.confidence_metrics,
        })
    }
}

impl TryFrom<RawForecastPayload> for ForecastPayload {
    type Error = ApiError;

    fn try_from(raw: RawForecastPayload) -> Result<Self, Self::Error> {
        match raw {
            RawForecastPayload::Single(forecast) => {
                Ok(ForecastPayload::Single(forecast.try_into()?))
            }
            RawForecastPayload::Many(forecasts) => Ok(ForecastPayload::Many(
                forecasts
                    .into_iter()
                    .map(ForecastResult::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        }
    }
}
