use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the active dataset comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The built-in sample dataset.
    #[default]
    Default,
    /// A dataset uploaded by the user.
    Uploaded,
}

impl Provenance {
    /// Maps the service's optional `data_source` field. Only `"uploaded"` counts as an upload.
    pub fn from_wire(data_source: Option<&str>) -> Self {
        match data_source {
            Some("uploaded") => Provenance::Uploaded,
            _ => Provenance::Default,
        }
    }
}

/// Trend direction as reported by the forecasting service.
///
/// Unrecognised values are kept verbatim in `Other` so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => f.write_str("up"),
            TrendDirection::Down => f.write_str("down"),
            TrendDirection::Flat => f.write_str("flat"),
            TrendDirection::Other(raw) => f.write_str(raw),
        }
    }
}

/// Confidence of the forecast as reported by the forecasting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => f.write_str("low"),
            ConfidenceLevel::Medium => f.write_str("medium"),
            ConfidenceLevel::High => f.write_str("high"),
            ConfidenceLevel::Other(raw) => f.write_str(raw),
        }
    }
}
