use core_types::{ConfidenceLevel, TrendDirection};
use serde::{Deserialize, Serialize};

/// The fixed set of badge styles a view can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

pub fn confidence_tone(level: &ConfidenceLevel) -> DisplayTone {
    match level {
        ConfidenceLevel::High => DisplayTone::Positive,
        ConfidenceLevel::Medium => DisplayTone::Caution,
        ConfidenceLevel::Low => DisplayTone::Negative,
        ConfidenceLevel::Other(_) => DisplayTone::Neutral,
    }
}

pub fn trend_tone(direction: &TrendDirection) -> DisplayTone {
    match direction {
        TrendDirection::Up => DisplayTone::Positive,
        TrendDirection::Down => DisplayTone::Negative,
        TrendDirection::Flat | TrendDirection::Other(_) => DisplayTone::Neutral,
    }
}
