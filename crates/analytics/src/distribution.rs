use crate::metrics::{std_dev, sum};
use core_types::CategorySalesPoint;
use serde::{Deserialize, Serialize};

/// Below this coefficient of variation the category mix counts as even.
pub const EVEN_DISTRIBUTION_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionShape {
    Even,
    Concentrated,
    NoData,
}

/// How sales are spread across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub categories: usize,
    pub total: f64,
    /// The first category of the input, which is taken to be the best seller.
    pub top_category: Option<CategorySalesPoint>,
    /// Share of `total` held by the first three categories, as a fraction in `[0, 1]`.
    pub top3_share: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub shape: DistributionShape,
}

/// Summarises a category ranking. The input is expected to be sorted best-first and is not
/// re-sorted.
pub fn analyze_categories(categories: &[CategorySalesPoint]) -> CategoryBreakdown {
    let amounts: Vec<f64> = categories.iter().map(|point| point.amount).collect();
    let total = sum(&amounts);
    let top_category = categories.first().cloned();

    let mean = if amounts.is_empty() {
        0.0
    } else {
        total / amounts.len() as f64
    };

    if mean == 0.0 {
        return CategoryBreakdown {
            categories: categories.len(),
            total,
            top_category,
            top3_share: 0.0,
            mean,
            std_dev: 0.0,
            shape: DistributionShape::NoData,
        };
    }

    let deviation = std_dev(&amounts);
    let top3_share = if total == 0.0 {
        0.0
    } else {
        sum(&amounts[..amounts.len().min(3)]) / total
    };

    let shape = if deviation / mean < EVEN_DISTRIBUTION_THRESHOLD {
        DistributionShape::Even
    } else {
        DistributionShape::Concentrated
    };

    CategoryBreakdown {
        categories: categories.len(),
        total,
        top_category,
        top3_share,
        mean,
        std_dev: deviation,
        shape,
    }
}
