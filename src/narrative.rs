//! Plain-language reading of an [`InsightResult`].
//!
//! The wording of the "why" sentence depends only on the trend direction;
//! everything else is interpolated from the insight fields.

use crate::schema::{InsightResult, TrendDirection};
use crate::utils::format_amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    /// What happened to the selected product.
    pub what: String,
    /// Likely reason, picked by trend direction.
    pub why: String,
    /// What to focus on next.
    pub so_what: String,
}

impl Narrative {
    pub fn from_insight(insight: &InsightResult) -> Self {
        let what = format!(
            "Product {} sold the most in {}, with total sales of {} units and a total profit of {}.",
            insight.product,
            insight.peak_sales_month,
            format_amount(insight.total_sales),
            format_amount(insight.total_profit)
        );

        let so_what = format!(
            "Product {} has the highest sales growth ({} units), while category {} is the most popular with customers ({} units). \
             Focusing on this product and category can help lift sales and profit further.",
            insight.top_growth_product,
            format_amount(insight.top_growth_value),
            insight.top_category,
            format_amount(insight.top_category_total)
        );

        Self {
            what,
            why: trend_explanation(insight.trend_direction).to_string(),
            so_what,
        }
    }
}

pub fn trend_explanation(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Increasing => {
            "The increase is likely driven by growing market interest or an effective promotion strategy."
        }
        TrendDirection::Decreasing => {
            "The decline may be caused by falling demand or stronger competition."
        }
        TrendDirection::Stable => "Sales are steady compared with the previous month.",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

impl SummaryRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Key/value rows of the insight table, in display order.
pub fn summary_rows(insight: &InsightResult) -> Vec<SummaryRow> {
    vec![
        SummaryRow::new(
            "Total Sales",
            format!("{} units", format_amount(insight.total_sales)),
        ),
        SummaryRow::new("Total Profit", format_amount(insight.total_profit)),
        SummaryRow::new("Peak Sales Month", insight.peak_sales_month.clone()),
        SummaryRow::new("Most Profitable Month", insight.peak_profit_month.clone()),
        SummaryRow::new(
            "Top Growth Product",
            format!(
                "{} (up {})",
                insight.top_growth_product,
                format_amount(insight.top_growth_value)
            ),
        ),
        SummaryRow::new(
            "Most Popular Category",
            format!(
                "{} ({} units)",
                insight.top_category,
                format_amount(insight.top_category_total)
            ),
        ),
    ]
}
