use crate::engine::category_totals;
use crate::error::{Result, SalesInsightError};
use crate::schema::SalesTable;
use crate::utils::compare_months;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMonthPoint {
    pub month: String,
    pub product: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub sales: f64,
    /// Share of all sales, 0.0 when the table has no sales at all.
    pub share: f64,
}

/// Data behind the dashboard charts. Styling is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub product: String,
    pub sales_trend: Vec<SeriesPoint>,
    pub profit_trend: Vec<SeriesPoint>,
    pub sales_by_product: Vec<ProductMonthPoint>,
    pub sales_by_category: Vec<CategorySlice>,
}

impl ChartSeries {
    pub fn build(table: &SalesTable, product: &str) -> Result<Self> {
        let ordering = table.ordering();
        let mut rows: Vec<_> = table.rows_for_product(product).collect();
        if rows.is_empty() {
            return Err(SalesInsightError::EmptySelection(product.to_string()));
        }
        rows.sort_by(|a, b| compare_months(&a.month, &b.month, &ordering));

        let sales_trend = rows
            .iter()
            .map(|r| SeriesPoint {
                month: r.month.clone(),
                value: r.sales_amount,
            })
            .collect();

        let profit_trend = rows
            .iter()
            .map(|r| SeriesPoint {
                month: r.month.clone(),
                value: r.profit,
            })
            .collect();

        let sales_by_product = table
            .records()
            .iter()
            .map(|r| ProductMonthPoint {
                month: r.month.clone(),
                product: r.product.clone(),
                sales: r.sales_amount,
            })
            .collect();

        let totals = category_totals(table.records());
        let grand_total: f64 = totals.iter().map(|t| t.total_sales).sum();
        let sales_by_category = totals
            .into_iter()
            .map(|t| CategorySlice {
                share: if grand_total > 0.0 {
                    t.total_sales / grand_total
                } else {
                    0.0
                },
                category: t.category,
                sales: t.total_sales,
            })
            .collect();

        Ok(Self {
            product: product.to_string(),
            sales_trend,
            profit_trend,
            sales_by_product,
            sales_by_category,
        })
    }
}
