use crate::error::{Result, SalesInsightError};
use crate::schema::{InsightResult, MonthOrdering, SalesRecord, SalesTable, TrendDirection};
use crate::utils::compare_months;
use log::debug;

/// Per-product growth: last month's sales minus first month's sales.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductGrowth {
    pub product: String,
    pub first_sales: f64,
    pub last_sales: f64,
    pub growth: f64,
}

/// Summed sales for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_sales: f64,
}

/// Derives the summary facts shown for a selected product.
pub struct InsightCalculator {
    ordering: MonthOrdering,
}

impl InsightCalculator {
    pub fn new(ordering: MonthOrdering) -> Self {
        Self { ordering }
    }

    pub fn for_table(table: &SalesTable) -> Self {
        Self::new(table.ordering())
    }

    pub fn compute(&self, table: &SalesTable, selected_product: &str) -> Result<InsightResult> {
        let mut filtered: Vec<&SalesRecord> = table.rows_for_product(selected_product).collect();
        if filtered.is_empty() {
            return Err(SalesInsightError::EmptySelection(selected_product.to_string()));
        }

        filtered.sort_by(|a, b| compare_months(&a.month, &b.month, &self.ordering));
        debug!(
            "Computing insight for '{}' over {} row(s)",
            selected_product,
            filtered.len()
        );

        let total_sales: f64 = filtered.iter().map(|r| r.sales_amount).sum();
        let total_profit: f64 = filtered.iter().map(|r| r.profit).sum();

        let peak_sales = first_max_by(&filtered, |r| r.sales_amount);
        let peak_profit = first_max_by(&filtered, |r| r.profit);

        let growth = self.product_growth(table.records());
        let leader = growth
            .iter()
            .fold(None::<&ProductGrowth>, |best, g| match best {
                Some(b) if g.growth <= b.growth => Some(b),
                _ => Some(g),
            })
            .ok_or_else(|| SalesInsightError::EmptySelection(selected_product.to_string()))?;

        let categories = category_totals(filtered.iter().copied());
        let top_category = categories
            .iter()
            .fold(None::<&CategoryTotal>, |best, c| match best {
                Some(b) if c.total_sales <= b.total_sales => Some(b),
                _ => Some(c),
            })
            .ok_or_else(|| SalesInsightError::EmptySelection(selected_product.to_string()))?;

        let trend_direction = trend_direction(&filtered);

        Ok(InsightResult {
            product: selected_product.to_string(),
            row_count: filtered.len(),
            total_sales,
            total_profit,
            peak_sales_month: peak_sales.month.clone(),
            peak_profit_month: peak_profit.month.clone(),
            top_growth_product: leader.product.clone(),
            top_growth_value: leader.growth,
            top_category: top_category.category.clone(),
            top_category_total: top_category.total_sales,
            trend_direction,
        })
    }

    /// Growth of every product in the table, in first-seen product order.
    /// Each product's rows are month-sorted before taking first and last.
    pub fn product_growth(&self, records: &[SalesRecord]) -> Vec<ProductGrowth> {
        let mut groups: Vec<(String, Vec<&SalesRecord>)> = Vec::new();
        for record in records {
            match groups.iter_mut().find(|(p, _)| p == &record.product) {
                Some((_, rows)) => rows.push(record),
                None => groups.push((record.product.clone(), vec![record])),
            }
        }

        groups
            .into_iter()
            .filter_map(|(product, mut rows)| {
                rows.sort_by(|a, b| compare_months(&a.month, &b.month, &self.ordering));
                let first = rows.first()?.sales_amount;
                let last = rows.last()?.sales_amount;
                Some(ProductGrowth {
                    product,
                    first_sales: first,
                    last_sales: last,
                    growth: last - first,
                })
            })
            .collect()
    }
}

/// First row reaching the maximum of `key`. Callers guarantee `rows` is non-empty.
fn first_max_by<'a, F>(rows: &[&'a SalesRecord], key: F) -> &'a SalesRecord
where
    F: Fn(&SalesRecord) -> f64,
{
    let mut best = rows[0];
    for &row in &rows[1..] {
        if key(row) > key(best) {
            best = row;
        }
    }
    best
}

/// Summed sales per category, in first-seen category order.
pub fn category_totals<'a, I>(rows: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|t| t.category == row.category) {
            Some(total) => total.total_sales += row.sales_amount,
            None => totals.push(CategoryTotal {
                category: row.category.clone(),
                total_sales: row.sales_amount,
            }),
        }
    }
    totals
}

/// Direction of the last month-over-month change. With a single row there
/// is no change to measure, so the delta is zero.
pub fn trend_direction(sorted_rows: &[&SalesRecord]) -> TrendDirection {
    match sorted_rows {
        [.., previous, last] => {
            TrendDirection::from_delta(last.sales_amount - previous.sales_amount)
        }
        _ => TrendDirection::Stable,
    }
}

pub fn compute_insight(table: &SalesTable, selected_product: &str) -> Result<InsightResult> {
    InsightCalculator::for_table(table).compute(table, selected_product)
}
