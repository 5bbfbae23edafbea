use crate::charts::ChartSeries;
use crate::engine::InsightCalculator;
use crate::error::{Result, SalesInsightError};
use crate::report::DashboardReport;
use crate::schema::{InsightResult, SalesTable};
use log::{debug, info};
use std::sync::Arc;

/// Holds one loaded table and the insight for the current product.
///
/// The insight is recomputed whenever the selection changes; a failed
/// selection leaves the previous one in place.
pub struct DashboardSession {
    table: Arc<SalesTable>,
    products: Vec<String>,
    selected: String,
    insight: InsightResult,
}

impl DashboardSession {
    /// Opens a session with the first product in the table selected.
    pub fn open(table: Arc<SalesTable>) -> Result<Self> {
        let products = table.products();
        let first = products
            .first()
            .cloned()
            .ok_or_else(|| SalesInsightError::EmptySelection(String::new()))?;

        let insight = InsightCalculator::for_table(&table).compute(&table, &first)?;
        info!(
            "Dashboard opened with {} product(s), '{}' selected",
            products.len(),
            first
        );

        Ok(Self {
            table,
            products,
            selected: first,
            insight,
        })
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn selected_product(&self) -> &str {
        &self.selected
    }

    pub fn insight(&self) -> &InsightResult {
        &self.insight
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    pub fn select_product(&mut self, product: &str) -> Result<&InsightResult> {
        let insight = InsightCalculator::for_table(&self.table).compute(&self.table, product)?;
        debug!("Selection changed from '{}' to '{}'", self.selected, product);

        self.selected = product.to_string();
        self.insight = insight;
        Ok(&self.insight)
    }

    /// Replaces the table (after a cache invalidation, say) and recomputes the
    /// current selection, falling back to the first product when it is gone.
    pub fn reload(&mut self, table: Arc<SalesTable>) -> Result<()> {
        let mut next = Self::open(table)?;
        if next.products.iter().any(|p| p == &self.selected) {
            next.select_product(&self.selected)?;
        }
        *self = next;
        Ok(())
    }

    pub fn report(&self) -> Result<DashboardReport> {
        let charts = ChartSeries::build(&self.table, &self.selected)?;
        Ok(DashboardReport::new(self.insight.clone(), charts))
    }
}
