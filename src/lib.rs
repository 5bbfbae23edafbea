//! # Sales Insights
//!
//! A library for turning a small-business sales export (a semicolon-delimited
//! CSV with one row per product and month) into the facts a sales dashboard
//! shows for a selected product.
//!
//! ## Core Concepts
//!
//! - **Sales Table**: Validated rows sorted by month. Missing columns are a fatal schema error
//! - **Insight**: Totals, peak months, growth leader, top category and trend for one product
//! - **Growth**: Last month's sales minus first month's sales, compared across *all* products
//! - **Trend Direction**: Sign of the change between the two most recent months
//! - **Narrative**: What / why / so-what sentences, with "why" picked by trend direction
//!
//! ## Example
//!
//! ```rust,ignore
//! use sales_insights::*;
//!
//! let config = DashboardConfig::new("data_penjualan.csv");
//! let mut cache = TableCache::new(config.options.clone());
//! let mut session = DashboardSession::open(cache.get_or_load(&config.data_path)?)?;
//!
//! session.select_product("Kopi Susu")?;
//! println!("{}", session.report()?.to_text());
//! ```

pub mod cache;
pub mod charts;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod narrative;
pub mod report;
pub mod schema;
pub mod utils;

pub use cache::TableCache;
pub use charts::{CategorySlice, ChartSeries, ProductMonthPoint, SeriesPoint};
pub use dashboard::DashboardSession;
pub use engine::{compute_insight, CategoryTotal, InsightCalculator, ProductGrowth};
pub use error::{Result, SalesInsightError};
pub use ingestion::*;
pub use narrative::{summary_rows, trend_explanation, Narrative, SummaryRow};
pub use report::{DashboardReport, Roster};
pub use schema::*;
pub use utils::*;

use log::{debug, info};
use std::sync::Arc;

pub struct SalesInsightProcessor;

impl SalesInsightProcessor {
    /// Loads the configured file and builds the report for `product`, or for
    /// the first product in the file when `product` is `None`.
    pub fn process(config: &DashboardConfig, product: Option<&str>) -> Result<DashboardReport> {
        info!(
            "Processing sales insights from {}",
            config.data_path.display()
        );

        let table = load_sales_table(&config.data_path, &config.options)?;
        debug!(
            "Table holds {} rows, months ordered {:?}",
            table.len(),
            table.ordering()
        );

        let mut session = DashboardSession::open(Arc::new(table))?;
        if let Some(product) = product {
            session.select_product(product)?;
        }

        session.report()
    }
}

pub fn process_sales_insights(
    config: &DashboardConfig,
    product: Option<&str>,
) -> Result<DashboardReport> {
    SalesInsightProcessor::process(config, product)
}
