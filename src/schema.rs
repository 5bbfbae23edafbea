use crate::error::{Result, SalesInsightError};
use crate::utils::{resolve_month_ordering, sort_by_month};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One row of the sales CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product: String,
    pub month: String,
    pub sales_amount: f64,
    pub profit: f64,
    pub category: String,
    pub rating: f64,
}

impl SalesRecord {
    pub fn new(
        product: impl Into<String>,
        month: impl Into<String>,
        sales_amount: f64,
        profit: f64,
        category: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            product: product.into(),
            month: month.into(),
            sales_amount,
            profit,
            category: category.into(),
            rating,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum MonthOrdering {
    #[schemars(description = "Plain string ordering of month labels, exactly as they appear in the file.")]
    Lexical,

    #[schemars(
        description = "Calendar ordering. Labels must be month names (English or Indonesian), month numbers, YYYY-MM, YYYY-MM-DD or MM/YYYY."
    )]
    Calendar,

    #[schemars(description = "Calendar ordering when every label is recognized, lexical ordering otherwise.")]
    Auto,
}

impl Default for MonthOrdering {
    fn default() -> Self {
        Self::Auto
    }
}

/// Month-sorted sales rows. The ordering stored here is always resolved
/// (never `Auto`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
    ordering: MonthOrdering,
}

impl SalesTable {
    pub fn new(mut records: Vec<SalesRecord>, ordering: MonthOrdering) -> Result<Self> {
        let resolved =
            resolve_month_ordering(records.iter().map(|r| r.month.as_str()), &ordering)?;
        sort_by_month(&mut records, &resolved);

        Ok(Self {
            records,
            ordering: resolved,
        })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn ordering(&self) -> MonthOrdering {
        self.ordering
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct products in first-seen order.
    pub fn products(&self) -> Vec<String> {
        let mut products: Vec<String> = Vec::new();
        for record in &self.records {
            if !products.iter().any(|p| p == &record.product) {
                products.push(record.product.clone());
            }
        }
        products
    }

    pub fn rows_for_product<'a>(
        &'a self,
        product: &'a str,
    ) -> impl Iterator<Item = &'a SalesRecord> {
        self.records.iter().filter(move |r| r.product == product)
    }
}

/// Header names of the six logical columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ColumnMap {
    pub product: String,
    pub month: String,
    pub sales_amount: String,
    pub profit: String,
    pub category: String,
    pub rating: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            product: "Product".to_string(),
            month: "Month".to_string(),
            sales_amount: "SalesAmount".to_string(),
            profit: "Profit".to_string(),
            category: "Category".to_string(),
            rating: "Rating".to_string(),
        }
    }
}

impl ColumnMap {
    /// Headers used by the Indonesian `data_penjualan.csv` export.
    pub fn indonesian() -> Self {
        Self {
            product: "Produk".to_string(),
            month: "Bulan".to_string(),
            sales_amount: "Penjualan".to_string(),
            profit: "Keuntungan".to_string(),
            category: "Kategori".to_string(),
            rating: "Rating".to_string(),
        }
    }

    pub fn required(&self) -> [&str; 6] {
        [
            self.product.as_str(),
            self.month.as_str(),
            self.sales_amount.as_str(),
            self.profit.as_str(),
            self.category.as_str(),
            self.rating.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LoadOptions {
    #[serde(default = "default_delimiter")]
    #[schemars(description = "Single ASCII field separator. Defaults to ';'.")]
    pub delimiter: char,

    #[serde(default)]
    pub columns: ColumnMap,

    #[serde(default)]
    pub month_ordering: MonthOrdering,
}

fn default_delimiter() -> char {
    ';'
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            columns: ColumnMap::default(),
            month_ordering: MonthOrdering::Auto,
        }
    }
}

impl LoadOptions {
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(SalesInsightError::InvalidConfig(format!(
                "delimiter '{}' is not a single ASCII character",
                self.delimiter
            )))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DashboardConfig {
    #[schemars(description = "Path to the sales CSV file")]
    pub data_path: PathBuf,

    #[serde(default)]
    pub options: LoadOptions,
}

impl DashboardConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            options: LoadOptions::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.options.delimiter_byte()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SalesInsightError::FileMissing(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum TrendDirection {
    #[schemars(description = "Latest month sold more than the month before it.")]
    Increasing,

    #[schemars(description = "Latest month sold less than the month before it.")]
    Decreasing,

    #[schemars(description = "Latest month sold exactly as much as the month before it.")]
    Stable,
}

impl TrendDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Increasing
        } else if delta < 0.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InsightResult {
    #[schemars(description = "The product the insight was computed for")]
    pub product: String,

    #[schemars(description = "Number of rows belonging to the product")]
    pub row_count: usize,

    pub total_sales: f64,

    pub total_profit: f64,

    #[schemars(description = "Month of the first row with the highest sales amount")]
    pub peak_sales_month: String,

    #[schemars(description = "Month of the first row with the highest profit")]
    pub peak_profit_month: String,

    #[schemars(
        description = "Product (across the whole table) whose last month outsold its first month by the widest margin"
    )]
    pub top_growth_product: String,

    pub top_growth_value: f64,

    #[schemars(description = "Category with the largest summed sales within the product's rows")]
    pub top_category: String,

    pub top_category_total: f64,

    pub trend_direction: TrendDirection,
}

impl InsightResult {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(InsightResult)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
