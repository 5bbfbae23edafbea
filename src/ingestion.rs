use crate::error::{Result, SalesInsightError};
use crate::schema::{ColumnMap, LoadOptions, SalesRecord, SalesTable};
use crate::utils::parse_decimal;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    product: usize,
    month: usize,
    sales_amount: usize,
    profit: usize,
    category: usize,
    rating: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, columns: &ColumnMap) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = columns
            .required()
            .into_iter()
            .filter(|name| find(*name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(SalesInsightError::Schema { missing });
        }

        let index = |name: &str| {
            find(name).ok_or_else(|| SalesInsightError::Schema {
                missing: vec![name.to_string()],
            })
        };

        Ok(Self {
            product: index(columns.product.as_str())?,
            month: index(columns.month.as_str())?,
            sales_amount: index(columns.sales_amount.as_str())?,
            profit: index(columns.profit.as_str())?,
            category: index(columns.category.as_str())?,
            rating: index(columns.rating.as_str())?,
        })
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_row(record: &StringRecord, idx: &ColumnIndices, line: u64) -> Result<SalesRecord> {
    let invalid = |details: String| SalesInsightError::InvalidRecord { line, details };

    let product = field(record, idx.product);
    if product.is_empty() {
        return Err(invalid("product is empty".to_string()));
    }

    let month = field(record, idx.month);
    if month.is_empty() {
        return Err(invalid("month is empty".to_string()));
    }

    let category = field(record, idx.category);
    if category.is_empty() {
        return Err(invalid("category is empty".to_string()));
    }

    let raw_sales = field(record, idx.sales_amount);
    let sales_amount = parse_decimal(raw_sales)
        .ok_or_else(|| invalid(format!("sales amount '{}' is not a number", raw_sales)))?;
    if sales_amount < 0.0 {
        return Err(invalid(format!(
            "sales amount {} must not be negative",
            sales_amount
        )));
    }

    let raw_profit = field(record, idx.profit);
    let profit = parse_decimal(raw_profit)
        .ok_or_else(|| invalid(format!("profit '{}' is not a number", raw_profit)))?;

    let raw_rating = field(record, idx.rating);
    let rating = parse_decimal(raw_rating)
        .ok_or_else(|| invalid(format!("rating '{}' is not a number", raw_rating)))?;

    Ok(SalesRecord {
        product: product.to_string(),
        month: month.to_string(),
        sales_amount,
        profit,
        category: category.to_string(),
        rating,
    })
}

/// Reads a delimited sales export into a month-sorted table.
///
/// The header row is checked before any data row is read, so a file with
/// missing columns fails with [`SalesInsightError::Schema`] even when its
/// rows are malformed too.
pub fn parse_sales_table<R: Read>(reader: R, options: &LoadOptions) -> Result<SalesTable> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let indices = ColumnIndices::resolve(&headers, &options.columns)?;
    debug!("Resolved sales columns: {:?}", indices);

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row_idx as u64 + 2);
        records.push(parse_row(&record, &indices, line)?);
    }

    let table = SalesTable::new(records, options.month_ordering)?;
    info!(
        "Loaded {} sales rows covering {} product(s), months ordered {:?}",
        table.len(),
        table.products().len(),
        table.ordering()
    );

    Ok(table)
}

pub fn load_sales_table(path: &Path, options: &LoadOptions) -> Result<SalesTable> {
    if !path.exists() {
        return Err(SalesInsightError::FileMissing(path.to_path_buf()));
    }

    debug!("Reading sales data from {}", path.display());
    let file = File::open(path)?;
    parse_sales_table(file, options)
}
