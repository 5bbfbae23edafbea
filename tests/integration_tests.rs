use sales_insights::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const HEADER: [&str; 6] = [
    "Product",
    "Month",
    "SalesAmount",
    "Profit",
    "Category",
    "Rating",
];

fn write_sales_csv(
    dir: &Path,
    filename: &str,
    rows: &[(&str, &str, f64, f64, &str, &str)],
) -> std::result::Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(filename);
    let mut file = File::create(&path)?;

    writeln!(file, "{}", HEADER.join(";"))?;
    for (product, month, sales, profit, category, rating) in rows {
        writeln!(
            file,
            "{};{};{};{};{};{}",
            product, month, sales, profit, category, rating
        )?;
    }

    Ok(path)
}

fn table(records: Vec<SalesRecord>) -> SalesTable {
    SalesTable::new(records, MonthOrdering::Calendar).unwrap()
}

fn row(product: &str, month: &str, sales: f64) -> SalesRecord {
    SalesRecord::new(product, month, sales, sales * 0.2, "General", 4.0)
}

#[test]
fn test_scenario_two_months_increasing() {
    let t = table(vec![row("A", "Jan", 100.0), row("A", "Feb", 150.0)]);
    let insight = compute_insight(&t, "A").unwrap();

    assert_eq!(insight.trend_direction, TrendDirection::Increasing);
    assert_eq!(insight.total_sales, 250.0);
}

#[test]
fn test_scenario_single_row_stable() {
    let t = table(vec![row("A", "Jan", 50.0)]);
    let insight = compute_insight(&t, "A").unwrap();

    assert_eq!(insight.trend_direction, TrendDirection::Stable);
    assert_eq!(insight.total_sales, 50.0);
    assert_eq!(insight.top_growth_value, 0.0);
}

#[test]
fn test_scenario_growth_leader() {
    let t = table(vec![
        row("A", "Jan", 100.0),
        row("A", "Feb", 200.0),
        row("B", "Jan", 500.0),
        row("B", "Feb", 550.0),
    ]);

    for product in ["A", "B"] {
        let insight = compute_insight(&t, product).unwrap();
        assert_eq!(insight.top_growth_product, "A");
        assert_eq!(insight.top_growth_value, 100.0);
    }
}

#[test]
fn test_scenario_absent_product() {
    let t = table(vec![row("A", "Jan", 100.0)]);
    match compute_insight(&t, "Missing") {
        Err(SalesInsightError::EmptySelection(product)) => assert_eq!(product, "Missing"),
        other => panic!("expected EmptySelection, got {:?}", other),
    }
}

#[test]
fn test_scenario_top_category() {
    let t = table(vec![
        SalesRecord::new("A", "Jan", 300.0, 10.0, "Food", 4.0),
        SalesRecord::new("A", "Feb", 200.0, 10.0, "Tools", 4.0),
        SalesRecord::new("A", "Mar", 250.0, 10.0, "Tools", 4.0),
    ]);

    let insight = compute_insight(&t, "A").unwrap();
    assert_eq!(insight.top_category, "Tools");
    assert_eq!(insight.top_category_total, 450.0);
}

#[test]
fn test_total_sales_invariant_under_row_order() {
    let rows = vec![
        row("A", "Jan", 12.5),
        row("B", "Jan", 99.0),
        row("A", "Feb", 40.25),
        row("A", "Mar", 7.0),
    ];
    let mut reversed = rows.clone();
    reversed.reverse();

    let forward = compute_insight(&table(rows), "A").unwrap();
    let backward = compute_insight(&table(reversed), "A").unwrap();

    assert_eq!(forward.total_sales, 59.75);
    assert_eq!(forward.total_sales, backward.total_sales);
    assert_eq!(forward.trend_direction, backward.trend_direction);
    assert_eq!(forward.peak_sales_month, backward.peak_sales_month);
}

#[test]
fn test_peak_month_dominates_all_rows() {
    let t = table(vec![
        row("A", "Jan", 40.0),
        row("A", "Feb", 95.0),
        row("A", "Mar", 60.0),
        row("A", "Apr", 95.0),
    ]);

    let insight = compute_insight(&t, "A").unwrap();
    let peak = t
        .rows_for_product("A")
        .find(|r| r.month == insight.peak_sales_month)
        .unwrap();
    assert!(t.rows_for_product("A").all(|r| peak.sales_amount >= r.sales_amount));
    assert_eq!(insight.peak_sales_month, "Feb");
}

#[test]
fn test_growth_invariant_to_product_order() {
    let first = table(vec![
        row("A", "Jan", 10.0),
        row("A", "Feb", 70.0),
        row("B", "Jan", 10.0),
        row("B", "Feb", 30.0),
    ]);
    let second = table(vec![
        row("B", "Feb", 30.0),
        row("A", "Feb", 70.0),
        row("B", "Jan", 10.0),
        row("A", "Jan", 10.0),
    ]);

    let a = compute_insight(&first, "B").unwrap();
    let b = compute_insight(&second, "B").unwrap();
    assert_eq!(a.top_growth_product, b.top_growth_product);
    assert_eq!(a.top_growth_value, 60.0);
    assert_eq!(b.top_growth_value, 60.0);
}

#[test]
fn test_month_ordering_changes_trend() {
    // Calendar order is Jan, Feb, Mar; string order is Feb, Jan, Mar.
    let records = vec![row("A", "Jan", 100.0), row("A", "Feb", 50.0), row("A", "Mar", 80.0)];

    let calendar = SalesTable::new(records.clone(), MonthOrdering::Calendar).unwrap();
    let lexical = SalesTable::new(records, MonthOrdering::Lexical).unwrap();

    let cal = compute_insight(&calendar, "A").unwrap();
    let lex = compute_insight(&lexical, "A").unwrap();

    assert_eq!(cal.top_growth_value, -20.0);
    assert_eq!(lex.top_growth_value, 30.0);
    assert_eq!(cal.trend_direction, TrendDirection::Increasing);
    assert_eq!(lex.trend_direction, TrendDirection::Decreasing);
}

#[test]
fn test_load_and_report_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sales_csv(
        dir.path(),
        "sales.csv",
        &[
            ("Kopi", "Mar", 180.0, 45.0, "Minuman", "4,7"),
            ("Kopi", "Jan", 120.0, 30.0, "Minuman", "4,5"),
            ("Kopi", "Feb", 160.0, 50.0, "Minuman", "4,6"),
            ("Roti", "Jan", 90.0, 10.0, "Makanan", "4,1"),
            ("Roti", "Mar", 80.0, 8.0, "Makanan", "3,9"),
        ],
    )
    .unwrap();

    let mut cache = TableCache::default();
    let loaded = cache.get_or_load(&path).unwrap();
    assert_eq!(loaded.ordering(), MonthOrdering::Calendar);

    let mut session = DashboardSession::open(Arc::clone(&loaded)).unwrap();
    assert_eq!(session.selected_product(), "Kopi");

    let insight = session.insight().clone();
    assert_eq!(insight.total_sales, 460.0);
    assert_eq!(insight.total_profit, 125.0);
    assert_eq!(insight.peak_sales_month, "Mar");
    assert_eq!(insight.peak_profit_month, "Feb");
    assert_eq!(insight.top_growth_product, "Kopi");
    assert_eq!(insight.top_growth_value, 60.0);
    assert_eq!(insight.trend_direction, TrendDirection::Increasing);

    session.select_product("Roti").unwrap();
    let report = session.report().unwrap();
    assert_eq!(report.insight.trend_direction, TrendDirection::Decreasing);
    assert!(report.narrative.why.contains("decline"));
    assert!(report.to_html().contains("Sales Insight: Roti"));
    assert_eq!(report.charts.sales_by_category.len(), 2);
}

#[test]
fn test_schema_error_halts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "Product;Month;Sales\nKopi;Jan;10\n").unwrap();

    match load_sales_table(&path, &LoadOptions::default()) {
        Err(SalesInsightError::Schema { missing }) => {
            assert_eq!(missing, vec!["SalesAmount", "Profit", "Category", "Rating"]);
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_halts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_sales_table(&dir.path().join("data_penjualan.csv"), &LoadOptions::default())
        .unwrap_err();

    assert!(matches!(err, SalesInsightError::FileMissing(_)));
    assert!(err.to_string().contains("data_penjualan.csv"));
}

#[test]
fn test_config_file_drives_processing() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_sales_csv(
        dir.path(),
        "weekly.csv",
        &[
            ("Kopi", "Week 2", 30.0, 5.0, "Minuman", "4"),
            ("Kopi", "Week 1", 20.0, 4.0, "Minuman", "4"),
        ],
    )
    .unwrap();

    let config_path = dir.path().join("dashboard.json");
    let config_json = serde_json::json!({
        "data_path": data,
        "options": { "month_ordering": "Auto" }
    });
    std::fs::write(&config_path, config_json.to_string()).unwrap();

    let config = DashboardConfig::from_json_file(&config_path).unwrap();
    let report = process_sales_insights(&config, Some("Kopi")).unwrap();

    // "Week N" labels are not calendar months, so Auto falls back to string order.
    assert_eq!(report.insight.peak_sales_month, "Week 2");
    assert_eq!(report.insight.trend_direction, TrendDirection::Increasing);
}
