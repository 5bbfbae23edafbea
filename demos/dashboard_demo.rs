use sales_insights::{
    ColumnMap, DashboardConfig, DashboardSession, LoadOptions, Roster, TableCache,
};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/data_penjualan.csv"));
    let product = args.next();

    let config = DashboardConfig {
        data_path,
        options: LoadOptions {
            columns: ColumnMap::indonesian(),
            ..LoadOptions::default()
        },
    };

    let mut cache = TableCache::new(config.options.clone());
    let table = cache.get_or_load(&config.data_path)?;
    let mut session = DashboardSession::open(table)?;

    println!("Products: {}", session.products().join(", "));
    if let Some(product) = product {
        session.select_product(&product)?;
    }

    let report = session.report()?;
    println!("{}", report.to_text());

    println!("Sales trend for {}:", report.charts.product);
    for point in &report.charts.sales_trend {
        println!("  {:<10} {:>8.0}", point.month, point.value);
    }

    println!("Sales by category:");
    for slice in &report.charts.sales_by_category {
        println!(
            "  {:<10} {:>8.0} ({:.1}%)",
            slice.category,
            slice.sales,
            slice.share * 100.0
        );
    }

    // Walk every product the way a product picker would.
    let products = session.products().to_vec();
    for product in products {
        let insight = session.select_product(&product)?;
        println!(
            "{:<18} trend {:?}, peak {}, total {}",
            insight.product, insight.trend_direction, insight.peak_sales_month, insight.total_sales
        );
    }

    println!();
    println!("{}", Roster::default().to_html());

    Ok(())
}
