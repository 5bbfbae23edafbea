use sales_insights::{
    compute_insight, parse_month_label, InsightResult, MonthOrdering, SalesRecord, SalesTable,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let records = vec![
        SalesRecord::new("Teh Tarik", "Jan", 90.0, 20.0, "Minuman", 4.4),
        SalesRecord::new("Teh Tarik", "Feb", 70.0, 14.0, "Minuman", 4.3),
        SalesRecord::new("Teh Tarik", "Mar", 85.0, 18.0, "Minuman", 4.5),
        SalesRecord::new("Teh Tarik", "Apr", 60.0, 11.0, "Minuman", 4.1),
    ];

    for label in ["Jan", "Agustus 2023", "2024-03", "07/2022", "Week 3"] {
        println!("{:<14} -> {:?}", label, parse_month_label(label));
    }
    println!();

    for ordering in [MonthOrdering::Lexical, MonthOrdering::Calendar] {
        let table = SalesTable::new(records.clone(), ordering)?;
        let months: Vec<&str> = table.records().iter().map(|r| r.month.as_str()).collect();
        let insight = compute_insight(&table, "Teh Tarik")?;

        println!("{:?} ordering: {}", ordering, months.join(" < "));
        println!(
            "  growth {}, trend {:?}",
            insight.top_growth_value, insight.trend_direction
        );
    }

    println!();
    println!("Insight record schema:");
    println!("{}", InsightResult::schema_as_json()?);

    Ok(())
}
