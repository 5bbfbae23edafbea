//! Report assembly and rendering.
//!
//! The HTML output is a fragment (narrative paragraphs plus the insight
//! table) meant to be embedded by whatever page hosts the dashboard. The
//! team roster renders the same way, as a standalone fragment.

use crate::charts::ChartSeries;
use crate::error::Result;
use crate::narrative::{summary_rows, Narrative, SummaryRow};
use crate::schema::InsightResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub insight: InsightResult,
    pub narrative: Narrative,
    pub summary: Vec<SummaryRow>,
    pub charts: ChartSeries,
}

impl DashboardReport {
    pub fn new(insight: InsightResult, charts: ChartSeries) -> Self {
        Self {
            narrative: Narrative::from_insight(&insight),
            summary: summary_rows(&insight),
            insight,
            charts,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<section class="insight-story">
    <h3>Sales Story</h3>
    <p><strong>What:</strong> {what}</p>
    <p><strong>Why:</strong> {why}</p>
    <p><strong>So what:</strong> {so_what}</p>
</section>
{table}"#,
            what = html_escape(&self.narrative.what),
            why = html_escape(&self.narrative.why),
            so_what = html_escape(&self.narrative.so_what),
            table = render_summary_table(&self.insight.product, &self.summary),
        )
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Sales insight: {}", self.insight.product),
            String::new(),
            format!("What: {}", self.narrative.what),
            format!("Why: {}", self.narrative.why),
            format!("So what: {}", self.narrative.so_what),
            String::new(),
        ];

        let width = self
            .summary
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);
        lines.extend(
            self.summary
                .iter()
                .map(|row| format!("{:<width$}  {}", row.label, row.value, width = width)),
        );

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn render_summary_table(product: &str, rows: &[SummaryRow]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "        <tr><td>{}</td><td>{}</td></tr>\n",
                html_escape(&row.label),
                html_escape(&row.value)
            )
        })
        .collect();

    format!(
        r#"<table class="insight-table">
    <thead>
        <tr><th colspan="2">Sales Insight: {product}</th></tr>
    </thead>
    <tbody>
{body}    </tbody>
</table>
"#,
        product = html_escape(product),
        body = body,
    )
}

/// Static team page: a heading, an optional logo and one row per member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub title: String,
    pub members: Vec<String>,

    /// Image source for the logo, usually a `data:image/png;base64,...` URI.
    #[serde(default)]
    pub logo_src: Option<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            title: "Kelompok 4 - Teknik Elektro".to_string(),
            members: [
                "Reyhan Abi Sukoco",
                "Robi Armasta Wijaya",
                "Ardelia Syifa",
                "Septiani",
                "Athfal Fahlefi",
                "Arizal Anshori",
                "Galih Setyaji",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            logo_src: None,
        }
    }
}

impl Roster {
    pub fn new(title: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            title: title.into(),
            members,
            logo_src: None,
        }
    }

    pub fn with_logo(mut self, src: impl Into<String>) -> Self {
        self.logo_src = Some(src.into());
        self
    }

    pub fn to_html(&self) -> String {
        let logo = match &self.logo_src {
            Some(src) => format!(
                "    <img class=\"roster-logo\" src=\"{}\" width=\"350\">\n",
                html_escape(src)
            ),
            None => String::new(),
        };

        format!(
            r#"<section class="team-roster">
{logo}    <h2>{title}</h2>
{table}</section>
"#,
            logo = logo,
            title = html_escape(&self.title),
            table = render_roster_table(&self.members),
        )
    }
}

fn render_roster_table(members: &[String]) -> String {
    let body: String = members
        .iter()
        .map(|name| format!("        <tr><td>{}</td></tr>\n", html_escape(name)))
        .collect();

    format!(
        r#"<table class="roster-table">
    <thead>
        <tr><th>Nama Anggota</th></tr>
    </thead>
    <tbody>
{body}    </tbody>
</table>
"#,
        body = body,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_insight;
    use crate::schema::{MonthOrdering, SalesRecord, SalesTable};

    fn report_for(product: &str) -> DashboardReport {
        let table = SalesTable::new(
            vec![
                SalesRecord::new(product, "Jan", 100.0, 20.0, "Snacks & Drinks", 4.0),
                SalesRecord::new(product, "Feb", 150.0, 30.0, "Snacks & Drinks", 4.5),
            ],
            MonthOrdering::Calendar,
        )
        .unwrap();
        let insight = compute_insight(&table, product).unwrap();
        let charts = ChartSeries::build(&table, product).unwrap();
        DashboardReport::new(insight, charts)
    }

    #[test]
    fn test_html_escapes_user_data() {
        let html = report_for("<b>Kopi</b>").to_html();
        assert!(html.contains("&lt;b&gt;Kopi&lt;/b&gt;"));
        assert!(!html.contains("<b>Kopi</b>"));
        assert!(html.contains("Snacks &amp; Drinks"));
        assert_eq!(html.matches("<tr><td>").count(), 6);
    }

    #[test]
    fn test_text_lists_summary() {
        let text = report_for("Kopi").to_text();
        assert!(text.starts_with("Sales insight: Kopi"));
        assert!(text.contains("Total Sales"));
        assert!(text.contains("250 units"));
        assert!(text.contains("Why: The increase"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = report_for("Kopi");
        let json = report.to_json().unwrap();
        let parsed: DashboardReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(json.contains("\"trend_direction\": \"Increasing\""));
    }

    #[test]
    fn test_roster_lists_every_member() {
        let html = Roster::default().to_html();
        assert!(html.contains("<h2>Kelompok 4 - Teknik Elektro</h2>"));
        assert!(html.contains("<th>Nama Anggota</th>"));
        assert_eq!(html.matches("<tr><td>").count(), 7);
        assert!(html.contains("<td>Galih Setyaji</td>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_roster_escapes_names_and_logo() {
        let roster = Roster::new(
            "Tim <Data>",
            vec!["O'Neil & Co".to_string(), "Budi".to_string()],
        )
        .with_logo("data:image/png;base64,AAA=\"onload=\"x");

        let html = roster.to_html();
        assert!(html.contains("Tim &lt;Data&gt;"));
        assert!(html.contains("<td>O&#39;Neil &amp; Co</td>"));
        assert!(html.contains(r#"src="data:image/png;base64,AAA=&quot;onload=&quot;x""#));
        assert_eq!(html.matches("<tr><td>").count(), 2);
    }
}
