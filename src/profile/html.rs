//! Self-contained HTML profile reports.

use askama::Template;

use super::ReportGenerator;
use super::stats::{ColumnDetails, ColumnProfile, TableProfile, profile_table};
use crate::error::{PrepError, Result};
use crate::table::Table;

/// Number of most frequent values listed for text columns
pub const DEFAULT_TOP_VALUES: usize = 5;

struct StatRow {
    label: &'static str,
    value: String,
}

impl StatRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

struct ColumnView {
    name: String,
    data_type: String,
    stats: Vec<StatRow>,
    top_values: Vec<TopValue>,
}

/// Value/count pair pre-formatted for display
struct TopValue {
    value: String,
    count: usize,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate<'a> {
    profile: &'a TableProfile,
    missing_pct: String,
    columns: Vec<ColumnView>,
    summary_json: String,
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn count(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn column_view(column: &ColumnProfile) -> ColumnView {
    let mut stats = vec![
        StatRow::new("Count", column.count.to_string()),
        StatRow::new("Missing", column.missing.to_string()),
        StatRow::new("Missing (%)", format!("{:.1}", column.missing_pct)),
        StatRow::new("Distinct", column.distinct.to_string()),
    ];
    let mut top_values = Vec::new();

    match &column.details {
        ColumnDetails::Numeric(summary) => stats.extend([
            StatRow::new("Min", number(summary.min)),
            StatRow::new("Max", number(summary.max)),
            StatRow::new("Mean", number(summary.mean)),
            StatRow::new("Median", number(summary.median)),
            StatRow::new("Std. deviation", number(summary.std_dev)),
            StatRow::new("Zeros", summary.zeros.to_string()),
        ]),
        ColumnDetails::Text(summary) => {
            stats.extend([
                StatRow::new("Min length", count(summary.min_length)),
                StatRow::new("Max length", count(summary.max_length)),
            ]);
            top_values = summary
                .top_values
                .iter()
                .map(|v| TopValue {
                    value: v.value.clone(),
                    count: v.count,
                })
                .collect();
        }
        ColumnDetails::Other => {}
    }

    ColumnView {
        name: column.name.clone(),
        data_type: column.data_type.clone(),
        stats,
        top_values,
    }
}

/// Renders a [`TableProfile`] as a single HTML page with the summary embedded
/// as JSON
#[derive(Debug, Clone)]
pub struct HtmlReportGenerator {
    top_values: usize,
}

impl Default for HtmlReportGenerator {
    fn default() -> Self {
        Self {
            top_values: DEFAULT_TOP_VALUES,
        }
    }
}

impl HtmlReportGenerator {
    #[must_use]
    pub fn with_top_values(mut self, top_values: usize) -> Self {
        self.top_values = top_values;
        self
    }

    /// Render an already computed profile
    pub fn render(&self, profile: &TableProfile) -> Result<String> {
        let summary_json = serde_json::to_string(profile)
            .map_err(|e| PrepError::Report(format!("failed to serialize profile: {e}")))?
            // keep the payload from closing its script element
            .replace("</", "<\\/");

        let template = ProfileTemplate {
            profile,
            missing_pct: format!("{:.1}", profile.missing_pct),
            columns: profile.column_profiles.iter().map(column_view).collect(),
            summary_json,
        };
        template.render().map_err(|e| {
            PrepError::Report(format!("failed to render '{}': {e}", profile.title))
        })
    }
}

impl ReportGenerator for HtmlReportGenerator {
    fn generate_report(&self, table: &Table, title: &str) -> Result<Vec<u8>> {
        let profile = profile_table(table, title, self.top_values)?;
        Ok(self.render(&profile)?.into_bytes())
    }
}
