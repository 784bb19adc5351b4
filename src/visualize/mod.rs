//! Before/after comparison charts for the postings table.
//!
//! Each chart is an SVG file with the raw data on the left and the cleaned
//! data on the right. A chart whose column is missing or cannot be plotted is
//! skipped with a warning rather than failing the run.

pub mod data;
pub mod svg;

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::diagnostics::{Diagnostic, Stage};
use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::table::Table;
use crate::utils::logging::log_warning;

pub const MISSING_HEATMAP_FILE: &str = "job_postings_missing_heatmap.svg";
pub const SALARY_DISTRIBUTION_FILE: &str = "salary_distribution.svg";
pub const JOB_TYPE_COUNTS_FILE: &str = "job_type_counts.svg";

/// Rows shown in the missing-value grid
pub const HEATMAP_MAX_ROWS: usize = 500;
pub const HISTOGRAM_BINS: usize = 20;

/// Chart settings taken from the pipeline configuration
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub numeric_column: String,
    pub category_column: String,
    pub heatmap_rows: usize,
    pub bins: usize,
}

impl ChartOptions {
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            numeric_column: config.salary_column.clone(),
            category_column: config.job_type_column.clone(),
            heatmap_rows: HEATMAP_MAX_ROWS,
            bins: HISTOGRAM_BINS,
        }
    }
}

/// Charts written and charts skipped
#[derive(Debug, Default)]
pub struct ChartOutcome {
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ChartOutcome {
    fn skip(&mut self, table: &str, chart: &str, reason: &str) {
        log_warning(&format!("Skipping {chart}: {reason}"), None);
        self.diagnostics.push(Diagnostic::new(
            Stage::Visualize,
            table,
            format!("skipped {chart}: {reason}"),
        ));
    }

    fn wrote(&mut self, table: &str, path: PathBuf) {
        log::info!("Chart saved to {}", path.display());
        self.diagnostics.push(Diagnostic::new(
            Stage::Visualize,
            table,
            format!("wrote {}", path.display()),
        ));
        self.written.push(path);
    }
}

fn histogram_chart(
    output_dir: &Path,
    before: &Table,
    after: &Table,
    options: &ChartOptions,
    outcome: &mut ChartOutcome,
) -> Result<()> {
    let column = options.numeric_column.as_str();
    let (Some(raw), Some(cleaned)) = (
        data::numeric_values(before, column)?,
        data::numeric_values(after, column)?,
    ) else {
        outcome.skip(
            after.name(),
            SALARY_DISTRIBUTION_FILE,
            &format!("'{column}' is absent or not numeric"),
        );
        return Ok(());
    };
    let Some(range) = data::value_range([raw.as_slice(), cleaned.as_slice()]) else {
        outcome.skip(
            after.name(),
            SALARY_DISTRIBUTION_FILE,
            &format!("'{column}' has no values"),
        );
        return Ok(());
    };

    let path = output_dir.join(SALARY_DISTRIBUTION_FILE);
    svg::draw_histogram(
        &path,
        column,
        &data::histogram(&raw, range, options.bins),
        &data::histogram(&cleaned, range, options.bins),
    )?;
    outcome.wrote(after.name(), path);
    Ok(())
}

fn category_chart(
    output_dir: &Path,
    before: &Table,
    after: &Table,
    options: &ChartOptions,
    outcome: &mut ChartOutcome,
) -> Result<()> {
    let column = options.category_column.as_str();
    let (Some(raw), Some(cleaned)) = (
        data::category_counts(before, column)?,
        data::category_counts(after, column)?,
    ) else {
        outcome.skip(
            after.name(),
            JOB_TYPE_COUNTS_FILE,
            &format!("'{column}' is absent"),
        );
        return Ok(());
    };

    let categories = data::category_order(&raw, &cleaned);
    if categories.is_empty() {
        outcome.skip(
            after.name(),
            JOB_TYPE_COUNTS_FILE,
            &format!("'{column}' has no values"),
        );
        return Ok(());
    }

    let path = output_dir.join(JOB_TYPE_COUNTS_FILE);
    svg::draw_category_counts(&path, column, &categories, &raw, &cleaned)?;
    outcome.wrote(after.name(), path);
    Ok(())
}

/// Render the three comparison charts for one table
///
/// `before` is the table as loaded, `after` the cleaned table.
pub fn render_comparisons(
    output_dir: &Path,
    before: &Table,
    after: &Table,
    options: &ChartOptions,
) -> Result<ChartOutcome> {
    ensure_directory(output_dir)?;
    let mut outcome = ChartOutcome::default();

    if before.num_columns() == 0 {
        outcome.skip(after.name(), MISSING_HEATMAP_FILE, "table has no columns");
    } else {
        let path = output_dir.join(MISSING_HEATMAP_FILE);
        svg::draw_missing_heatmap(
            &path,
            &data::missing_grid(before, options.heatmap_rows),
            &data::missing_grid(after, options.heatmap_rows),
        )?;
        outcome.wrote(after.name(), path);
    }

    histogram_chart(output_dir, before, after, options, &mut outcome)?;
    category_chart(output_dir, before, after, options, &mut outcome)?;
    Ok(outcome)
}
