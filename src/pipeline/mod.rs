//! The end-to-end preparation run.
//!
//! Stages run in a fixed order over a [`PipelineContext`]:
//! load, validate, clean, merge, dedup, preview, write, profile, visualize.
//! If any input file is missing the run stops after loading, without creating
//! any output.

use std::path::PathBuf;
use std::time::Instant;

use crate::clean::{CleanOptions, clean_table};
use crate::config::{MERGED_TABLE_NAME, PipelineConfig, TableKind};
use crate::dedup::deduplicate_tables;
use crate::diagnostics::{Diagnostic, Stage};
use crate::error::{PrepError, Result};
use crate::loader::{MissingInput, load_tables};
use crate::merge::merge_tables;
use crate::profile::{HtmlReportGenerator, ReportGenerator, write_profiles};
use crate::schema::validate_tables;
use crate::table::{Table, TableSet, display_name};
use crate::utils::logging::console::{print_preview, print_table_summary};
use crate::utils::logging::log_warning;
use crate::visualize::{ChartOptions, render_comparisons};
use crate::writer::write_tables;

/// State carried between stages
#[derive(Debug)]
pub struct PipelineContext {
    pub config: PipelineConfig,
    /// Current version of every source table
    pub tables: TableSet,
    /// Source tables as loaded, before cleaning
    pub snapshot: TableSet,
    pub merged: Option<Table>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineContext {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            tables: TableSet::new(),
            snapshot: TableSet::new(),
            merged: None,
            diagnostics: Vec::new(),
        }
    }

    fn merged(&self) -> Result<&Table> {
        self.merged
            .as_ref()
            .ok_or_else(|| PrepError::MissingTable(MERGED_TABLE_NAME.to_string()))
    }

    /// Source tables followed by the merged table
    fn output_tables(&self) -> Result<Vec<&Table>> {
        let mut tables: Vec<&Table> = self.tables.iter().collect();
        tables.push(self.merged()?);
        Ok(tables)
    }
}

/// Everything a completed run produced
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub written: Vec<PathBuf>,
    pub profiles: Vec<PathBuf>,
    pub charts: Vec<PathBuf>,
    pub duplicates_removed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub enum PipelineOutcome {
    /// Inputs were missing; nothing was written
    Skipped { missing: Vec<MissingInput> },
    Completed(PipelineReport),
}

/// Load every input; returns the missing ones, if any
pub fn load_stage(ctx: &mut PipelineContext) -> Result<Vec<MissingInput>> {
    let outcome = load_tables(&ctx.config)?;
    for table in outcome.tables.iter() {
        ctx.diagnostics.push(Diagnostic::new(
            Stage::Load,
            table.name(),
            format!("loaded {} rows, {} columns", table.num_rows(), table.num_columns()),
        ));
    }
    for missing in &outcome.missing {
        ctx.diagnostics.push(Diagnostic::new(
            Stage::Load,
            &missing.name,
            format!("file not found: {}", missing.path.display()),
        ));
    }
    ctx.tables = outcome.tables;
    Ok(outcome.missing)
}

/// Check every table carries its required columns
pub fn validate_stage(ctx: &mut PipelineContext) -> Result<()> {
    let report = validate_tables(&ctx.tables);
    if !report.compatible {
        for issue in &report.issues {
            ctx.diagnostics.push(Diagnostic::new(
                Stage::Validate,
                &issue.table,
                issue.to_string(),
            ));
        }
        return Err(PrepError::Schema(report));
    }
    log::info!("Schema validation passed for {} tables", ctx.tables.len());
    Ok(())
}

/// Clean every table, keeping the loaded versions as the snapshot
pub fn clean_stage(ctx: &mut PipelineContext) -> Result<()> {
    let options = CleanOptions::from_config(&ctx.config);
    let mut cleaned = TableSet::new();
    for table in ctx.tables.iter() {
        let (table, diagnostics) = clean_table(table, &options)?;
        ctx.diagnostics.extend(diagnostics);
        cleaned.insert(table);
    }
    ctx.snapshot = std::mem::replace(&mut ctx.tables, cleaned);
    log::info!("Missing values handled");
    Ok(())
}

pub fn merge_stage(ctx: &mut PipelineContext) -> Result<()> {
    let (merged, diagnostics) = merge_tables(&ctx.tables)?;
    log::info!(
        "Tables merged into {} ({} rows, {} columns)",
        MERGED_TABLE_NAME,
        merged.num_rows(),
        merged.num_columns()
    );
    ctx.diagnostics.extend(diagnostics);
    ctx.merged = Some(merged);
    Ok(())
}

/// Drop duplicate rows from the source tables; returns how many went
pub fn dedup_stage(ctx: &mut PipelineContext) -> Result<usize> {
    let (tables, diagnostics) = deduplicate_tables(&ctx.tables)?;
    let removed = ctx
        .tables
        .iter()
        .zip(tables.iter())
        .map(|(before, after)| before.num_rows() - after.num_rows())
        .sum();
    ctx.diagnostics.extend(diagnostics);
    ctx.tables = tables;
    Ok(removed)
}

pub fn preview_stage(ctx: &PipelineContext) -> Result<()> {
    let rows = ctx.config.preview_rows;
    for table in ctx.tables.iter() {
        let title = format!("{} table", display_name(table.name()));
        print_preview(&title, table, rows)?;
    }
    let merged = ctx.merged()?;
    print_table_summary(merged);
    print_preview("Merged data", merged, rows)
}

fn table_names(tables: &[&Table]) -> Vec<String> {
    tables.iter().map(|t| t.name().to_string()).collect()
}

fn record_outputs(
    ctx: &mut PipelineContext,
    stage: Stage,
    names: Vec<String>,
    paths: &[PathBuf],
) {
    ctx.diagnostics
        .extend(names.into_iter().zip(paths).map(|(name, path)| {
            Diagnostic::new(stage, name, format!("wrote {}", path.display()))
        }));
}

pub fn write_stage(ctx: &mut PipelineContext) -> Result<Vec<PathBuf>> {
    let output_dir = ctx.config.output_path();
    let tables = ctx.output_tables()?;
    let names = table_names(&tables);
    let written = write_tables(&output_dir, tables)?;
    record_outputs(ctx, Stage::Write, names, &written);
    Ok(written)
}

pub fn profile_stage(
    ctx: &mut PipelineContext,
    generator: &dyn ReportGenerator,
) -> Result<Vec<PathBuf>> {
    let output_dir = ctx.config.output_path();
    let tables = ctx.output_tables()?;
    let names = table_names(&tables);
    let written = write_profiles(generator, &output_dir, tables)?;
    record_outputs(ctx, Stage::Profile, names, &written);
    Ok(written)
}

/// Before/after charts for the postings table, when enabled
pub fn visualize_stage(ctx: &mut PipelineContext) -> Result<Vec<PathBuf>> {
    if !ctx.config.render_charts {
        log::debug!("Chart rendering disabled");
        return Ok(Vec::new());
    }

    let name = TableKind::JobPostings.name();
    let (Some(before), Some(after)) = (ctx.snapshot.get(name), ctx.tables.get(name)) else {
        log_warning(&format!("No {name} table to chart"), None);
        return Ok(Vec::new());
    };

    let options = ChartOptions::from_config(&ctx.config);
    let outcome = render_comparisons(&ctx.config.output_path(), before, after, &options)?;
    ctx.diagnostics.extend(outcome.diagnostics);
    Ok(outcome.written)
}

/// Run every stage with the built-in HTML profiler
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome> {
    run_pipeline_with(config, &HtmlReportGenerator::default())
}

/// Run every stage with the given report generator
pub fn run_pipeline_with(
    config: &PipelineConfig,
    generator: &dyn ReportGenerator,
) -> Result<PipelineOutcome> {
    let start = Instant::now();
    let mut ctx = PipelineContext::new(config.clone());

    let missing = load_stage(&mut ctx)?;
    if !missing.is_empty() {
        log_warning(
            "One or more files are missing. Please check the file paths and try again.",
            None,
        );
        return Ok(PipelineOutcome::Skipped { missing });
    }

    validate_stage(&mut ctx)?;
    clean_stage(&mut ctx)?;
    merge_stage(&mut ctx)?;
    let duplicates_removed = dedup_stage(&mut ctx)?;
    preview_stage(&ctx)?;

    let written = write_stage(&mut ctx)?;
    let profiles = profile_stage(&mut ctx, generator)?;
    let charts = visualize_stage(&mut ctx)?;

    log::info!("Data preparation complete in {:?}", start.elapsed());
    Ok(PipelineOutcome::Completed(PipelineReport {
        written,
        profiles,
        charts,
        duplicates_removed,
        diagnostics: ctx.diagnostics,
    }))
}
