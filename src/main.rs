use anyhow::Context;
use jobprep::{PipelineConfig, PipelineOutcome, run_pipeline};
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    info!(
        "Preparing job postings data from {}",
        config.base_dir.display()
    );

    match run_pipeline(&config).context("data preparation failed")? {
        PipelineOutcome::Skipped { missing } => {
            for input in &missing {
                warn!("Missing {} input: {}", input.name, input.path.display());
            }
        }
        PipelineOutcome::Completed(report) => {
            info!(
                "Wrote {} CSV files, {} profile reports and {} charts to {}",
                report.written.len(),
                report.profiles.len(),
                report.charts.len(),
                config.output_path().display()
            );
            if report.duplicates_removed > 0 {
                info!("Removed {} duplicate rows in total", report.duplicates_removed);
            }
            for diagnostic in &report.diagnostics {
                log::debug!("{diagnostic}");
            }
        }
    }

    Ok(())
}
