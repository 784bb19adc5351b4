//! Batch preparation of a job-postings dataset: load four CSV tables, fill
//! missing values, join them into one wide table, deduplicate, and write
//! processed CSVs with profile reports and comparison charts.

pub mod clean;
pub mod config;
pub mod dedup;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod merge;
pub mod pipeline;
pub mod profile;
pub mod schema;
pub mod table;
pub mod utils;
pub mod visualize;
pub mod writer;

// Core types
pub use config::{PipelineConfig, TableKind, TableSource};
pub use error::{PrepError, Result};
pub use table::{Table, TableSet};

// Stages
pub use clean::{CleanOptions, clean_table};
pub use dedup::{count_duplicates, drop_duplicates};
pub use loader::{LoadOutcome, MissingInput, load_tables};
pub use merge::{left_join, merge_tables};
pub use pipeline::{PipelineContext, PipelineOutcome, PipelineReport, run_pipeline};
pub use profile::{HtmlReportGenerator, ReportGenerator};
pub use schema::{SchemaReport, validate_tables};
pub use writer::write_tables;

// Arrow types
pub use arrow::record_batch::RecordBatch;
