//! Reading and writing CSV files as Arrow record batches

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use regex::Regex;

use crate::error::util::{safe_create_file, safe_open_file};
use crate::error::{PrepError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Default number of rows per batch when reading CSV
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Rows per record batch
    pub batch_size: usize,
    /// Cells matching this pattern are read as missing
    pub null_regex: Option<Regex>,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            null_regex: None,
        }
    }
}

impl CsvReadOptions {
    /// Treat empty fields and each of `tokens` as missing
    pub fn with_null_tokens<S: AsRef<str>>(mut self, tokens: &[S]) -> Result<Self> {
        let alternatives = tokens.iter().map(|t| regex::escape(t.as_ref())).join("|");
        let pattern = format!("^(?:{alternatives})?$");
        let regex = Regex::new(&pattern)
            .map_err(|e| PrepError::Config(format!("null token pattern {pattern}: {e}")))?;
        self.null_regex = Some(regex);
        Ok(self)
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    fn format(&self) -> Format {
        let format = Format::default().with_header(true);
        match &self.null_regex {
            Some(regex) => format.with_null_regex(regex.clone()),
            None => format,
        }
    }
}

/// Read a CSV file with a header row into Arrow record batches
///
/// Column types are inferred from every record in the file.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `options` - Batch size and null handling
///
/// # Returns
/// The inferred schema and the batches read
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid CSV
pub fn read_csv(path: &Path, options: &CsvReadOptions) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let start = Instant::now();
    log_operation_start("Reading CSV file", path);

    let mut file = safe_open_file(path, "CSV input")?;
    let format = options.format();
    let (schema, _) = format.infer_schema(&mut file, None)?;
    file.rewind().map_err(|e| PrepError::io(path, e))?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(options.batch_size.max(1))
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let rows = batches.iter().map(RecordBatch::num_rows).sum();

    log_operation_complete("Read", path, rows, start.elapsed());
    Ok((schema, batches))
}

/// Write a record batch to a CSV file with a header row
///
/// Missing values are written as empty fields. Any existing file is replaced.
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    let file = safe_create_file(path, "CSV output")?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    drop(writer);

    log_operation_complete("Wrote", path, batch.num_rows(), start.elapsed());
    Ok(())
}
