//! Processed CSV output.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::table::{Table, display_name};
use crate::utils::io::write_csv;

/// File name of a table's processed CSV
#[must_use]
pub fn processed_file_name(table_name: &str) -> String {
    format!("{table_name}_processed.csv")
}

/// Write one table to `<output_dir>/<name>_processed.csv`
pub fn write_table(output_dir: &Path, table: &Table) -> Result<PathBuf> {
    let path = output_dir.join(processed_file_name(table.name()));
    write_csv(&path, table.batch())?;
    log::info!(
        "{} table saved to {}",
        display_name(table.name()),
        path.display()
    );
    Ok(path)
}

/// Write every table, creating `output_dir` if needed
///
/// Returns the written paths in table order.
pub fn write_tables<'a>(
    output_dir: &Path,
    tables: impl IntoIterator<Item = &'a Table>,
) -> Result<Vec<PathBuf>> {
    ensure_directory(output_dir)?;
    tables
        .into_iter()
        .map(|table| write_table(output_dir, table))
        .collect()
}
