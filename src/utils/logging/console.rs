//! Console output utilities
//!
//! Table previews are printed to stdout so they stay readable regardless of
//! the log filter.

use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;
use crate::table::{Table, display_name};

/// Render the first `rows` rows of a table as an ASCII grid
pub fn format_preview(table: &Table, rows: usize) -> Result<String> {
    let head = table.head(rows);
    Ok(pretty_format_batches(&[head])?.to_string())
}

/// Print a titled preview of a table
pub fn print_preview(title: &str, table: &Table, rows: usize) -> Result<()> {
    println!("{title} (first {rows} rows):");
    println!("{}", format_preview(table, rows)?);
    Ok(())
}

/// Print row and column counts with the column types
pub fn print_table_summary(table: &Table) {
    println!(
        "{} table: {} rows x {} columns",
        display_name(table.name()),
        table.num_rows(),
        table.num_columns()
    );
    for field in table.schema().fields() {
        println!("  - {} ({})", field.name(), field.data_type());
    }
}
