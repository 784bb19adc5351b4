//! Exact-duplicate row removal.
//!
//! Two rows are duplicates when every column holds the same value, missing
//! values included. The first occurrence is kept. Rows are compared through
//! Arrow's row format so all column types hash uniformly.

use arrow::array::BooleanArray;
use arrow::compute::filter_record_batch;
use arrow::row::{RowConverter, SortField};
use rustc_hash::FxHashSet;

use crate::diagnostics::{Diagnostic, Stage};
use crate::error::Result;
use crate::table::{Table, TableSet, display_name};

/// Mask that is true for the first occurrence of each distinct row
pub fn first_occurrence_mask(table: &Table) -> Result<BooleanArray> {
    let fields = table
        .schema()
        .fields()
        .iter()
        .map(|f| SortField::new(f.data_type().clone()))
        .collect();
    let converter = RowConverter::new(fields)?;
    let rows = converter.convert_columns(table.batch().columns())?;

    let mut seen = FxHashSet::default();
    Ok(rows.iter().map(|row| Some(seen.insert(row))).collect())
}

/// Number of rows that repeat an earlier row exactly
pub fn count_duplicates(table: &Table) -> Result<usize> {
    let mask = first_occurrence_mask(table)?;
    Ok(mask.len() - mask.true_count())
}

/// Remove exact duplicate rows, returning the table and how many were removed
pub fn drop_duplicates(table: &Table) -> Result<(Table, usize)> {
    let mask = first_occurrence_mask(table)?;
    let removed = mask.len() - mask.true_count();
    if removed == 0 {
        return Ok((table.clone(), 0));
    }

    let batch = filter_record_batch(table.batch(), &mask)?;
    Ok((table.with_batch(batch), removed))
}

/// Deduplicate every table in the set
///
/// A diagnostic is produced for each table that lost rows.
pub fn deduplicate_tables(tables: &TableSet) -> Result<(TableSet, Vec<Diagnostic>)> {
    let mut deduplicated = TableSet::new();
    let mut diagnostics = Vec::new();

    for table in tables.iter() {
        let (table, removed) = drop_duplicates(table)?;
        if removed > 0 {
            log::info!(
                "Removed {removed} duplicate rows from {} table",
                display_name(table.name())
            );
            diagnostics.push(Diagnostic::new(
                Stage::Dedup,
                table.name(),
                format!("removed {removed} duplicate rows"),
            ));
        }
        deduplicated.insert(table);
    }

    Ok((deduplicated, diagnostics))
}
