//! Left joins between tables.
//!
//! Rows are matched on a single key column compared as text. The join keeps
//! every left row in order and repeats it once per matching right row; a left
//! row without a match appears once with all right-side columns missing.

use std::collections::HashSet;

use arrow::array::{ArrayRef, AsArray, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::Field;
use rustc_hash::FxHashMap;

use crate::config::{MERGED_TABLE_NAME, TableKind};
use crate::diagnostics::{Diagnostic, Stage};
use crate::error::{PrepError, Result};
use crate::schema::to_text;
use crate::table::{Table, TableSet};

/// Suffix added to overlapping left-side column names
pub const LEFT_SUFFIX: &str = "_x";
/// Suffix added to overlapping right-side column names
pub const RIGHT_SUFFIX: &str = "_y";

/// Row pairs produced by matching two key columns
#[derive(Debug, Default)]
struct JoinIndices {
    left: Vec<u32>,
    right: Vec<Option<u32>>,
}

fn row_index(idx: usize) -> Result<u32> {
    u32::try_from(idx)
        .map_err(|_| PrepError::Config(format!("row index {idx} exceeds the join limit")))
}

/// Match left keys against right keys, preserving left order
fn match_keys(left: &ArrayRef, right: &ArrayRef) -> Result<JoinIndices> {
    let left = to_text(left)?;
    let right = to_text(right)?;
    let left = left.as_string::<i32>();
    let right = right.as_string::<i32>();

    let mut lookup: FxHashMap<&str, Vec<u32>> = FxHashMap::default();
    for (idx, key) in right.iter().enumerate() {
        if let Some(key) = key {
            lookup.entry(key).or_default().push(row_index(idx)?);
        }
    }

    let mut indices = JoinIndices::default();
    for (idx, key) in left.iter().enumerate() {
        let idx = row_index(idx)?;
        match key.and_then(|k| lookup.get(k)) {
            Some(matches) => {
                for &right_idx in matches {
                    indices.left.push(idx);
                    indices.right.push(Some(right_idx));
                }
            }
            None => {
                indices.left.push(idx);
                indices.right.push(None);
            }
        }
    }
    Ok(indices)
}

/// Left-join `right` onto `left` on the column `key`
///
/// The key column appears once, from the left side. Other column names
/// present on both sides get [`LEFT_SUFFIX`] and [`RIGHT_SUFFIX`]. The result
/// keeps the left table's name.
///
/// # Errors
/// Returns [`PrepError::MissingColumn`] if either table lacks `key`.
pub fn left_join(left: &Table, right: &Table, key: &str) -> Result<Table> {
    let indices = match_keys(left.column(key)?, right.column(key)?)?;
    let left_take = UInt32Array::from(indices.left);
    let right_take = UInt32Array::from(indices.right);

    let left_schema = left.schema();
    let right_schema = right.schema();
    let left_names: HashSet<&str> = left_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    let right_names: HashSet<&str> = right_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .filter(|name| *name != key)
        .collect();

    let mut columns: Vec<(Field, ArrayRef)> = Vec::new();

    for (field, array) in left_schema.fields().iter().zip(left.batch().columns()) {
        let name = if field.name() != key && right_names.contains(field.name().as_str()) {
            format!("{}{LEFT_SUFFIX}", field.name())
        } else {
            field.name().clone()
        };
        let taken = take(array.as_ref(), &left_take, None)?;
        columns.push((
            Field::new(name, field.data_type().clone(), field.is_nullable()),
            taken,
        ));
    }

    for (field, array) in right_schema.fields().iter().zip(right.batch().columns()) {
        if field.name() == key {
            continue;
        }
        let name = if left_names.contains(field.name().as_str()) {
            format!("{}{RIGHT_SUFFIX}", field.name())
        } else {
            field.name().clone()
        };
        let taken = take(array.as_ref(), &right_take, None)?;
        columns.push((Field::new(name, field.data_type().clone(), true), taken));
    }

    Table::from_columns(left.name(), columns)
}

/// Join the four inputs into the merged table
///
/// postings ⟕ skills on `job_id`, then ⟕ companies on `company_id`, then
/// ⟕ skill mapping on `skill_id`.
pub fn merge_tables(tables: &TableSet) -> Result<(Table, Vec<Diagnostic>)> {
    let postings = tables.require(TableKind::JobPostings.name())?;
    let steps = [
        (TableKind::JobSkills, "job_id"),
        (TableKind::Companies, "company_id"),
        (TableKind::MappingSkills, "skill_id"),
    ];

    let mut diagnostics = Vec::new();
    let mut merged = postings.renamed(MERGED_TABLE_NAME);

    for (kind, key) in steps {
        let right = tables.require(kind.name())?;
        let before = merged.num_rows();
        merged = left_join(&merged, right, key)?;
        diagnostics.push(Diagnostic::new(
            Stage::Merge,
            MERGED_TABLE_NAME,
            format!(
                "joined {} on '{key}': {before} -> {} rows",
                kind.name(),
                merged.num_rows()
            ),
        ));
    }

    Ok((merged, diagnostics))
}
