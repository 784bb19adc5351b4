//! Chart data extracted from tables.

use arrow::array::{Array, AsArray};
use arrow::datatypes::Float64Type;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::schema::{is_numeric, to_float64, to_text};
use crate::table::Table;

/// Missing-cell grid over the first rows of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingGrid {
    pub columns: Vec<String>,
    pub rows: usize,
    /// `(row, column)` of every missing cell
    pub missing: Vec<(usize, usize)>,
}

pub fn missing_grid(table: &Table, max_rows: usize) -> MissingGrid {
    let rows = table.num_rows().min(max_rows);
    let mut missing = Vec::new();
    for (col_idx, array) in table.batch().columns().iter().enumerate() {
        if array.logical_null_count() == 0 {
            continue;
        }
        let nulls = array.logical_nulls();
        for row in 0..rows {
            if nulls.as_ref().is_some_and(|n| n.is_null(row)) {
                missing.push((row, col_idx));
            }
        }
    }
    missing.sort_unstable();

    MissingGrid {
        columns: table.column_names(),
        rows,
        missing,
    }
}

/// Non-missing values of a numeric column
///
/// `None` when the column is absent or not numeric.
pub fn numeric_values(table: &Table, column: &str) -> Result<Option<Vec<f64>>> {
    let Ok(array) = table.column(column) else {
        return Ok(None);
    };
    if !is_numeric(array.data_type()) {
        return Ok(None);
    }
    let values = to_float64(array)?;
    Ok(Some(
        values
            .as_primitive::<Float64Type>()
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect(),
    ))
}

/// One histogram bucket, `[start, end)` except the last which includes `end`
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Common `(min, max)` over several value sets
pub fn value_range<'a>(sets: impl IntoIterator<Item = &'a [f64]>) -> Option<(f64, f64)> {
    sets.into_iter()
        .flat_map(|s| s.iter().copied())
        .minmax_by(f64::total_cmp)
        .into_option()
}

/// Bucket values into `bins` equal-width bins over `range`
pub fn histogram(values: &[f64], range: (f64, f64), bins: usize) -> Vec<Bin> {
    let bins = bins.max(1);
    let (min, max) = range;
    // a degenerate range still gets a visible bar
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Occurrences of each non-missing value of a column, as text
///
/// `None` when the column is absent.
pub fn category_counts(table: &Table, column: &str) -> Result<Option<FxHashMap<String, usize>>> {
    let Ok(array) = table.column(column) else {
        return Ok(None);
    };
    let text = to_text(array)?;
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for value in text.as_string::<i32>().iter().flatten() {
        *counts.entry(value.to_string()).or_default() += 1;
    }
    Ok(Some(counts))
}

/// Category order shared by both panels: most frequent after cleaning first
pub fn category_order(
    before: &FxHashMap<String, usize>,
    after: &FxHashMap<String, usize>,
) -> Vec<String> {
    before
        .keys()
        .chain(after.keys())
        .unique()
        .sorted_by(|a, b| {
            let count = |k: &str| after.get(k).copied().unwrap_or(0);
            count(b.as_str())
                .cmp(&count(a.as_str()))
                .then_with(|| a.cmp(b))
        })
        .cloned()
        .collect()
}
