//! Descriptive statistics for profile reports.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::Float64Type;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::clean::median;
use crate::dedup::count_duplicates;
use crate::error::Result;
use crate::schema::{ColumnClass, classify, to_float64};
use crate::table::Table;

/// Whole-table statistics
#[derive(Debug, Clone, Serialize)]
pub struct TableProfile {
    pub title: String,
    pub table: String,
    pub rows: usize,
    pub columns: usize,
    pub missing_cells: usize,
    pub missing_pct: f64,
    pub duplicate_rows: usize,
    pub generated_at: String,
    pub column_profiles: Vec<ColumnProfile>,
}

/// Statistics of one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: String,
    /// Non-missing cells
    pub count: usize,
    pub missing: usize,
    pub missing_pct: f64,
    pub distinct: usize,
    pub details: ColumnDetails,
}

/// Type-specific statistics
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnDetails {
    Numeric(NumericSummary),
    Text(TextSummary),
    Other,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation, absent below two values
    pub std_dev: Option<f64>,
    pub zeros: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextSummary {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Most frequent values, most frequent first
    pub top_values: Vec<ValueCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Count each distinct non-missing value by its display form
fn value_counts(array: &ArrayRef) -> Result<FxHashMap<String, usize>> {
    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for idx in 0..array.len() {
        if array.is_valid(idx) {
            *counts.entry(formatter.value(idx).to_string()).or_default() += 1;
        }
    }
    Ok(counts)
}

fn numeric_summary(array: &ArrayRef) -> Result<NumericSummary> {
    let values = to_float64(array)?;
    let values: Vec<f64> = values
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();

    let n = values.len();
    let mean = (n > 0).then(|| values.iter().sum::<f64>() / n as f64);
    let std_dev = match mean {
        Some(mean) if n > 1 => {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            Some(var.sqrt())
        }
        _ => None,
    };

    Ok(NumericSummary {
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
        mean,
        median: median(&values),
        std_dev,
        zeros: values.iter().filter(|v| **v == 0.0).count(),
    })
}

fn text_summary(counts: &FxHashMap<String, usize>, top: usize) -> TextSummary {
    let lengths = counts.keys().map(|v| v.chars().count());
    let (min_length, max_length) = match lengths.minmax().into_option() {
        Some((min, max)) => (Some(min), Some(max)),
        None => (None, None),
    };

    let top_values = counts
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .take(top)
        .map(|(value, count)| ValueCount {
            value: value.clone(),
            count: *count,
        })
        .collect();

    TextSummary {
        min_length,
        max_length,
        top_values,
    }
}

/// Profile one column
pub fn profile_column(name: &str, array: &ArrayRef, top: usize) -> Result<ColumnProfile> {
    let len = array.len();
    let missing = array.logical_null_count();
    let counts = value_counts(array)?;

    let details = match classify(array.data_type()) {
        ColumnClass::Integer | ColumnClass::Float => {
            ColumnDetails::Numeric(numeric_summary(array)?)
        }
        ColumnClass::Text => ColumnDetails::Text(text_summary(&counts, top)),
        ColumnClass::Other => ColumnDetails::Other,
    };

    Ok(ColumnProfile {
        name: name.to_string(),
        data_type: array.data_type().to_string(),
        count: len - missing,
        missing,
        missing_pct: percent(missing, len),
        distinct: counts.len(),
        details,
    })
}

/// Profile every column of a table
pub fn profile_table(table: &Table, title: &str, top: usize) -> Result<TableProfile> {
    let schema = table.schema();
    let column_profiles = schema
        .fields()
        .iter()
        .zip(table.batch().columns())
        .map(|(field, array)| profile_column(field.name(), array, top))
        .collect::<Result<Vec<_>>>()?;

    let missing_cells = table.missing_cells();
    Ok(TableProfile {
        title: title.to_string(),
        table: table.name().to_string(),
        rows: table.num_rows(),
        columns: table.num_columns(),
        missing_cells,
        missing_pct: percent(missing_cells, table.num_rows() * table.num_columns()),
        duplicate_rows: count_duplicates(table)?,
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        column_profiles,
    })
}
