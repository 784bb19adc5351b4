//! Missing-value filling and identifier normalization.
//!
//! Cleaning is a pure function of a table: it returns a new table together
//! with the diagnostics describing each change. After cleaning, no column
//! holds a missing value and every identifier column is text.

pub mod fill;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::{DataType, Field};

use crate::config::PipelineConfig;
use crate::diagnostics::{Diagnostic, Stage};
use crate::error::Result;
use crate::schema::{ColumnClass, classify, identifier_text};
use crate::table::Table;

pub use fill::{Filled, column_median, fill_numeric, fill_text, median};

/// Options for [`clean_table`]
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Fill value for missing categorical cells
    pub sentinel: String,
    /// Columns coerced to text after filling
    pub id_columns: Vec<String>,
}

impl CleanOptions {
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            sentinel: config.sentinel.clone(),
            id_columns: config.id_columns.clone(),
        }
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

/// Fill missing values, then coerce identifier columns to text
pub fn clean_table(table: &Table, options: &CleanOptions) -> Result<(Table, Vec<Diagnostic>)> {
    let (filled, mut diagnostics) = fill_missing(table, &options.sentinel)?;
    let (coerced, coercions) = coerce_identifiers(&filled, &options.id_columns)?;
    diagnostics.extend(coercions);
    Ok((coerced, diagnostics))
}

/// Fill every missing cell of a table
///
/// Text columns get `sentinel`; numeric columns get their median. Other
/// column types holding missing cells are converted to text and get
/// `sentinel`, as do numeric columns with no value to take a median of.
pub fn fill_missing(table: &Table, sentinel: &str) -> Result<(Table, Vec<Diagnostic>)> {
    let schema = table.schema();
    let mut diagnostics = Vec::new();
    let mut columns: Vec<(Field, ArrayRef)> = Vec::with_capacity(table.num_columns());

    for (field, array) in schema.fields().iter().zip(table.batch().columns()) {
        let name = field.name();
        let numeric = match classify(array.data_type()) {
            ColumnClass::Integer | ColumnClass::Float => fill_numeric(array)?,
            ColumnClass::Text | ColumnClass::Other => None,
        };

        let replacement = if let Some((filled, median)) = numeric {
            diagnostics.push(Diagnostic::new(
                Stage::Clean,
                table.name(),
                format!(
                    "filled {} missing values in '{name}' with median {median}",
                    filled.count
                ),
            ));
            Some(filled.array)
        } else if array.logical_null_count() > 0
            || classify(array.data_type()) == ColumnClass::Text
        {
            fill_text(array, sentinel)?.map(|filled| {
                diagnostics.push(Diagnostic::new(
                    Stage::Clean,
                    table.name(),
                    format!(
                        "filled {} missing values in '{name}' with '{sentinel}'",
                        filled.count
                    ),
                ));
                filled.array
            })
        } else {
            None
        };

        match replacement {
            Some(array) => columns.push((
                Field::new(name, array.data_type().clone(), field.is_nullable()),
                array,
            )),
            None => columns.push((field.as_ref().clone(), array.clone())),
        }
    }

    Ok((Table::from_columns(table.name(), columns)?, diagnostics))
}

/// Cast each identifier column present in the table to text
///
/// Identifiers absent from the table are skipped; schema validation is where
/// absence is reported. An identifier promoted to float by median filling
/// keeps the text form of its whole-number values.
pub fn coerce_identifiers(
    table: &Table,
    id_columns: &[String],
) -> Result<(Table, Vec<Diagnostic>)> {
    let schema = table.schema();
    let mut diagnostics = Vec::new();
    let mut columns: Vec<(Field, ArrayRef)> = Vec::with_capacity(table.num_columns());

    for (field, array) in schema.fields().iter().zip(table.batch().columns()) {
        let is_id = id_columns.iter().any(|id| id == field.name());
        if is_id && array.data_type() != &DataType::Utf8 {
            diagnostics.push(Diagnostic::new(
                Stage::Clean,
                table.name(),
                format!(
                    "converted '{}' from {} to text",
                    field.name(),
                    array.data_type()
                ),
            ));
            columns.push((
                Field::new(field.name(), DataType::Utf8, field.is_nullable()),
                identifier_text(array)?,
            ));
        } else {
            columns.push((field.as_ref().clone(), array.clone()));
        }
    }

    Ok((Table::from_columns(table.name(), columns)?, diagnostics))
}
