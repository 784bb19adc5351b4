//! Module for converting columns between types.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Float64Type};

use crate::error::Result;

/// Convert any array to its `Utf8` text representation
///
/// Nulls stay null. A `Utf8` array is returned as-is.
pub fn to_text(array: &ArrayRef) -> Result<ArrayRef> {
    if array.data_type() == &DataType::Utf8 {
        return Ok(array.clone());
    }
    Ok(cast::cast(array, &DataType::Utf8)?)
}

/// Text form of an identifier column
///
/// Whole-number floats are written without a fractional part, matching the
/// integer form of the same identifier. Other types go through [`to_text`].
pub fn identifier_text(array: &ArrayRef) -> Result<ArrayRef> {
    if !array.data_type().is_floating() {
        return to_text(array);
    }
    let values = to_float64(array)?;
    let text: StringArray = values
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| {
            v.map(|v| {
                if v.is_finite() && v.fract() == 0.0 {
                    format!("{v:.0}")
                } else {
                    v.to_string()
                }
            })
        })
        .collect();
    Ok(Arc::new(text))
}

/// Convert a numeric array to `Float64`
pub fn to_float64(array: &ArrayRef) -> Result<ArrayRef> {
    if array.data_type() == &DataType::Float64 {
        return Ok(array.clone());
    }
    Ok(cast::cast(array, &DataType::Float64)?)
}
