//! Missing-value filling for single columns.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float64Array, Scalar, StringArray};
use arrow::compute::kernels::{cast, zip};
use arrow::datatypes::{DataType, Float64Type};

use crate::error::Result;
use crate::schema::{is_integer, to_float64, to_text};

/// A column after filling, with what was done to it
#[derive(Debug)]
pub struct Filled {
    pub array: ArrayRef,
    /// Number of cells replaced
    pub count: usize,
}

/// Median of the given values, `None` if there are none
///
/// NaN values are ignored.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median of the non-missing values of a numeric column
pub fn column_median(array: &ArrayRef) -> Result<Option<f64>> {
    let values = to_float64(array)?;
    let values: Vec<f64> = values
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    Ok(median(&values))
}

/// Replace null (and NaN) cells of a numeric column with the column median
///
/// Integer columns keep their type unless the median has a fractional part,
/// in which case the column becomes `Float64`. Returns `None` when nothing is
/// missing or when no value exists to take a median of.
pub fn fill_numeric(array: &ArrayRef) -> Result<Option<(Filled, f64)>> {
    let values = to_float64(array)?;
    let values = values.as_primitive::<Float64Type>();

    let mask: BooleanArray = values
        .iter()
        .map(|v| Some(v.is_none_or(f64::is_nan)))
        .collect();
    let count = mask.true_count();
    if count == 0 {
        return Ok(None);
    }

    let Some(fill) = column_median(array)? else {
        return Ok(None);
    };

    let target = if is_integer(array.data_type()) && fill.fract() != 0.0 {
        DataType::Float64
    } else {
        array.data_type().clone()
    };

    let base = cast::cast(array, &target)?;
    let fill_value: ArrayRef = Arc::new(Float64Array::from(vec![fill]));
    let fill_value = Scalar::new(cast::cast(&fill_value, &target)?);
    let filled = zip::zip(&mask, &fill_value, &base)?;

    Ok(Some((Filled { array: filled, count }, fill)))
}

/// Replace null and empty cells with `sentinel`, converting the column to text
///
/// Returns `None` when nothing is missing and the column is already text.
pub fn fill_text(array: &ArrayRef, sentinel: &str) -> Result<Option<Filled>> {
    let text = to_text(array)?;
    let text = text.as_string::<i32>();

    let count = text
        .iter()
        .filter(|v| v.is_none_or(str::is_empty))
        .count();
    if count == 0 {
        return Ok(None);
    }

    let filled: StringArray = text
        .iter()
        .map(|v| match v {
            Some(s) if !s.is_empty() => Some(s),
            _ => Some(sentinel),
        })
        .collect();

    Ok(Some(Filled {
        array: Arc::new(filled),
        count,
    }))
}
