//! Column type classification.
//!
//! The cleaner treats columns by class rather than by exact Arrow type:
//! text is filled with the sentinel, numbers with their median, and anything
//! else is turned into text first.

use arrow::datatypes::DataType;

/// How the cleaner treats a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Text,
    Integer,
    Float,
    /// Booleans, dates, timestamps and all-empty columns
    Other,
}

/// Classify an Arrow data type
#[must_use]
pub const fn classify(data_type: &DataType) -> ColumnClass {
    if is_string(data_type) {
        ColumnClass::Text
    } else if is_integer(data_type) {
        ColumnClass::Integer
    } else if is_numeric(data_type) {
        ColumnClass::Float
    } else {
        ColumnClass::Other
    }
}

/// Identifies whether a data type is numeric
#[must_use]
pub const fn is_numeric(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
    )
}

/// Identifies whether a data type is an integer type
#[must_use]
pub const fn is_integer(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Identifies whether a data type is a string type
#[must_use]
pub const fn is_string(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8)
}
