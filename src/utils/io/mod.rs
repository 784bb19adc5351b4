//! IO utilities for file operations
//!
//! This module provides CSV reading and writing on top of Arrow's CSV codec.

pub mod csv;

// Re-export commonly used functions for convenience
pub use csv::{read_csv, write_csv};
