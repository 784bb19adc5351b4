//! Log lines shared by the stages

use std::path::Path;
use std::time::Duration;

/// Announce a file operation at debug level
pub fn log_operation_start(operation: &str, path: &Path) {
    log::debug!("{operation}: {}", path.display());
}

/// Report a finished file operation, e.g. `Read 120 rows from x.csv in 3.1ms`
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Duration) {
    log::info!("{operation} {rows} rows: {} in {elapsed:.2?}", path.display());
}

/// Warn about a condition that does not stop the run
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
