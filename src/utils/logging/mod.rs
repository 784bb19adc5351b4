//! Log helpers, console previews and progress bars

pub mod console;
pub mod log;
pub mod progress;

pub use self::log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{finish_progress_bar, table_progress_bar};
