//! Progress bars for work done one table at a time

use indicatif::{ProgressBar, ProgressStyle};

const TABLE_BAR_TEMPLATE: &str =
    "{spinner:.green} {prefix} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// A bar that advances once per table
#[must_use]
pub fn table_progress_bar(tables: usize, prefix: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(TABLE_BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    ProgressBar::new(tables as u64)
        .with_style(style)
        .with_prefix(prefix.to_string())
}

pub fn finish_progress_bar(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(message.to_string());
}
