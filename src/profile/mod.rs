//! Statistical profile reports.
//!
//! Report rendering sits behind [`ReportGenerator`] so the pipeline only
//! deals in bytes. [`HtmlReportGenerator`] is the built-in implementation.

pub mod html;
pub mod stats;

use std::path::{Path, PathBuf};

pub use html::HtmlReportGenerator;
pub use stats::{ColumnDetails, ColumnProfile, TableProfile, profile_table};

use crate::config::MERGED_TABLE_NAME;
use crate::error::Result;
use crate::error::util::{ensure_directory, safe_write};
use crate::table::{Table, display_name};
use crate::utils::logging::{finish_progress_bar, table_progress_bar};

/// Produces a profile report for a table
pub trait ReportGenerator {
    fn generate_report(&self, table: &Table, title: &str) -> Result<Vec<u8>>;
}

/// File name of a table's profile report
#[must_use]
pub fn profile_file_name(table_name: &str) -> String {
    format!("{table_name}_profile.html")
}

/// Report title, e.g. `Job_postings Data Profile` or `Merged Data Profile`
#[must_use]
pub fn report_title(table_name: &str) -> String {
    if table_name == MERGED_TABLE_NAME {
        "Merged Data Profile".to_string()
    } else {
        format!("{} Data Profile", display_name(table_name))
    }
}

/// Generate and write a report for every table
pub fn write_profiles<'a>(
    generator: &dyn ReportGenerator,
    output_dir: &Path,
    tables: impl IntoIterator<Item = &'a Table>,
) -> Result<Vec<PathBuf>> {
    ensure_directory(output_dir)?;
    let tables: Vec<&Table> = tables.into_iter().collect();
    let pb = table_progress_bar(tables.len(), "Profiling");

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        pb.set_message(format!("Profiling {}", table.name()));
        let report = generator.generate_report(table, &report_title(table.name()))?;
        let path = output_dir.join(profile_file_name(table.name()));
        safe_write(&path, &report)?;
        log::info!("Profile report saved to {}", path.display());
        written.push(path);
        pb.inc(1);
    }

    finish_progress_bar(&pb, "Profiling complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field};
    use std::sync::Arc;

    struct NameOnly;

    impl ReportGenerator for NameOnly {
        fn generate_report(&self, table: &Table, title: &str) -> Result<Vec<u8>> {
            Ok(format!("{}|{title}", table.name()).into_bytes())
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(report_title("job_postings"), "Job_postings Data Profile");
        assert_eq!(report_title("COMPANIES"), "Companies Data Profile");
        assert_eq!(report_title("merged_data"), "Merged Data Profile");
        assert_eq!(profile_file_name("merged_data"), "merged_data_profile.html");
    }

    #[test]
    fn test_write_profiles_uses_generator() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::from_columns(
            "companies",
            vec![(
                Field::new("company_id", DataType::Utf8, false),
                Arc::new(StringArray::from(vec!["10"])) as ArrayRef,
            )],
        )
        .unwrap();

        let written = write_profiles(&NameOnly, dir.path(), [&table]).unwrap();
        assert_eq!(written, vec![dir.path().join("companies_profile.html")]);
        assert_eq!(
            std::fs::read_to_string(&written[0]).unwrap(),
            "companies|Companies Data Profile"
        );
    }
}
