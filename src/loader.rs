//! CSV input loading
//!
//! Each configured input is read into one [`Table`]. A missing file is not an
//! error at this level: it is recorded in the outcome so the pipeline can
//! report it and decide whether to continue.

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::table::{Table, TableSet, display_name};
use crate::utils::io::csv::{CsvReadOptions, read_csv};
use crate::utils::logging::log_warning;

/// An input whose file did not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInput {
    /// Logical table name
    pub name: String,
    /// Resolved path that was checked
    pub path: PathBuf,
}

/// Result of loading every configured input
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Tables that loaded, in configuration order
    pub tables: TableSet,
    /// Inputs whose files were not found
    pub missing: Vec<MissingInput>,
}

impl LoadOutcome {
    /// Whether every configured input loaded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Read options derived from the pipeline configuration
///
/// The configured missing-value tokens include the cleaning sentinel, so a
/// processed file read with these options sees filled cells as missing
/// again. Read processed output with an empty token list to keep them.
pub fn read_options(config: &PipelineConfig) -> Result<CsvReadOptions> {
    CsvReadOptions::default()
        .with_batch_size(config.batch_size)
        .with_null_tokens(&config.null_tokens)
}

/// Read a single CSV file into a named table
pub fn load_table(name: &str, path: &Path, options: &CsvReadOptions) -> Result<Table> {
    let (schema, batches) = read_csv(path, options)?;
    Table::from_batches(name, schema, &batches)
}

/// Load every configured input that exists
///
/// # Errors
/// Returns an error if an existing file cannot be read or parsed as CSV.
/// Missing files are reported in the outcome instead.
pub fn load_tables(config: &PipelineConfig) -> Result<LoadOutcome> {
    let options = read_options(config)?;
    let mut outcome = LoadOutcome::default();

    for source in &config.inputs {
        let name = source.kind.name();
        let path = config.input_path(source);

        if !path.exists() {
            log_warning("File not found", Some(&path));
            outcome.missing.push(MissingInput {
                name: name.to_string(),
                path,
            });
            continue;
        }

        let table = load_table(name, &path, &options)?;
        log::info!(
            "{} table loaded successfully ({} rows, {} columns)",
            display_name(name),
            table.num_rows(),
            table.num_columns()
        );
        outcome.tables.insert(table);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(base: &Path, relative: &str, contents: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_missing_inputs_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Raw_Data/postings.csv", "job_id,salary\n1,10\n");
        write(
            dir.path(),
            "Raw_Data/companies/companies.csv",
            "company_id\n5\n",
        );

        let config = PipelineConfig::default().with_base_dir(dir.path());
        let outcome = load_tables(&config).unwrap();

        assert!(!outcome.is_complete());
        assert_eq!(outcome.tables.names(), vec!["job_postings", "companies"]);
        let missing: Vec<&str> = outcome.missing.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(missing, vec!["job_skills", "mapping_skills"]);
        assert!(
            outcome.missing[0]
                .path
                .ends_with("Raw_Data/jobs/job_skills.csv")
        );
    }

    #[test]
    fn test_batches_are_concatenated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("many.csv");
        let body: String = (0..25).map(|i| format!("{i},row{i}\n")).collect();
        fs::write(&path, format!("id,label\n{body}")).unwrap();

        let options = CsvReadOptions::default().with_batch_size(4);
        let table = load_table("many", &path, &options).unwrap();
        assert_eq!(table.num_rows(), 25);
        assert_eq!(table.name(), "many");
    }
}
