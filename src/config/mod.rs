//! Configuration for the preparation pipeline.
//!
//! The defaults reproduce the fixed layout of the raw dataset: four CSV inputs
//! under `Raw_Data/` and all outputs under `Processed_Data/`, both relative to
//! the working directory.

use std::path::{Path, PathBuf};

/// Sentinel written into missing categorical cells
pub const DEFAULT_SENTINEL: &str = "N/A";

/// Name of the derived table produced by the merge stage
pub const MERGED_TABLE_NAME: &str = "merged_data";

/// Tokens read as missing values, besides empty fields
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "#N/A", "<NA>",
];

/// The four logical input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    JobPostings,
    JobSkills,
    Companies,
    MappingSkills,
}

impl TableKind {
    /// All inputs, in processing order
    pub const ALL: [Self; 4] = [
        Self::JobPostings,
        Self::JobSkills,
        Self::Companies,
        Self::MappingSkills,
    ];

    /// Logical table name, used for output file names
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JobPostings => "job_postings",
            Self::JobSkills => "job_skills",
            Self::Companies => "companies",
            Self::MappingSkills => "mapping_skills",
        }
    }

    /// Location of the raw CSV relative to the base directory
    #[must_use]
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::JobPostings => "Raw_Data/postings.csv",
            Self::JobSkills => "Raw_Data/jobs/job_skills.csv",
            Self::Companies => "Raw_Data/companies/companies.csv",
            Self::MappingSkills => "Raw_Data/mappings/skills.csv",
        }
    }

    /// Columns the merge and chart stages rely on
    #[must_use]
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::JobPostings => &["job_id", "salary", "job_type", "company_id"],
            Self::JobSkills => &["job_id", "skill_id"],
            Self::Companies => &["company_id"],
            Self::MappingSkills => &["skill_id"],
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// One CSV input of the pipeline
#[derive(Debug, Clone)]
pub struct TableSource {
    pub kind: TableKind,
    /// Path relative to the base directory, or absolute
    pub path: PathBuf,
}

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory that input and output paths are resolved against
    pub base_dir: PathBuf,
    /// The CSV inputs to load
    pub inputs: Vec<TableSource>,
    /// Output directory, relative to the base directory
    pub output_dir: PathBuf,
    /// Fill value for missing categorical cells
    pub sentinel: String,
    /// Columns coerced to text after filling
    pub id_columns: Vec<String>,
    /// Tokens read as missing values, besides empty fields
    pub null_tokens: Vec<String>,
    /// Rows per batch when reading CSV files
    pub batch_size: usize,
    /// Rows shown in each console preview
    pub preview_rows: usize,
    /// Render the before/after comparison charts
    pub render_charts: bool,
    /// Column plotted in the salary histogram
    pub salary_column: String,
    /// Column plotted in the job-type count chart
    pub job_type_column: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            inputs: TableKind::ALL
                .into_iter()
                .map(|kind| TableSource {
                    kind,
                    path: PathBuf::from(kind.default_path()),
                })
                .collect(),
            output_dir: PathBuf::from("Processed_Data"),
            sentinel: DEFAULT_SENTINEL.to_string(),
            id_columns: vec![
                "company_id".to_string(),
                "job_id".to_string(),
                "skill_id".to_string(),
            ],
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(ToString::to_string).collect(),
            batch_size: 8192,
            preview_rows: 10,
            render_charts: true,
            salary_column: "salary".to_string(),
            job_type_column: "job_type".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Resolve inputs and outputs against another directory
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    #[must_use]
    pub fn with_charts(mut self, render_charts: bool) -> Self {
        self.render_charts = render_charts;
        self
    }

    #[must_use]
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Absolute (or base-relative) path of an input
    #[must_use]
    pub fn input_path(&self, source: &TableSource) -> PathBuf {
        resolve(&self.base_dir, &source.path)
    }

    /// Resolved output directory
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.output_dir)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
