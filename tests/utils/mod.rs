use std::fs;
use std::path::{Path, PathBuf};

use jobprep::{PipelineConfig, TableKind};

pub const POSTINGS_CSV: &str = "\
job_id,title,company_id,salary,job_type
1,Engineer,10,100000,FULL_TIME
2,Analyst,20,,PART_TIME
3,Designer,10,80000,CONTRACT
";

pub const JOB_SKILLS_CSV: &str = "\
job_id,skill_id
1,100
3,200
";

pub const COMPANIES_CSV: &str = "\
company_id,name
10,Acme
20,Globex
";

pub const SKILLS_CSV: &str = "\
skill_id,skill_name
100,Rust
200,Figma
";

/// Write `contents` at the default location of `kind` under `base`
pub fn write_input(base: &Path, kind: TableKind, contents: &str) -> PathBuf {
    let path = base.join(kind.default_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture directory");
    }
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// Write the four sample inputs under `base`
pub fn write_sample_dataset(base: &Path) {
    write_input(base, TableKind::JobPostings, POSTINGS_CSV);
    write_input(base, TableKind::JobSkills, JOB_SKILLS_CSV);
    write_input(base, TableKind::Companies, COMPANIES_CSV);
    write_input(base, TableKind::MappingSkills, SKILLS_CSV);
}

/// Configuration rooted at a scratch directory, charts off unless asked for
#[must_use]
pub fn test_config(base: &Path) -> PipelineConfig {
    PipelineConfig::default()
        .with_base_dir(base)
        .with_charts(false)
        .with_preview_rows(3)
}

/// Lines of an output file in the configured output directory
pub fn output_lines(config: &PipelineConfig, file_name: &str) -> Vec<String> {
    let path = config.output_path().join(file_name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}
