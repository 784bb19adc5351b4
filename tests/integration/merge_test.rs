use crate::utils::{
    COMPANIES_CSV, JOB_SKILLS_CSV, POSTINGS_CSV, SKILLS_CSV, test_config, write_input,
};
use jobprep::loader::load_tables;
use jobprep::{CleanOptions, TableKind, TableSet, clean_table, merge_tables};

fn cleaned_tables(skills_csv: &str) -> jobprep::Result<TableSet> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_input(dir.path(), TableKind::JobPostings, POSTINGS_CSV);
    write_input(dir.path(), TableKind::JobSkills, skills_csv);
    write_input(dir.path(), TableKind::Companies, COMPANIES_CSV);
    write_input(dir.path(), TableKind::MappingSkills, SKILLS_CSV);
    let config = test_config(dir.path());

    let loaded = load_tables(&config)?;
    assert!(loaded.is_complete());
    let options = CleanOptions::from_config(&config);
    loaded
        .tables
        .iter()
        .map(|table| clean_table(table, &options).map(|(table, _)| table))
        .collect()
}

/// Unique right-side keys keep the postings row count
#[test]
fn test_merge_preserves_postings_rows() -> jobprep::Result<()> {
    let tables = cleaned_tables(JOB_SKILLS_CSV)?;
    let (merged, diagnostics) = merge_tables(&tables)?;

    assert_eq!(merged.name(), "merged_data");
    let postings = tables.require("job_postings")?;
    assert_eq!(merged.num_rows(), postings.num_rows());
    assert_eq!(diagnostics.len(), 3);
    Ok(())
}

/// A posting with several skills appears once per skill
#[test]
fn test_merge_expands_multi_skill_postings() -> jobprep::Result<()> {
    let tables = cleaned_tables("job_id,skill_id\n1,100\n1,200\n3,200\n")?;
    let (merged, _) = merge_tables(&tables)?;

    assert_eq!(merged.num_rows(), 4);
    let postings = tables.require("job_postings")?;
    assert!(merged.num_rows() >= postings.num_rows());
    Ok(())
}
