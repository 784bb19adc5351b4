use crate::utils::{
    COMPANIES_CSV, JOB_SKILLS_CSV, POSTINGS_CSV, output_lines, test_config, write_input,
    write_sample_dataset,
};
use arrow::array::AsArray;
use jobprep::loader::{load_table, read_options};
use jobprep::utils::io::csv::CsvReadOptions;
use jobprep::schema::to_text;
use jobprep::visualize::{JOB_TYPE_COUNTS_FILE, MISSING_HEATMAP_FILE, SALARY_DISTRIBUTION_FILE};
use jobprep::{PipelineOutcome, PipelineReport, PrepError, TableKind, run_pipeline};

fn completed(outcome: PipelineOutcome) -> PipelineReport {
    match outcome {
        PipelineOutcome::Completed(report) => report,
        PipelineOutcome::Skipped { missing } => panic!("pipeline skipped, missing: {missing:?}"),
    }
}

/// The sample dataset runs end to end and produces every output
#[test]
fn test_end_to_end() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    let config = test_config(dir.path());

    let report = completed(run_pipeline(&config)?);

    assert_eq!(report.written.len(), 5);
    assert_eq!(report.profiles.len(), 5);
    assert!(report.charts.is_empty());
    assert_eq!(report.duplicates_removed, 0);

    // salary median of 100000 and 80000
    assert_eq!(
        output_lines(&config, "job_postings_processed.csv"),
        vec![
            "job_id,title,company_id,salary,job_type",
            "1,Engineer,10,100000,FULL_TIME",
            "2,Analyst,20,90000,PART_TIME",
            "3,Designer,10,80000,CONTRACT",
        ]
    );

    // job 2 has no skill, so its skill columns stay empty
    assert_eq!(
        output_lines(&config, "merged_data_processed.csv"),
        vec![
            "job_id,title,company_id,salary,job_type,skill_id,name,skill_name",
            "1,Engineer,10,100000,FULL_TIME,100,Acme,Rust",
            "2,Analyst,20,90000,PART_TIME,,Globex,",
            "3,Designer,10,80000,CONTRACT,200,Acme,Figma",
        ]
    );

    let output = config.output_path();
    for name in ["job_postings", "job_skills", "companies", "mapping_skills", "merged_data"] {
        assert!(output.join(format!("{name}_processed.csv")).is_file());
        assert!(output.join(format!("{name}_profile.html")).is_file());
    }

    let merged_profile = std::fs::read_to_string(output.join("merged_data_profile.html"))
        .expect("merged profile");
    assert!(merged_profile.contains("<title>Merged Data Profile</title>"));
    let postings_profile = std::fs::read_to_string(output.join("job_postings_profile.html"))
        .expect("postings profile");
    assert!(
        postings_profile.contains("<title>Job_postings Data Profile</title>")
    );

    Ok(())
}

/// Identifier columns are written as text and reload without gaps
#[test]
fn test_processed_output_reloads() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    let config = test_config(dir.path());
    completed(run_pipeline(&config)?);

    let options = read_options(&config)?;
    let reloaded = load_table(
        "job_postings",
        &config.output_path().join("job_postings_processed.csv"),
        &options,
    )?;

    assert_eq!(reloaded.num_rows(), 3);
    assert_eq!(
        reloaded.column_names(),
        vec!["job_id", "title", "company_id", "salary", "job_type"]
    );
    assert_eq!(reloaded.missing_cells(), 0);

    let salary = to_text(reloaded.column("salary")?)?;
    assert_eq!(
        salary.as_string::<i32>().iter().collect::<Vec<_>>(),
        vec![Some("100000"), Some("90000"), Some("80000")]
    );
    let job_type = to_text(reloaded.column("job_type")?)?;
    assert_eq!(
        job_type.as_string::<i32>().iter().collect::<Vec<_>>(),
        vec![Some("FULL_TIME"), Some("PART_TIME"), Some("CONTRACT")]
    );
    Ok(())
}

/// Filled placeholders survive a reload that has no extra missing markers
#[test]
fn test_filled_placeholder_reloads() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    write_input(
        dir.path(),
        TableKind::JobPostings,
        "job_id,title,company_id,salary,job_type\n\
         1,Engineer,10,100000,FULL_TIME\n\
         2,Analyst,20,90000,\n\
         3,Designer,10,80000,CONTRACT\n",
    );
    let config = test_config(dir.path());
    completed(run_pipeline(&config)?);

    let path = config.output_path().join("job_postings_processed.csv");
    let verbatim = CsvReadOptions::default().with_null_tokens::<&str>(&[])?;
    let reloaded = load_table("job_postings", &path, &verbatim)?;
    assert_eq!(reloaded.missing_cells(), 0);
    let job_type = to_text(reloaded.column("job_type")?)?;
    assert_eq!(
        job_type.as_string::<i32>().iter().collect::<Vec<_>>(),
        vec![Some("FULL_TIME"), Some("N/A"), Some("CONTRACT")]
    );

    // the pipeline's own read options treat the placeholder as missing
    let reloaded = load_table("job_postings", &path, &read_options(&config)?)?;
    assert_eq!(reloaded.missing_cells(), 1);
    Ok(())
}

/// Identifiers promoted to float by filling still join on their integer text
#[test]
fn test_fractional_median_identifiers_still_join() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    write_input(
        dir.path(),
        TableKind::JobPostings,
        "job_id,title,company_id,salary,job_type\n\
         1,Engineer,10,100000,FULL_TIME\n\
         2,Analyst,21,90000,PART_TIME\n\
         3,Designer,,80000,CONTRACT\n",
    );
    write_input(
        dir.path(),
        TableKind::Companies,
        "company_id,name\n10,Acme\n21,Globex\n",
    );
    let config = test_config(dir.path());
    completed(run_pipeline(&config)?);

    assert_eq!(
        output_lines(&config, "job_postings_processed.csv"),
        vec![
            "job_id,title,company_id,salary,job_type",
            "1,Engineer,10,100000,FULL_TIME",
            "2,Analyst,21,90000,PART_TIME",
            "3,Designer,15.5,80000,CONTRACT",
        ]
    );
    assert_eq!(
        output_lines(&config, "merged_data_processed.csv"),
        vec![
            "job_id,title,company_id,salary,job_type,skill_id,name,skill_name",
            "1,Engineer,10,100000,FULL_TIME,100,Acme,Rust",
            "2,Analyst,21,90000,PART_TIME,,Globex,",
            "3,Designer,15.5,80000,CONTRACT,200,,Figma",
        ]
    );
    Ok(())
}

/// A missing input stops the run before any output exists
#[test]
fn test_missing_input_skips_run() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_input(dir.path(), TableKind::JobPostings, POSTINGS_CSV);
    write_input(dir.path(), TableKind::JobSkills, JOB_SKILLS_CSV);
    let config = test_config(dir.path());

    let outcome = run_pipeline(&config)?;

    let PipelineOutcome::Skipped { missing } = outcome else {
        panic!("expected the run to be skipped");
    };
    let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["companies", "mapping_skills"]);
    assert!(!config.output_path().exists());
    Ok(())
}

/// A table without a required column fails validation
#[test]
fn test_missing_required_column_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    write_input(dir.path(), TableKind::Companies, "id,name\n10,Acme\n");
    let config = test_config(dir.path());

    match run_pipeline(&config) {
        Err(PrepError::Schema(report)) => {
            assert_eq!(report.issues.len(), 1);
            assert_eq!(report.issues[0].table, "companies");
            assert_eq!(report.issues[0].column, "company_id");
        }
        other => panic!("expected a schema error, got {other:?}"),
    }
    assert!(!config.output_path().exists());
}

/// Duplicates are removed from source tables after the merge
#[test]
fn test_duplicates_removed_after_merge() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    write_input(
        dir.path(),
        TableKind::JobSkills,
        &format!("{JOB_SKILLS_CSV}1,100\n"),
    );
    let config = test_config(dir.path());

    let report = completed(run_pipeline(&config)?);

    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(output_lines(&config, "job_skills_processed.csv").len(), 3);
    // the merge saw both copies of the skill row
    assert_eq!(output_lines(&config, "merged_data_processed.csv").len(), 5);
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.table == "job_skills" && d.message == "removed 1 duplicate rows")
    );
    Ok(())
}

/// Charts are drawn from the postings table when enabled
#[test]
fn test_charts_rendered_when_enabled() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    let config = test_config(dir.path()).with_charts(true);

    let report = completed(run_pipeline(&config)?);

    let output = config.output_path();
    assert_eq!(
        report.charts,
        vec![
            output.join(MISSING_HEATMAP_FILE),
            output.join(SALARY_DISTRIBUTION_FILE),
            output.join(JOB_TYPE_COUNTS_FILE),
        ]
    );
    Ok(())
}

/// A second run over the same inputs overwrites its outputs
#[test]
fn test_rerun_overwrites_outputs() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_dataset(dir.path());
    let config = test_config(dir.path());

    completed(run_pipeline(&config)?);
    write_input(
        dir.path(),
        TableKind::Companies,
        &format!("{COMPANIES_CSV}30,Initech\n"),
    );
    completed(run_pipeline(&config)?);

    assert_eq!(output_lines(&config, "companies_processed.csv").len(), 4);
    Ok(())
}
