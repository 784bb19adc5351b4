use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type};

use crate::utils::{test_config, write_input};
use jobprep::loader::{load_table, read_options};
use jobprep::{CleanOptions, TableKind, clean_table};

/// Null tokens load as missing and are filled per column type
#[test]
fn test_loaded_csv_is_fully_filled() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_input(
        dir.path(),
        TableKind::Companies,
        "company_id,city,score\n1,,1.5\n2,NA,\n3,Paris,2.5\n4,null,NaN\n",
    );
    let config = test_config(dir.path());
    let table = load_table("companies", &path, &read_options(&config)?)?;
    assert_eq!(table.missing_cells(), 5);

    let (cleaned, diagnostics) = clean_table(&table, &CleanOptions::from_config(&config))?;

    assert_eq!(cleaned.missing_cells(), 0);
    let city = cleaned.column("city")?.as_string::<i32>();
    assert_eq!(
        city.iter().collect::<Vec<_>>(),
        vec![Some("N/A"), Some("N/A"), Some("Paris"), Some("N/A")]
    );

    let score = cleaned.column("score")?;
    assert_eq!(score.data_type(), &DataType::Float64);
    assert_eq!(score.as_primitive::<Float64Type>().value(1), 2.0);
    assert_eq!(score.as_primitive::<Float64Type>().value(3), 2.0);

    assert_eq!(cleaned.column("company_id")?.data_type(), &DataType::Utf8);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.message == "converted 'company_id' from Int64 to text")
    );
    Ok(())
}

/// Cleaning an already clean table changes nothing
#[test]
fn test_cleaning_is_stable() -> jobprep::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_input(
        dir.path(),
        TableKind::JobPostings,
        "job_id,salary,job_type,company_id\n1,10,,5\n2,,FULL_TIME,5\n",
    );
    let config = test_config(dir.path());
    let options = CleanOptions::from_config(&config);
    let table = load_table("job_postings", &path, &read_options(&config)?)?;

    let (once, _) = clean_table(&table, &options)?;
    let (twice, diagnostics) = clean_table(&once, &options)?;

    assert_eq!(once.batch(), twice.batch());
    assert!(diagnostics.is_empty());
    Ok(())
}
