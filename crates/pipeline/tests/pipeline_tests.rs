//! End-to-end runs of the feature pipeline against files on disk

use pipeline::{FeatureEngineer, PipelineConfig, PipelineError, RunOutcome};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use storage::{CsvStore, PART_FILE, SUCCESS_MARKER};
use tempfile::TempDir;

const ASSESSMENTS: &str = "\
ASSESSED_VALUE,LAND_SIZE_SF,YEAR_OF_CONSTRUCTION,COMM_NAME,PROPERTY_TYPE
100000,999,1990,X,RE
200000,1999,2000,X,RE
300000,2999,2010,Y,LO
";

fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("assessments.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn read_output(dir: &Path) -> DataFrame {
    CsvStore::default().read_table(&dir.join(PART_FILE)).unwrap()
}

fn engineer() -> FeatureEngineer {
    FeatureEngineer::new(PipelineConfig::default()).unwrap()
}

#[test]
fn test_full_run_appends_features() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, ASSESSMENTS);
    let output = tmp.path().join("features");

    let outcome = engineer().run(&input, &output).unwrap();
    assert_eq!(
        outcome,
        RunOutcome::Written {
            path: output.join(PART_FILE),
            rows: 3,
            columns: 12,
        }
    );
    assert!(output.join(SUCCESS_MARKER).is_file());

    let df = read_output(&output);
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(
        &names[5..],
        &[
            "price_per_sqft",
            "property_age",
            "avg_comm_value",
            "property_type_index",
            "property_type_vec",
            "comm_name_index",
            "comm_name_vec",
        ]
    );

    let price = df.column("price_per_sqft").unwrap().f64().unwrap();
    assert!((price.get(0).unwrap() - 100.0).abs() < 1e-9);

    let age = df.column("property_age").unwrap().i64().unwrap();
    assert_eq!(age.get(0), Some(34));
    assert_eq!(age.get(2), Some(14));

    let avg = df.column("avg_comm_value").unwrap().f64().unwrap();
    assert_eq!(avg.get(0), Some(150000.0));
    assert_eq!(avg.get(1), Some(150000.0));
    assert_eq!(avg.get(2), Some(300000.0));

    let comm_vec = df.column("comm_name_vec").unwrap().str().unwrap();
    assert_eq!(comm_vec.get(0), Some("(1,[0],[1.0])"));
    assert_eq!(comm_vec.get(2), Some("(1,[],[])"));

    let type_index = df.column("property_type_index").unwrap().f64().unwrap();
    assert_eq!(type_index.get(0), Some(0.0));
    assert_eq!(type_index.get(2), Some(1.0));
}

#[test]
fn test_missing_required_column_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "VALUE,COMM_NAME\n1,X\n");
    let output = tmp.path().join("features");

    let outcome = engineer().run(&input, &output).unwrap();

    assert_eq!(
        outcome,
        RunOutcome::MissingColumns(vec!["ASSESSED_VALUE".to_string()])
    );
    assert!(!output.exists());
}

#[test]
fn test_missing_required_column_keeps_previous_output() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("features");

    let good = write_input(&tmp, ASSESSMENTS);
    engineer().run(&good, &output).unwrap();
    let before = fs::read_to_string(output.join(PART_FILE)).unwrap();

    let bad = write_input(&tmp, "VALUE,COMM_NAME\n1,X\n");
    let outcome = engineer().run(&bad, &output).unwrap();

    assert!(matches!(outcome, RunOutcome::MissingColumns(_)));
    assert_eq!(fs::read_to_string(output.join(PART_FILE)).unwrap(), before);
    assert!(output.join(SUCCESS_MARKER).is_file());
}

#[test]
fn test_empty_input_file_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "");
    let output = tmp.path().join("features");

    let outcome = engineer().run(&input, &output).unwrap();

    assert_eq!(
        outcome,
        RunOutcome::MissingColumns(vec!["ASSESSED_VALUE".to_string()])
    );
    assert!(!output.exists());
}

#[test]
fn test_required_check_is_case_sensitive() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "assessed_value,land_size_sf,year_of_construction,comm_name\n1,1,2000,X\n",
    );
    let output = tmp.path().join("features");

    let outcome = engineer().run(&input, &output).unwrap();
    assert!(matches!(outcome, RunOutcome::MissingColumns(_)));
    assert!(!output.exists());
}

#[test]
fn test_absent_property_type_is_not_encoded() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "ASSESSED_VALUE,land_size_sf,year_of_construction,comm_name\n100,0,2000,X\n200,0,2000,X\n",
    );
    let output = tmp.path().join("features");

    engineer().run(&input, &output).unwrap();
    let df = read_output(&output);

    assert!(df.column("property_type_index").is_err());
    assert!(df.column("property_type_vec").is_err());
    assert!(df.column("comm_name_index").is_ok());

    let avg = df.column("avg_comm_value").unwrap().f64().unwrap();
    assert_eq!(avg.get(0), Some(150.0));
    assert_eq!(avg.get(1), Some(150.0));
}

#[test]
fn test_rerun_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, ASSESSMENTS);
    let output = tmp.path().join("features");
    let pipeline = engineer();

    pipeline.run(&input, &output).unwrap();
    let first = fs::read_to_string(output.join(PART_FILE)).unwrap();
    pipeline.run(&input, &output).unwrap();
    let second = fs::read_to_string(output.join(PART_FILE)).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_dir(&output).unwrap().count(), 2);
}

#[test]
fn test_missing_comm_name_propagates() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "ASSESSED_VALUE,land_size_sf,year_of_construction\n100,0,2000\n",
    );

    let err = engineer()
        .run(&input, &tmp.path().join("features"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Feature(_)));
}

#[test]
fn test_case_sensitive_resolution_rejects_upper_case_inputs() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, ASSESSMENTS);
    let config = PipelineConfig {
        case_sensitive_columns: true,
        ..Default::default()
    };

    let err = FeatureEngineer::new(config)
        .unwrap()
        .run(&input, &tmp.path().join("features"))
        .unwrap_err();
    assert!(err.to_string().contains("assessed_value"));
}

#[test]
fn test_unreadable_input_propagates() {
    let tmp = TempDir::new().unwrap();
    let err = engineer()
        .run(&tmp.path().join("absent.csv"), &tmp.path().join("features"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Storage(_)));
}
