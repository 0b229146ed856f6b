//! Integration tests for config loading, util helpers and the session.

use std::io::Cursor;

use cohort_cli::commands::cluster::{
    build_roster, load_pipeline_config, parse_addition, run_cluster, ClusterArgs,
};
use cohort_cli::commands::session::Session;
use cohort_cli::util::validate_csv_file;
use cohort_clustering::config::PipelineConfig;
use cohort_clustering::labeling::GroupLabel;
use cohort_clustering::records::RecordStore;

// ---------------------------------------------------------------------------
// load_pipeline_config
// ---------------------------------------------------------------------------

#[test]
fn partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();
    assert_eq!(load_pipeline_config(&path).unwrap(), PipelineConfig::default());

    std::fs::write(&path, r#"{ "dendrogram_cut_ratio": 0.7 }"#).unwrap();
    assert_eq!(load_pipeline_config(&path).unwrap().dendrogram_cut_ratio, 0.7);
}

#[test]
fn label_thresholds_are_not_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "thresholds": { "gpa": 0.0 } }"#).unwrap();
    let err = load_pipeline_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("thresholds"));
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_pipeline_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

// ---------------------------------------------------------------------------
// validate_csv_file / parse_addition
// ---------------------------------------------------------------------------

#[test]
fn csv_validation_checks_extension_and_existence() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("roster.txt");
    std::fs::write(&txt, "gpa,activity\n").unwrap();
    assert!(validate_csv_file(&txt).is_err());

    let missing = dir.path().join("missing.csv");
    assert!(validate_csv_file(&missing).is_err());

    let ok = dir.path().join("roster.CSV");
    std::fs::write(&ok, "gpa,activity\n").unwrap();
    assert!(validate_csv_file(&ok).is_ok());
}

#[test]
fn addition_is_split_on_comma() {
    assert_eq!(
        parse_addition(" 3.1 , 70").unwrap(),
        ("3.1".to_string(), "70".to_string())
    );
    assert!(parse_addition("3.1;70").is_err());
}

// ---------------------------------------------------------------------------
// cluster / session
// ---------------------------------------------------------------------------

#[test]
fn roster_from_file_plus_additions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    std::fs::write(&path, "gpa,activity\n3.0,50\n2.0,20\n").unwrap();

    let args = ClusterArgs {
        input: Some(path),
        additions: vec![("3.9".to_string(), "95".to_string())],
        ..Default::default()
    };
    let store = build_roster(&args).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.all()[2].activity(), 95);
}

#[test]
fn added_student_joins_bookworm_group() {
    let args = ClusterArgs {
        additions: vec![("3.0".to_string(), "60".to_string())],
        ..Default::default()
    };
    let result = run_cluster(&args, &PipelineConfig::default())
        .unwrap()
        .expect("11 students is enough");
    let last = result.rows().last().cloned().unwrap();
    assert_eq!(last.id, 11);
    assert_eq!(last.label, GroupLabel::Bookworm);
}

#[test]
fn session_reset_restores_sample() {
    let mut session = Session::new(RecordStore::empty(), PipelineConfig::default());
    let mut out = Vec::new();
    session
        .run(Cursor::new("reset\nrun\n"), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(session.store().len(), 10);
    assert!(text.contains("Sample roster restored (10 students)"));
    assert!(text.contains("Needs support"));
}
