//! Integration tests for HTML report generation.

use cohort_clustering::records::RecordStore;
use cohort_clustering::report::{build_report, plot_dendrogram};
use cohort_clustering::ClusterPipeline;

#[test]
fn report_has_all_sections_and_plots() {
    let store = RecordStore::default();
    let result = ClusterPipeline::default()
        .run(store.all())
        .into_ready()
        .unwrap();

    let report = build_report(&result, "0.1.0").unwrap();
    let titles: Vec<&str> = report.sections().iter().map(|s| s.title()).collect();
    assert_eq!(
        titles,
        vec!["Groups", "Hierarchy", "GPA by group", "Students", "Configuration"]
    );
    let plots: usize = report.sections().iter().map(|s| s.n_plots()).sum();
    assert_eq!(plots, 3);

    let html = report.render();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Needs support"));
    assert!(html.contains("dendrogram_cut_ratio"));
    assert!(html.contains("plot-1-1"));
}

#[test]
fn report_saves_to_disk() {
    let store = RecordStore::default();
    let result = ClusterPipeline::default()
        .run(store.all())
        .into_ready()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.html");
    build_report(&result, "0.1.0")
        .unwrap()
        .save_to_file(&path)
        .unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("Student Clustering Report"));
}

#[test]
fn dendrogram_has_one_trace_per_merge_plus_cut_line() {
    let store = RecordStore::default();
    let result = ClusterPipeline::default()
        .run(store.all())
        .into_ready()
        .unwrap();
    let plot = plot_dendrogram(result.linkage(), result.cut_threshold(), "Dendrogram");
    let json = plot.to_json();
    assert_eq!(json.matches("\"type\":\"scatter\"").count(), 10);
    assert!(json.contains("Cut threshold"));
}
