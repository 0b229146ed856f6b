//! Integration tests for the quadrant labeling rule and configuration.

use cohort_clustering::config::PipelineConfig;
use cohort_clustering::labeling::{
    label_for, GroupColor, GroupLabel, ACTIVITY_THRESHOLD, GPA_THRESHOLD,
};
use cohort_clustering::records::RecordStore;
use cohort_clustering::ClusterPipeline;

// ---------------------------------------------------------------------------
// Quadrants
// ---------------------------------------------------------------------------

#[test]
fn each_quadrant_has_its_label() {
    assert_eq!(label_for(3.5, 90.0), GroupLabel::Excellent);
    assert_eq!(label_for(3.5, 40.0), GroupLabel::Bookworm);
    assert_eq!(label_for(2.0, 90.0), GroupLabel::Active);
    assert_eq!(label_for(2.0, 40.0), GroupLabel::NeedsSupport);
}

#[test]
fn thresholds_fall_on_the_low_side() {
    assert_eq!(label_for(3.1, 70.0), GroupLabel::NeedsSupport);
    assert_eq!(label_for(3.1, 70.1), GroupLabel::Active);
    assert_eq!(label_for(3.11, 70.0), GroupLabel::Bookworm);
    assert_eq!(label_for(3.11, 70.1), GroupLabel::Excellent);
}

#[test]
fn every_centroid_gets_exactly_one_label() {
    let mut seen = std::collections::HashSet::new();
    for gi in 0..=40 {
        for ai in 0..=100 {
            let gpa = gi as f64 / 10.0;
            let activity = ai as f64;
            let label = label_for(gpa, activity);
            let expected = match (gpa > 3.1, activity > 70.0) {
                (true, true) => GroupLabel::Excellent,
                (true, false) => GroupLabel::Bookworm,
                (false, true) => GroupLabel::Active,
                (false, false) => GroupLabel::NeedsSupport,
            };
            assert_eq!(label, expected, "gpa {} activity {}", gpa, activity);
            seen.insert(label);
        }
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn colours_follow_labels() {
    assert_eq!(GroupLabel::Excellent.color(), GroupColor::Red);
    assert_eq!(GroupLabel::Bookworm.color(), GroupColor::Blue);
    assert_eq!(GroupLabel::Active.color(), GroupColor::Green);
    assert_eq!(GroupLabel::NeedsSupport.color(), GroupColor::Purple);
    assert_eq!(GroupLabel::NeedsSupport.to_string(), "Needs support");
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn thresholds_are_fixed() {
    assert_eq!(GPA_THRESHOLD, 3.1);
    assert_eq!(ACTIVITY_THRESHOLD, 70.0);
}

#[test]
fn config_defaults() {
    assert_eq!(PipelineConfig::default().dendrogram_cut_ratio, 0.55);
}

#[test]
fn partial_config_json_fills_defaults() {
    let cfg: PipelineConfig = serde_json::from_str(r#"{"dendrogram_cut_ratio": 0.7}"#).unwrap();
    assert_eq!(cfg.dendrogram_cut_ratio, 0.7);

    let cfg: PipelineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, PipelineConfig::default());
}

#[test]
fn config_cannot_move_label_thresholds() {
    let err = serde_json::from_str::<PipelineConfig>(r#"{"thresholds": {"gpa": 0.0, "activity": 0.0}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("thresholds"), "{}", err);
}

#[test]
fn cut_ratio_does_not_change_groups() {
    let store = RecordStore::default();
    let base = ClusterPipeline::default()
        .run(store.all())
        .into_ready()
        .unwrap();
    let other = ClusterPipeline::new(PipelineConfig::new(0.9))
        .run(store.all())
        .into_ready()
        .unwrap();
    assert_eq!(base.assignment(), other.assignment());
    assert_eq!(base.summaries(), other.summaries());
    assert!(other.cut_threshold() > base.cut_threshold());
}

#[test]
fn sample_groups_follow_the_fixed_rule() {
    let store = RecordStore::default();
    let report = ClusterPipeline::default()
        .run(store.all())
        .into_ready()
        .unwrap();
    for s in report.summaries() {
        assert_eq!(s.label, label_for(s.mean_gpa, s.mean_activity));
        let expected = match (s.mean_gpa > 3.1, s.mean_activity > 70.0) {
            (true, true) => GroupLabel::Excellent,
            (true, false) => GroupLabel::Bookworm,
            (false, true) => GroupLabel::Active,
            (false, false) => GroupLabel::NeedsSupport,
        };
        assert_eq!(s.label, expected);
    }
    let mut labels: Vec<GroupLabel> = report.summaries().iter().map(|s| s.label).collect();
    labels.sort();
    assert_eq!(labels, GroupLabel::ALL.to_vec());
}
