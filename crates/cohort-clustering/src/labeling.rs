//! Turning opaque cluster indices into named, coloured student groups.
//!
//! The name depends only on where the cluster's raw centroid falls relative
//! to [`GPA_THRESHOLD`] and [`ACTIVITY_THRESHOLD`]:
//!
//! | GPA   | Activity | Label         | Colour |
//! |-------|----------|---------------|--------|
//! | high  | high     | Excellent     | red    |
//! | high  | low      | Bookworm      | blue   |
//! | low   | high     | Active        | green  |
//! | low   | low      | Needs support | purple |
//!
//! "High" means strictly greater than the threshold, so a centroid sitting
//! exactly on a threshold counts as low.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::partition::N_CLUSTERS;
use crate::records::Observation;

/// Centroid GPA above which a group counts as high-GPA.
pub const GPA_THRESHOLD: f64 = 3.1;
/// Centroid activity score above which a group counts as highly active.
pub const ACTIVITY_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Excellent,
    Bookworm,
    Active,
    NeedsSupport,
}

impl GroupLabel {
    pub const ALL: [GroupLabel; 4] = [
        GroupLabel::Excellent,
        GroupLabel::Bookworm,
        GroupLabel::Active,
        GroupLabel::NeedsSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupLabel::Excellent => "Excellent",
            GroupLabel::Bookworm => "Bookworm",
            GroupLabel::Active => "Active",
            GroupLabel::NeedsSupport => "Needs support",
        }
    }

    pub fn color(&self) -> GroupColor {
        match self {
            GroupLabel::Excellent => GroupColor::Red,
            GroupLabel::Bookworm => GroupColor::Blue,
            GroupLabel::Active => GroupColor::Green,
            GroupLabel::NeedsSupport => GroupColor::Purple,
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "excellent" => Ok(GroupLabel::Excellent),
            "bookworm" => Ok(GroupLabel::Bookworm),
            "active" => Ok(GroupLabel::Active),
            "needs support" => Ok(GroupLabel::NeedsSupport),
            _ => Err(format!("Unknown group label: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupColor {
    Red,
    Blue,
    Green,
    Purple,
}

impl GroupColor {
    pub fn hex(&self) -> &'static str {
        match self {
            GroupColor::Red => "#E74C3C",
            GroupColor::Blue => "#3498DB",
            GroupColor::Green => "#2ECC71",
            GroupColor::Purple => "#9B59B6",
        }
    }
}

/// Per-cluster centroid (raw units) with its derived label and colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub size: usize,
    pub mean_gpa: f64,
    pub mean_activity: f64,
    pub label: GroupLabel,
    pub color: GroupColor,
}

/// Classify a raw centroid.
pub fn label_for(mean_gpa: f64, mean_activity: f64) -> GroupLabel {
    let high_gpa = mean_gpa > GPA_THRESHOLD;
    let high_activity = mean_activity > ACTIVITY_THRESHOLD;
    match (high_gpa, high_activity) {
        (true, true) => GroupLabel::Excellent,
        (true, false) => GroupLabel::Bookworm,
        (false, true) => GroupLabel::Active,
        (false, false) => GroupLabel::NeedsSupport,
    }
}

/// Summarise each of the [`N_CLUSTERS`] clusters from the raw observations.
///
/// `assignment[i]` is the cluster of `observations[i]`. A cluster without
/// members keeps a zero centroid and size 0.
pub fn label_all(observations: &[Observation], assignment: &[usize]) -> [ClusterSummary; N_CLUSTERS] {
    assert_eq!(
        observations.len(),
        assignment.len(),
        "every observation needs a cluster"
    );

    let mut sums = [(0.0f64, 0.0f64, 0usize); N_CLUSTERS];
    for (obs, &cluster) in observations.iter().zip(assignment) {
        let entry = &mut sums[cluster];
        entry.0 += obs.gpa();
        entry.1 += obs.activity() as f64;
        entry.2 += 1;
    }

    std::array::from_fn(|cluster| {
        let (gpa_sum, activity_sum, size) = sums[cluster];
        let (mean_gpa, mean_activity) = if size == 0 {
            (0.0, 0.0)
        } else {
            (gpa_sum / size as f64, activity_sum / size as f64)
        };
        let label = label_for(mean_gpa, mean_activity);
        ClusterSummary {
            cluster,
            size,
            mean_gpa,
            mean_activity,
            label,
            color: label.color(),
        }
    })
}
