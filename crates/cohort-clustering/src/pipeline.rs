//! End-to-end clustering run.
//!
//! [`ClusterPipeline::run`] is the only entry point renderers use. Every call
//! recomputes everything from the roster it is handed and returns a new
//! [`PipelineOutcome`]; nothing is cached between runs, so a result can never
//! mix state from two different rosters.
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::ClusteringError;
use crate::geometry::convex_hull;
use crate::labeling::{label_all, ClusterSummary, GroupColor, GroupLabel};
use crate::linkage::{build_ward_linkage, LinkageTree};
use crate::math::Array2;
use crate::partition::{cut_tree, members_by_cluster, N_CLUSTERS};
use crate::preprocessing::fit_transform;
use crate::records::{feature_matrix, Observation};
use crate::stats::{describe, Describe};

/// Smallest roster that can be split into [`N_CLUSTERS`] groups.
pub const MIN_OBSERVATIONS: usize = N_CLUSTERS;

#[derive(Debug, Clone, Default)]
pub struct ClusterPipeline {
    config: PipelineConfig,
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Ready(ClusterReport),
    /// Too few students; callers should ask for more data.
    NotReady { available: usize, required: usize },
}

impl PipelineOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PipelineOutcome::Ready(_))
    }

    pub fn ready(&self) -> Option<&ClusterReport> {
        match self {
            PipelineOutcome::Ready(report) => Some(report),
            PipelineOutcome::NotReady { .. } => None,
        }
    }

    pub fn into_ready(self) -> Option<ClusterReport> {
        match self {
            PipelineOutcome::Ready(report) => Some(report),
            PipelineOutcome::NotReady { .. } => None,
        }
    }
}

/// Everything derived from one roster.
#[derive(Debug, Clone)]
pub struct ClusterReport {
    config: PipelineConfig,
    observations: Vec<Observation>,
    raw: Array2<f64>,
    scaled: Array2<f64>,
    linkage: LinkageTree,
    assignment: Vec<usize>,
    /// Member row indices per cluster, in row order.
    groups: Vec<Vec<usize>>,
    summaries: [ClusterSummary; N_CLUSTERS],
}

/// A table row after clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusteredRow {
    pub id: usize,
    pub gpa: f64,
    pub activity: u32,
    pub cluster: usize,
    pub label: GroupLabel,
}

/// Raw GPA values of one group, ready for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct GpaGroup {
    pub cluster: usize,
    pub label: GroupLabel,
    pub color: GroupColor,
    pub values: Vec<f64>,
}

/// Serializable view written by the CLI.
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub config: &'a PipelineConfig,
    pub students: Vec<ClusteredRow>,
    pub groups: &'a [ClusterSummary; N_CLUSTERS],
    pub linkage: &'a LinkageTree,
    pub cut_threshold: f64,
}

impl ClusterPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run scaling, linkage, partitioning and labeling on `observations`.
    pub fn run(&self, observations: &[Observation]) -> PipelineOutcome {
        let n = observations.len();
        if n < MIN_OBSERVATIONS {
            log::info!(
                "Need at least {} students to cluster, have {}",
                MIN_OBSERVATIONS,
                n
            );
            return PipelineOutcome::NotReady {
                available: n,
                required: MIN_OBSERVATIONS,
            };
        }

        // Linkage and the flat cut only fail for fewer than N_CLUSTERS rows,
        // which the guard above already turned into NotReady.
        match self.build_report(observations) {
            Ok(report) => PipelineOutcome::Ready(report),
            Err(e) => unreachable!("clustering {} >= {} students failed: {}", n, MIN_OBSERVATIONS, e),
        }
    }

    fn build_report(&self, observations: &[Observation]) -> Result<ClusterReport, ClusteringError> {
        let raw = feature_matrix(observations);
        let scaled = fit_transform(&raw);
        log::debug!("Scaled {} x {} feature matrix", scaled.nrows(), scaled.ncols());

        let linkage = build_ward_linkage(&scaled)?;
        let assignment = cut_tree(&linkage, N_CLUSTERS)?;
        let summaries = label_all(observations, &assignment);
        let groups = members_by_cluster(&assignment, N_CLUSTERS);

        for s in &summaries {
            log::info!(
                "Group {} ({}): {} students, mean GPA {:.2}, mean activity {:.1}",
                s.cluster,
                s.label,
                s.size,
                s.mean_gpa,
                s.mean_activity
            );
        }

        Ok(ClusterReport {
            config: self.config.clone(),
            observations: observations.to_vec(),
            raw,
            scaled,
            linkage,
            assignment,
            groups,
            summaries,
        })
    }
}

impl ClusterReport {
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn raw(&self) -> &Array2<f64> {
        &self.raw
    }

    pub fn scaled(&self) -> &Array2<f64> {
        &self.scaled
    }

    pub fn linkage(&self) -> &LinkageTree {
        &self.linkage
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn summaries(&self) -> &[ClusterSummary; N_CLUSTERS] {
        &self.summaries
    }

    /// Summary of `cluster`, `None` outside `0..N_CLUSTERS`.
    pub fn summary(&self, cluster: usize) -> Option<&ClusterSummary> {
        self.summaries.get(cluster)
    }

    /// Dendrogram colour threshold from the configured ratio.
    pub fn cut_threshold(&self) -> f64 {
        self.linkage.cut_threshold(self.config.dendrogram_cut_ratio)
    }

    pub fn rows(&self) -> Vec<ClusteredRow> {
        self.observations
            .iter()
            .zip(&self.assignment)
            .enumerate()
            .map(|(i, (obs, &cluster))| ClusteredRow {
                id: i + 1,
                gpa: obs.gpa(),
                activity: obs.activity(),
                cluster,
                label: self.summaries[cluster].label,
            })
            .collect()
    }

    /// Row indices (0-based) of the members of `cluster`; empty outside
    /// `0..N_CLUSTERS`.
    pub fn members(&self, cluster: usize) -> &[usize] {
        self.groups.get(cluster).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw (GPA, activity) points of `cluster`.
    pub fn points(&self, cluster: usize) -> Vec<[f64; 2]> {
        self.members(cluster)
            .iter()
            .map(|&row| [self.raw[(row, 0)], self.raw[(row, 1)]])
            .collect()
    }

    /// Boundary polygon of `cluster` in raw units, or `None` when the group
    /// has two members or fewer.
    pub fn hull(&self, cluster: usize) -> Option<Vec<[f64; 2]>> {
        let points = self.points(cluster);
        if points.len() > 2 {
            Some(convex_hull(&points))
        } else {
            None
        }
    }

    /// Per-group GPA values sorted by label name, skipping empty groups.
    pub fn gpa_groups(&self) -> Vec<GpaGroup> {
        let mut groups: Vec<GpaGroup> = self
            .summaries
            .iter()
            .map(|s| GpaGroup {
                cluster: s.cluster,
                label: s.label,
                color: s.color,
                values: self.points(s.cluster).iter().map(|p| p[0]).collect(),
            })
            .filter(|g| !g.values.is_empty())
            .collect();
        groups.sort_by(|a, b| {
            a.label
                .as_str()
                .cmp(b.label.as_str())
                .then(a.cluster.cmp(&b.cluster))
        });
        groups
    }

    pub fn gpa_summary(&self, cluster: usize) -> Option<Describe> {
        let values: Vec<f64> = self.points(cluster).iter().map(|p| p[0]).collect();
        describe(&values)
    }

    pub fn export(&self) -> ReportExport<'_> {
        ReportExport {
            config: &self.config,
            students: self.rows(),
            groups: &self.summaries,
            linkage: &self.linkage,
            cut_threshold: self.cut_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordStore;

    #[test]
    fn rows_carry_labels() {
        let store = RecordStore::default();
        let report = ClusterPipeline::default()
            .run(store.all())
            .into_ready()
            .unwrap();
        let rows = report.rows();
        assert_eq!(rows.len(), 10);
        for row in rows {
            assert_eq!(row.label, report.summary(row.cluster).unwrap().label);
        }
    }

    #[test]
    fn out_of_range_cluster_is_empty_not_a_panic() {
        let store = RecordStore::default();
        let report = ClusterPipeline::default()
            .run(store.all())
            .into_ready()
            .unwrap();
        assert!(report.summary(N_CLUSTERS).is_none());
        assert!(report.members(N_CLUSTERS).is_empty());
        assert!(report.points(N_CLUSTERS).is_empty());
        assert!(report.hull(N_CLUSTERS).is_none());
        assert!(report.gpa_summary(N_CLUSTERS).is_none());
    }

    #[test]
    fn members_partition_the_roster() {
        let store = RecordStore::default();
        let report = ClusterPipeline::default()
            .run(store.all())
            .into_ready()
            .unwrap();
        let mut all: Vec<usize> = (0..N_CLUSTERS)
            .flat_map(|c| report.members(c).to_vec())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
        for c in 0..N_CLUSTERS {
            assert_eq!(report.members(c).len(), report.summary(c).unwrap().size);
            for &row in report.members(c) {
                assert_eq!(report.assignment()[row], c);
            }
        }
    }

    #[test]
    fn identical_students_at_the_minimum_are_ready() {
        let store = RecordStore::from_observations(vec![
            Observation::new(3.0, 50).unwrap();
            MIN_OBSERVATIONS
        ]);
        let outcome = ClusterPipeline::default().run(store.all());
        let report = outcome.into_ready().expect("four students always cluster");
        let mut assignment = report.assignment().to_vec();
        assignment.sort_unstable();
        assert_eq!(assignment, vec![0, 1, 2, 3]);
    }

    #[test]
    fn gpa_groups_sorted_by_label() {
        let store = RecordStore::default();
        let report = ClusterPipeline::default()
            .run(store.all())
            .into_ready()
            .unwrap();
        let groups = report.gpa_groups();
        let names: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        let total: usize = groups.iter().map(|g| g.values.len()).sum();
        assert_eq!(total, 10);
    }
}
