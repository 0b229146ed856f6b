use serde::{Deserialize, Serialize};

/// Central configuration for a pipeline run and its report.
///
/// The number of clusters and the labeling thresholds are fixed; see
/// [`crate::labeling`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Dendrogram branches below `ratio * max merge height` are coloured per
    /// subtree. Presentation only; the flat clustering ignores it.
    pub dendrogram_cut_ratio: f64,
}

impl PipelineConfig {
    pub fn new(dendrogram_cut_ratio: f64) -> Self {
        Self {
            dendrogram_cut_ratio,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dendrogram_cut_ratio: 0.55,
        }
    }
}
