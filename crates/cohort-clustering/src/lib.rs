//! cohort-clustering: group students by GPA and activity score.
//!
//! The crate holds the roster (`records`), standardizes the two features
//! (`preprocessing`), builds a Ward linkage tree (`linkage`), cuts it into four
//! flat groups (`partition`) and names each group from its raw centroid
//! (`labeling`). `pipeline` ties these together behind a single `run` call that
//! returns either a complete result or a "not enough students" marker, and
//! `report` turns a result into an HTML page with plotly figures.
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod labeling;
pub mod linkage;
pub mod math;
pub mod partition;
pub mod pipeline;
pub mod preprocessing;
pub mod records;
pub mod report;
pub mod stats;

pub use config::PipelineConfig;
pub use error::{ClusteringError, RecordError};
pub use labeling::{ClusterSummary, GroupColor, GroupLabel};
pub use pipeline::{ClusterPipeline, ClusterReport, PipelineOutcome};
pub use records::{Observation, RecordStore};
