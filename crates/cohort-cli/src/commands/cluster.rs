//! `cohort cluster`: build a roster, run the pipeline and write the outputs.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cohort_clustering::config::PipelineConfig;
use cohort_clustering::io::read_roster_csv;
use cohort_clustering::pipeline::{ClusterPipeline, ClusterReport, PipelineOutcome};
use cohort_clustering::records::RecordStore;
use cohort_clustering::report::build_report;

use crate::util::{validate_csv_file, write_bytes_to_file};

/// Where the students come from and where the results go.
#[derive(Debug, Clone, Default)]
pub struct ClusterArgs {
    /// Roster CSV; the built-in sample is used when absent.
    pub input: Option<PathBuf>,
    /// Start from an empty roster instead of the sample.
    pub empty: bool,
    /// Extra students appended after loading, as raw `(gpa, activity)` text.
    pub additions: Vec<(String, String)>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Load a pipeline configuration from a JSON file.
pub fn load_pipeline_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Split a `GPA,ACTIVITY` command line value.
pub fn parse_addition(value: &str) -> Result<(String, String)> {
    let (gpa, activity) = value
        .split_once(',')
        .with_context(|| format!("Expected GPA,ACTIVITY but got {:?}", value))?;
    Ok((gpa.trim().to_string(), activity.trim().to_string()))
}

/// Assemble the roster described by `args`.
pub fn build_roster(args: &ClusterArgs) -> Result<RecordStore> {
    let mut store = match &args.input {
        Some(path) => {
            validate_csv_file(path)?;
            read_roster_csv(path)?
        }
        None if args.empty => RecordStore::empty(),
        None => RecordStore::default(),
    };

    for (gpa, activity) in &args.additions {
        let id = store
            .add_str(gpa, activity)
            .with_context(|| format!("Rejected student ({}, {})", gpa, activity))?;
        log::info!("Added student {} (GPA {}, activity {})", id, gpa, activity);
    }
    Ok(store)
}

/// Run the pipeline and write whatever outputs were requested.
///
/// Returns `None` when the roster is too small to cluster.
pub fn run_cluster(args: &ClusterArgs, config: &PipelineConfig) -> Result<Option<ClusterReport>> {
    let store = build_roster(args)?;
    let pipeline = ClusterPipeline::new(config.clone());

    let result = match pipeline.run(store.all()) {
        PipelineOutcome::Ready(result) => result,
        PipelineOutcome::NotReady {
            available,
            required,
        } => {
            log::warn!(
                "Only {} students; at least {} are needed to analyse the roster",
                available,
                required
            );
            return Ok(None);
        }
    };

    if let Some(path) = &args.output {
        write_cluster_output(&result, path)?;
    }
    if let Some(path) = &args.report {
        build_report(&result, env!("CARGO_PKG_VERSION"))?.save_to_file(path)?;
    }
    Ok(Some(result))
}

/// Serialize the result as pretty JSON.
pub fn write_cluster_output(result: &ClusterReport, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(&result.export())?;
    write_bytes_to_file(path, &bytes)
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    log::info!("Results saved to {}", path.display());
    Ok(())
}

/// Plain-text table of students and their groups.
pub fn format_table(result: &ClusterReport) -> String {
    let mut out = String::new();
    out.push_str(" ID   GPA  Activity  Group\n");
    for row in result.rows() {
        out.push_str(&format!(
            "{:>3}  {:>4.1}  {:>8}  {}\n",
            row.id, row.gpa, row.activity, row.label
        ));
    }
    out.push('\n');
    for s in result.summaries() {
        out.push_str(&format!(
            "Group {} {:<14} {:>2} students  mean GPA {:.2}  mean activity {:.1}\n",
            s.cluster,
            s.label.as_str(),
            s.size,
            s.mean_gpa,
            s.mean_activity
        ));
    }
    out
}
