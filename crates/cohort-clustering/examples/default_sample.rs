use anyhow::Result;
use cohort_clustering::records::RecordStore;
use cohort_clustering::report::build_report;
use cohort_clustering::{ClusterPipeline, PipelineOutcome};

fn main() -> Result<()> {
    env_logger::init();

    let mut store = RecordStore::default();
    store.add(3.0, 60)?;
    println!("Roster size: {}", store.len());

    let result = match ClusterPipeline::default().run(store.all()) {
        PipelineOutcome::Ready(result) => result,
        PipelineOutcome::NotReady { required, .. } => {
            println!("Need at least {} students", required);
            return Ok(());
        }
    };

    for row in result.rows() {
        println!("{:>3}  {:.1}  {:>3}  {}", row.id, row.gpa, row.activity, row.label);
    }

    build_report(&result, env!("CARGO_PKG_VERSION"))?.save_to_file("cohort_report.html")?;
    println!("Report saved to cohort_report.html");

    Ok(())
}
