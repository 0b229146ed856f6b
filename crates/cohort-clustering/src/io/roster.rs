//! Roster CSV reader / writer.
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::records::{Observation, RecordStore};

/// Column names looked up case-insensitively in the header row.
#[derive(Debug, Clone)]
pub struct RosterReaderConfig {
    pub gpa_column: String,
    pub activity_column: String,
    pub delimiter: u8,
}

impl Default for RosterReaderConfig {
    fn default() -> Self {
        Self {
            gpa_column: "gpa".to_string(),
            activity_column: "activity".to_string(),
            delimiter: b',',
        }
    }
}

/// Read a roster CSV with `gpa` and `activity` columns.
pub fn read_roster_csv<P: AsRef<Path>>(path: P) -> Result<RecordStore> {
    read_roster_csv_with_config(path, &RosterReaderConfig::default())
}

/// Read a roster file using a custom configuration.
///
/// Every row goes through the same validation as an interactive add; the
/// first bad row aborts the import and nothing is returned.
pub fn read_roster_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &RosterReaderConfig,
) -> Result<RecordStore> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open roster file: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read roster header row")?
        .clone();
    let gpa_idx = find_column(&headers, &config.gpa_column)?;
    let activity_idx = find_column(&headers, &config.activity_column)?;

    let mut observations = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read roster row {}", row_idx + 1))?;
        let gpa = record.get(gpa_idx).unwrap_or("");
        let activity = record.get(activity_idx).unwrap_or("");
        let observation = Observation::parse(gpa, activity)
            .map_err(|e| anyhow!("Invalid roster row {}: {}", row_idx + 1, e))?;
        observations.push(observation);
    }

    log::info!(
        "Loaded {} students from {}",
        observations.len(),
        path.as_ref().display()
    );
    Ok(RecordStore::from_observations(observations))
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("Roster is missing a '{}' column", name))
}

/// Write observations as `gpa,activity` CSV.
pub fn write_roster_csv<W: Write>(writer: W, observations: &[Observation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["gpa", "activity"])?;
    for o in observations {
        wtr.write_record([o.gpa().to_string(), o.activity().to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
