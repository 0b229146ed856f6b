//! `cohort session`: line-oriented roster editing.
//!
//! Each command edits the roster or asks for a fresh clustering run. Nothing
//! derived from the roster is kept between commands.
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use cohort_clustering::config::PipelineConfig;
use cohort_clustering::pipeline::{ClusterPipeline, PipelineOutcome};
use cohort_clustering::records::RecordStore;
use cohort_clustering::report::build_report;

use crate::commands::cluster::format_table;

const HELP: &str = "Commands:
  add <gpa> <activity>   add a student (GPA 0-4.0, activity 0-100)
  clear                  remove every student
  reset                  reload the 10-student sample
  list                   show the roster
  run                    cluster the roster and show the groups
  report <file.html>     cluster and write the HTML report
  help                   show this message
  quit                   leave the session";

pub struct Session {
    store: RecordStore,
    pipeline: ClusterPipeline,
}

impl Session {
    pub fn new(store: RecordStore, config: PipelineConfig) -> Self {
        Self {
            store,
            pipeline: ClusterPipeline::new(config),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Read commands from `input` until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "{} students loaded. Type 'help' for commands.", self.store.len())?;
        for line in input.lines() {
            let line = line?;
            if !self.execute(line.trim(), out)? {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command. Returns `false` when the session should end.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(c) => c.to_lowercase(),
            None => return Ok(true),
        };
        let args: Vec<&str> = parts.collect();

        match command.as_str() {
            "add" => {
                if args.len() != 2 {
                    writeln!(out, "Usage: add <gpa> <activity>")?;
                    return Ok(true);
                }
                match self.store.add_str(args[0], args[1]) {
                    Ok(id) => {
                        writeln!(out, "Added student {}", id)?;
                        self.print_groups(out)?;
                    }
                    Err(e) => {
                        log::warn!("Rejected student: {}", e);
                        writeln!(out, "Error: {}", e)?;
                    }
                }
            }
            "clear" => {
                self.store.clear();
                writeln!(out, "Roster cleared")?;
            }
            "reset" => {
                self.store.reset_to_default();
                writeln!(out, "Sample roster restored ({} students)", self.store.len())?;
                self.print_groups(out)?;
            }
            "list" => {
                if self.store.is_empty() {
                    writeln!(out, "No students yet")?;
                }
                for row in self.store.rows() {
                    writeln!(out, "{:>3}  {:>4.1}  {:>3}", row.id, row.gpa, row.activity)?;
                }
            }
            "run" => match self.pipeline.run(self.store.all()) {
                PipelineOutcome::Ready(result) => write!(out, "{}", format_table(&result))?,
                PipelineOutcome::NotReady { required, .. } => {
                    writeln!(out, "Need at least {} students to analyse!", required)?
                }
            },
            "report" => {
                let path = match args.first() {
                    Some(p) => PathBuf::from(p),
                    None => {
                        writeln!(out, "Usage: report <file.html>")?;
                        return Ok(true);
                    }
                };
                match self.pipeline.run(self.store.all()) {
                    PipelineOutcome::Ready(result) => {
                        let written = build_report(&result, env!("CARGO_PKG_VERSION"))
                            .and_then(|report| report.save_to_file(&path));
                        match written {
                            Ok(()) => writeln!(out, "Report written to {}", path.display())?,
                            Err(e) => {
                                log::warn!("Report not written: {:#}", e);
                                writeln!(out, "Error: {:#}", e)?;
                            }
                        }
                    }
                    PipelineOutcome::NotReady { required, .. } => {
                        writeln!(out, "Need at least {} students to analyse!", required)?
                    }
                }
            }
            "help" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(false),
            other => writeln!(out, "Unknown command '{}'. Type 'help' for commands.", other)?,
        }
        Ok(true)
    }

    fn print_groups<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.pipeline.run(self.store.all()) {
            PipelineOutcome::Ready(result) => {
                let groups: Vec<String> = result
                    .summaries()
                    .iter()
                    .map(|s| format!("{} ({})", s.label, s.size))
                    .collect();
                writeln!(out, "Groups: {}", groups.join(", "))?;
            }
            PipelineOutcome::NotReady { required, .. } => {
                writeln!(out, "Need at least {} students to analyse!", required)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> (Session, String) {
        let mut session = Session::new(RecordStore::default(), PipelineConfig::default());
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_then_list() {
        let (session, out) = session("add 3.0 60\nlist\n");
        assert_eq!(session.store().len(), 11);
        assert!(out.contains("Added student 11"));
        assert!(out.contains("Groups: "));
    }

    #[test]
    fn bad_add_does_not_change_roster() {
        let (session, out) = session("add 5.0 60\nadd x 60\n");
        assert_eq!(session.store().len(), 10);
        assert!(out.contains("GPA must be between 0 and 4"));
        assert!(out.contains("GPA must be a number"));
    }

    #[test]
    fn clear_then_run_needs_more_data() {
        let (session, out) = session("clear\nadd 3 50\nrun\n");
        assert_eq!(session.store().len(), 1);
        assert!(out.contains("Need at least 4 students"));
    }

    #[test]
    fn failed_report_keeps_the_session_alive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.html");
        let script = format!("add 3.0 60\nreport {}\nadd 2.0 30\n", path.display());
        let (session, out) = session(&script);
        assert_eq!(session.store().len(), 12);
        assert!(out.contains("Error: "), "{}", out);
        assert!(out.contains("Added student 12"));
        assert!(!path.exists());
    }

    #[test]
    fn report_is_written_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let (_, out) = session(&format!("report {}\n", path.display()));
        assert!(out.contains("Report written to"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("<!DOCTYPE html>"));
    }

    #[test]
    fn quit_stops_reading() {
        let (session, _) = session("quit\nclear\n");
        assert_eq!(session.store().len(), 10);
    }
}
