//! HTML reporting for a finished clustering run.
//!
//! [`build_report`] assembles the three figures (dendrogram, grouping
//! scatter, GPA box plot) together with the student table, the group summary
//! and the effective configuration.
pub mod plots;
#[allow(clippy::module_inception)]
pub mod report;

use maud::{html, PreEscaped};

use crate::pipeline::ClusterReport;
use crate::stats::describe;

pub use plots::{plot_clusters, plot_dendrogram, plot_gpa_boxplot};
pub use report::{Report, ReportSection};

/// Build the full report for `result`.
pub fn build_report(result: &ClusterReport, version: &str) -> anyhow::Result<Report> {
    let mut report = Report::new("cohort", version, None, "Student Clustering Report");

    /* Section 1: Groups */
    {
        let mut section = ReportSection::new("Groups");
        section.add_content(html! {
            p {
                (result.observations().len()) " students split into 4 groups by Ward clustering "
                "on standardized GPA and activity."
            }
            table {
                tr { th { "Group" } th { "Label" } th { "Students" } th { "Mean GPA" } th { "Mean activity" } }
                @for s in result.summaries() {
                    tr {
                        td { (s.cluster) }
                        td style={ "color: " (s.color.hex()) } { (s.label.as_str()) }
                        td { (s.size) }
                        td { (format!("{:.2}", s.mean_gpa)) }
                        td { (format!("{:.1}", s.mean_activity)) }
                    }
                }
            }
        });
        section.add_plot(plot_clusters(result, "Student groups"));
        report.add_section(section);
    }

    /* Section 2: Hierarchy */
    {
        let mut section = ReportSection::new("Hierarchy");
        let threshold = result.cut_threshold();
        section.add_content(html! {
            p {
                "Branches below " (format!("{:.3}", threshold)) " ("
                (result.config().dendrogram_cut_ratio) " x the highest merge) share a colour."
            }
        });
        section.add_plot(plot_dendrogram(result.linkage(), threshold, "Dendrogram"));
        report.add_section(section);
    }

    /* Section 3: GPA detail */
    {
        let mut section = ReportSection::new("GPA by group");
        let groups = result.gpa_groups();
        section.add_content(html! {
            table {
                tr { th { "Label" } th { "n" } th { "Min" } th { "Q1" } th { "Median" } th { "Q3" } th { "Max" } }
                @for g in &groups {
                    @if let Some(d) = describe(&g.values) {
                        tr {
                            td { (g.label.as_str()) }
                            td { (d.count) }
                            td { (format!("{:.2}", d.min)) }
                            td { (format!("{:.2}", d.lower_quartile)) }
                            td { (format!("{:.2}", d.median)) }
                            td { (format!("{:.2}", d.upper_quartile)) }
                            td { (format!("{:.2}", d.max)) }
                        }
                    }
                }
            }
        });
        section.add_plot(plot_gpa_boxplot(&groups, "GPA distribution"));
        report.add_section(section);
    }

    /* Section 4: Students */
    {
        let mut section = ReportSection::new("Students");
        section.add_content(html! {
            table {
                tr { th { "ID" } th { "GPA" } th { "Activity" } th { "Group" } }
                @for row in result.rows() {
                    tr {
                        td { (row.id) }
                        td { (row.gpa) }
                        td { (row.activity) }
                        td { (row.label.as_str()) }
                    }
                }
            }
        });
        report.add_section(section);
    }

    /* Section 5: Configuration */
    {
        let mut section = ReportSection::new("Configuration");
        section.add_content(html! {
            pre {
                code { (PreEscaped(serde_json::to_string_pretty(result.config())?)) }
            }
        });
        report.add_section(section);
    }

    Ok(report)
}
