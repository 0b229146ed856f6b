//! Minimal HTML report container: titled sections holding maud markup and
//! plotly figures, rendered into one self-contained page.
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

enum SectionItem {
    Content(Markup),
    Plot(Plot),
}

/// One titled block of the report.
pub struct ReportSection {
    title: String,
    items: Vec<SectionItem>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.items.push(SectionItem::Content(content));
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.items.push(SectionItem::Plot(plot));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn n_plots(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, SectionItem::Plot(_)))
            .count()
    }

    fn render(&self, section_idx: usize) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for (item_idx, item) in self.items.iter().enumerate() {
                    @match item {
                        SectionItem::Content(markup) => div class="content" { (markup) },
                        SectionItem::Plot(plot) => {
                            @let div_id = format!("plot-{}-{}", section_idx, item_idx);
                            div class="plot" { (PreEscaped(plot.to_inline_html(Some(div_id.as_str())))) }
                        },
                    }
                }
            }
        }
    }
}

/// A full report page.
pub struct Report {
    software_name: String,
    version: String,
    logo: Option<String>,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(software_name: &str, version: &str, logo: Option<&str>, title: &str) -> Self {
        Self {
            software_name: software_name.to_string(),
            version: version.to_string(),
            logo: logo.map(str::to_string),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn render(&self) -> String {
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let page = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style {
                        "body { font-family: Arial, sans-serif; margin: 0 auto; max-width: 1100px; padding: 20px; }
                        header { display: flex; align-items: center; gap: 16px; border-bottom: 2px solid navy; }
                        header img { height: 48px; }
                        h1, h2 { color: navy; }
                        table { border-collapse: collapse; margin: 10px 0; }
                        th, td { border: 1px solid #ddd; padding: 4px 10px; text-align: center; }
                        th { background-color: #f0f0f0; }"
                    }
                }
                body {
                    header {
                        @if let Some(logo) = &self.logo {
                            img src=(logo) alt="logo";
                        }
                        div {
                            h1 { (self.title) }
                            p { (self.software_name) " v" (self.version) " | generated " (generated) }
                        }
                    }
                    @for (idx, section) in self.sections.iter().enumerate() {
                        (section.render(idx))
                    }
                }
            }
        };
        page.into_string()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(&path, self.render())
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        log::info!("Report saved to {}", path.as_ref().display());
        Ok(())
    }
}
