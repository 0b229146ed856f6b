use plotly::box_plot::BoxPoints;
use plotly::common::{DashType, Fill, Line, Marker, Mode, Position};
use plotly::layout::{Axis, Layout};
use plotly::{BoxPlot, Plot, Scatter};

use crate::labeling::{ACTIVITY_THRESHOLD, GPA_THRESHOLD};
use crate::linkage::LinkageTree;
use crate::pipeline::{ClusterReport, GpaGroup};

/// Branch colours for dendrogram subtrees below the cut threshold.
const BRANCH_PALETTE: [&str; 8] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#17BECF",
];
const ABOVE_THRESHOLD_COLOR: &str = "#95A5A6";

/// Dendrogram of the Ward tree with the colour threshold drawn as a dashed line.
///
/// Leaves are labelled with 1-based student IDs.
pub fn plot_dendrogram(tree: &LinkageTree, threshold: f64, title: &str) -> Plot {
    let mut plot = Plot::new();
    let links = tree.dendrogram_links(threshold);

    let mut group_colors: Vec<(usize, &str)> = Vec::new();
    for link in &links {
        let color = match link.color_group {
            None => ABOVE_THRESHOLD_COLOR,
            Some(group) => {
                let known = group_colors
                    .iter()
                    .find(|(g, _)| *g == group)
                    .map(|&(_, c)| c);
                known.unwrap_or_else(|| {
                    let c = BRANCH_PALETTE[group_colors.len() % BRANCH_PALETTE.len()];
                    group_colors.push((group, c));
                    c
                })
            }
        };
        let trace = Scatter::new(link.xs.to_vec(), link.ys.to_vec())
            .mode(Mode::Lines)
            .line(Line::new().color(color).width(2.0))
            .show_legend(false);
        plot.add_trace(trace);
    }

    let n = tree.n_observations();
    let x_max = 10.0 * n as f64;
    let cut_line = Scatter::new(vec![0.0, x_max], vec![threshold, threshold])
        .mode(Mode::Lines)
        .name("Cut threshold")
        .line(Line::new().color("black").dash(DashType::Dash));
    plot.add_trace(cut_line);

    let order = tree.leaf_order();
    let tick_values: Vec<f64> = (0..order.len()).map(|slot| 5.0 + 10.0 * slot as f64).collect();
    let tick_text: Vec<String> = order.iter().map(|leaf| (leaf + 1).to_string()).collect();

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(
                Axis::new()
                    .title("Student ID")
                    .tick_values(tick_values)
                    .tick_text(tick_text)
                    .range(vec![0.0, x_max]),
            )
            .y_axis(Axis::new().title("Euclidean distance (Ward)")),
    );
    plot
}

/// GPA vs activity scatter coloured by group, with dashed group hulls,
/// student IDs next to each point and the labeling thresholds as dotted lines.
pub fn plot_clusters(report: &ClusterReport, title: &str) -> Plot {
    let mut plot = Plot::new();

    for summary in report.summaries() {
        let members = report.members(summary.cluster);
        if members.is_empty() {
            continue;
        }
        let color = summary.color.hex();

        if let Some(mut hull) = report.hull(summary.cluster) {
            if let Some(&first) = hull.first() {
                hull.push(first);
            }
            let outline = Scatter::new(
                hull.iter().map(|p| p[0]).collect::<Vec<f64>>(),
                hull.iter().map(|p| p[1]).collect::<Vec<f64>>(),
            )
            .mode(Mode::Lines)
            .fill(Fill::ToSelf)
            .fill_color(color)
            .opacity(0.15)
            .line(Line::new().color(color).dash(DashType::Dash).width(2.0))
            .hover_info(plotly::common::HoverInfo::Skip)
            .show_legend(false);
            plot.add_trace(outline);
        }

        let points = report.points(summary.cluster);
        let ids: Vec<String> = members.iter().map(|row| (row + 1).to_string()).collect();
        let scatter = Scatter::new(
            points.iter().map(|p| p[0]).collect::<Vec<f64>>(),
            points.iter().map(|p| p[1]).collect::<Vec<f64>>(),
        )
        .mode(Mode::MarkersText)
        .name(summary.label.as_str())
        .text_array(ids)
        .text_position(Position::TopRight)
        .marker(
            Marker::new()
                .color(color)
                .size(12)
                .line(Line::new().color("white").width(1.0)),
        );
        plot.add_trace(scatter);
    }

    let gpa_line = Scatter::new(vec![GPA_THRESHOLD, GPA_THRESHOLD], vec![0.0, 100.0])
        .mode(Mode::Lines)
        .line(Line::new().color("gray").dash(DashType::Dot))
        .show_legend(false);
    let activity_line = Scatter::new(vec![0.0, 4.0], vec![ACTIVITY_THRESHOLD, ACTIVITY_THRESHOLD])
        .mode(Mode::Lines)
        .line(Line::new().color("gray").dash(DashType::Dot))
        .show_legend(false);
    plot.add_trace(gpa_line);
    plot.add_trace(activity_line);

    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("GPA").range(vec![0.0, 4.2]))
            .y_axis(Axis::new().title("Activity score").range(vec![0.0, 105.0])),
    );
    plot
}

/// One GPA box per group (in the order given) with every student drawn as a
/// jittered point.
pub fn plot_gpa_boxplot(groups: &[GpaGroup], title: &str) -> Plot {
    let mut plot = Plot::new();
    for group in groups {
        let trace = BoxPlot::<f64, f64>::new(group.values.clone())
            .name(group.label.as_str())
            .marker(Marker::new().color(group.color.hex()))
            .box_points(BoxPoints::All)
            .jitter(0.3);
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(title)
            .y_axis(Axis::new().title("GPA")),
    );
    plot
}
