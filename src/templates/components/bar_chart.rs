// Grouped bar chart drawn as inline SVG: one group per key, one bar per
// category inside each group.

use crate::dataset::{GroupBy, GroupedCount};
use crate::templates::components::warning_notice;
use maud::{html, Markup};
use std::collections::BTreeSet;

const PALETTE: &[&str] = &[
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
];

const BAR_WIDTH: f64 = 22.0;
const GROUP_GAP: f64 = 18.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 96.0;
const PLOT_HEIGHT: f64 = 240.0;
const MIN_WIDTH: f64 = 360.0;

/// Geometry shared by the bars and the axes.
struct Layout {
    keys: Vec<String>,
    categories: Vec<String>,
    max: usize,
    group_width: f64,
    width: f64,
    height: f64,
}

impl Layout {
    fn new(counts: &[GroupedCount]) -> Self {
        let keys: Vec<String> = counts
            .iter()
            .map(|c| c.key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let categories: Vec<String> = counts
            .iter()
            .map(|c| c.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0);

        let group_width = categories.len().max(1) as f64 * BAR_WIDTH + GROUP_GAP;
        let width = (MARGIN_LEFT + keys.len() as f64 * group_width + MARGIN_RIGHT).max(MIN_WIDTH);

        Self {
            keys,
            categories,
            max,
            group_width,
            width,
            height: MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM,
        }
    }

    fn baseline(&self) -> f64 {
        MARGIN_TOP + PLOT_HEIGHT
    }

    fn bar_height(&self, count: usize) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            count as f64 / self.max as f64 * PLOT_HEIGHT
        }
    }

    fn bar_x(&self, key: &str, category: &str) -> f64 {
        let k = self.keys.iter().position(|x| x == key).unwrap_or(0);
        let c = self.categories.iter().position(|x| x == category).unwrap_or(0);
        MARGIN_LEFT + GROUP_GAP / 2.0 + k as f64 * self.group_width + c as f64 * BAR_WIDTH
    }

    fn color(&self, category: &str) -> &'static str {
        let c = self.categories.iter().position(|x| x == category).unwrap_or(0);
        PALETTE[c % PALETTE.len()]
    }

    fn ticks(&self) -> Vec<usize> {
        match self.max {
            0 => vec![0],
            1 => vec![0, 1],
            m => vec![0, m / 2, m],
        }
    }
}

pub fn bar_chart(counts: &[GroupedCount], group_by: GroupBy) -> Markup {
    let layout = Layout::new(counts);
    let baseline = layout.baseline();

    html! {
        figure class="chart" {
            svg
                xmlns="http://www.w3.org/2000/svg"
                width=(layout.width)
                height=(layout.height)
                viewBox=(format!("0 0 {} {}", layout.width, layout.height))
                role="img"
                aria-label=(format!("Price category counts by {}", group_by.key_label().to_lowercase()))
            {
                // Axes
                line x1=(MARGIN_LEFT) y1=(MARGIN_TOP) x2=(MARGIN_LEFT) y2=(baseline) stroke="#9ca3af" {}
                line x1=(MARGIN_LEFT) y1=(baseline) x2=(layout.width - MARGIN_RIGHT) y2=(baseline) stroke="#9ca3af" {}

                @for tick in layout.ticks() {
                    @let y = baseline - layout.bar_height(tick);
                    text x=(MARGIN_LEFT - 6.0) y=(y + 4.0) text-anchor="end" font-size="11" fill="#4b5563" { (tick) }
                }

                @if counts.is_empty() {
                    text x=(layout.width / 2.0) y=(MARGIN_TOP + PLOT_HEIGHT / 2.0) text-anchor="middle" font-size="14" fill="#6b7280" {
                        "No rows to plot"
                    }
                }

                @for row in counts {
                    @let h = layout.bar_height(row.count);
                    rect
                        x=(layout.bar_x(&row.key, &row.category))
                        y=(baseline - h)
                        width=(BAR_WIDTH - 2.0)
                        height=(h)
                        fill=(layout.color(&row.category))
                    {
                        title { (row.key) " / " (row.category) ": " (row.count) }
                    }
                }

                @for (k, key) in layout.keys.iter().enumerate() {
                    @let x = MARGIN_LEFT + k as f64 * layout.group_width + layout.group_width / 2.0;
                    text
                        x=(x)
                        y=(baseline + 14.0)
                        text-anchor="end"
                        font-size="11"
                        fill="#374151"
                        transform=(format!("rotate(-35 {x} {})", baseline + 14.0))
                    { (key) }
                }
            }

            figcaption class="legend" {
                span { strong { (group_by.key_label()) } " vs count" }
                @for category in &layout.categories {
                    span {
                        span class="swatch" style=(format!("background: {};", layout.color(category))) {}
                        (category)
                    }
                }
            }
        }
    }
}

/// Chart panel returned after an upload: a summary line plus the chart.
pub fn dataset_result(counts: &[GroupedCount], group_by: GroupBy, rows: usize) -> Markup {
    let plotted: usize = counts.iter().map(|c| c.count).sum();

    html! {
        div id="dataset-result" {
            p {
                "Plotted " strong { (plotted) } " of " (rows) " rows by "
                (group_by.key_label().to_lowercase()) "."
            }
            @if rows > 0 && plotted < rows {
                (warning_notice(&format!(
                    "{} rows were skipped because the {} or price category cell was blank.",
                    rows - plotted,
                    group_by.source_column()
                )))
            }
            (bar_chart(counts, group_by))
        }
    }
}
