//! SVG chart drawing
//!
//! Draws a [`ChartSpec`] as a self-contained inline SVG element: title,
//! horizontal grid with y labels, x labels, one color per series and a
//! legend when there is more than one series.

use std::collections::HashMap;

use super::html::escape;
use crate::view::{AxisValue, ChartKind, ChartSpec};

/// Chart colors for different series
const SERIES_COLORS: [&str; 6] = [
    "#636EFA", // Blue (primary)
    "#EF553B", // Red
    "#00CC96", // Green
    "#AB63FA", // Purple
    "#FFA15A", // Orange
    "#19D3F3", // Cyan
];

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

const GRID_LINES: usize = 5;

/// Maps x values onto a 0..=1 fraction of the plot width
enum XScale {
    Linear { min: f64, max: f64 },
    Bands { labels: Vec<String>, index: HashMap<String, usize> },
}

impl XScale {
    fn for_chart(chart: &ChartSpec) -> Self {
        let points = chart.series.iter().flat_map(|s| s.points.iter());

        if chart.kind == ChartKind::Bar
            || points.clone().any(|p| matches!(p.x, AxisValue::Label(_)))
        {
            let mut labels = Vec::new();
            let mut index = HashMap::new();
            for point in points {
                let label = point.x.to_string();
                if !index.contains_key(&label) {
                    index.insert(label.clone(), labels.len());
                    labels.push(label);
                }
            }
            return XScale::Bands { labels, index };
        }

        let (min, max) = points
            .filter_map(|p| numeric_x(&p.x))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });
        XScale::Linear { min, max }
    }

    /// Fraction of the plot width for the center of `x`
    fn position(&self, x: &AxisValue) -> Option<f64> {
        match self {
            XScale::Linear { min, max } => {
                let v = numeric_x(x)?;
                if max > min {
                    Some((v - min) / (max - min))
                } else {
                    Some(0.5)
                }
            }
            XScale::Bands { labels, index } => {
                let idx = *index.get(&x.to_string())?;
                Some((idx as f64 + 0.5) / labels.len() as f64)
            }
        }
    }
}

fn numeric_x(x: &AxisValue) -> Option<f64> {
    match x {
        AxisValue::Date(d) => Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64 / 86_400.0),
        AxisValue::Number(n) => Some(*n),
        AxisValue::Label(_) => None,
    }
}

/// Render `chart` as an inline `<svg>` element
pub fn render_chart(chart: &ChartSpec) -> String {
    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let mut svg = format!(
        r#"<svg class="chart chart-{kind}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="{title}">"#,
        kind = match chart.kind {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
        },
        w = WIDTH,
        h = HEIGHT,
        title = escape(&chart.title),
    );
    svg.push_str(&format!(
        r#"<text class="chart-title" x="{}" y="24">{}</text>"#,
        MARGIN_LEFT,
        escape(&chart.title)
    ));

    if chart.point_count() == 0 {
        svg.push_str(&format!(
            r#"<text class="chart-empty" x="{}" y="{}">No data</text></svg>"#,
            WIDTH / 2.0 - 30.0,
            HEIGHT / 2.0
        ));
        return svg;
    }

    // Find global min/max for y-axis
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for point in chart.series.iter().flat_map(|s| s.points.iter()) {
        y_min = y_min.min(point.y);
        y_max = y_max.max(point.y);
    }

    if chart.kind == ChartKind::Bar {
        y_min = y_min.min(0.0);
        y_max = y_max.max(0.0);
    } else {
        let y_padding = if y_max > y_min { (y_max - y_min) * 0.1 } else { 1.0 };
        y_min -= y_padding;
        y_max += y_padding;
    }
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let x_scale = XScale::for_chart(chart);
    let to_x = |frac: f64| MARGIN_LEFT + frac * plot_width;
    let to_y = |value: f64| MARGIN_TOP + ((y_max - value) / (y_max - y_min)) * plot_height;

    // Horizontal grid lines with y labels
    for i in 0..=GRID_LINES {
        let y = MARGIN_TOP + (i as f64 / GRID_LINES as f64) * plot_height;
        let value = y_max - (i as f64 / GRID_LINES as f64) * (y_max - y_min);
        svg.push_str(&format!(
            r#"<line class="grid" x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}"/><text class="tick" x="5" y="{ty:.1}">{value:.1}</text>"#,
            x1 = MARGIN_LEFT,
            x2 = WIDTH - MARGIN_RIGHT,
            y = y,
            ty = y + 4.0,
            value = value,
        ));
    }

    // X labels
    let label_y = HEIGHT - MARGIN_BOTTOM + 20.0;
    match &x_scale {
        XScale::Bands { labels, .. } => {
            let step = (labels.len() / 12).max(1);
            for (idx, label) in labels.iter().enumerate().step_by(step) {
                let x = to_x((idx as f64 + 0.5) / labels.len() as f64);
                svg.push_str(&format!(
                    r#"<text class="tick" text-anchor="middle" x="{:.1}" y="{:.1}">{}</text>"#,
                    x,
                    label_y,
                    escape(&abbreviate(label))
                ));
            }
        }
        XScale::Linear { min, max } => {
            let dates = chart
                .series
                .iter()
                .flat_map(|s| s.points.iter())
                .any(|p| matches!(p.x, AxisValue::Date(_)));
            for i in 0..=GRID_LINES {
                let frac = i as f64 / GRID_LINES as f64;
                let value = min + frac * (max - min);
                let text = if dates {
                    chrono::DateTime::from_timestamp((value * 86_400.0) as i64, 0)
                        .map(|dt| dt.format("%b %d").to_string())
                        .unwrap_or_default()
                } else {
                    format!("{:.0}", value)
                };
                svg.push_str(&format!(
                    r#"<text class="tick" text-anchor="middle" x="{:.1}" y="{:.1}">{}</text>"#,
                    to_x(frac),
                    label_y,
                    text
                ));
            }
        }
    }

    // Axis titles
    svg.push_str(&format!(
        r#"<text class="axis-title" text-anchor="middle" x="{:.1}" y="{:.1}">{}</text>"#,
        MARGIN_LEFT + plot_width / 2.0,
        HEIGHT - 8.0,
        escape(&chart.x_label)
    ));

    // Data series
    let series_count = chart.series.len().max(1);
    for (idx, series) in chart.series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];

        match chart.kind {
            ChartKind::Line => {
                let path: Vec<String> = series
                    .points
                    .iter()
                    .filter_map(|p| {
                        let frac = x_scale.position(&p.x)?;
                        Some(format!("{:.1},{:.1}", to_x(frac), to_y(p.y)))
                    })
                    .collect();
                svg.push_str(&format!(
                    r#"<polyline class="series" fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
                    color,
                    path.join(" ")
                ));
            }
            ChartKind::Scatter => {
                for point in &series.points {
                    if let Some(frac) = x_scale.position(&point.x) {
                        svg.push_str(&format!(
                            r#"<circle class="series" cx="{:.1}" cy="{:.1}" r="3" fill="{}" fill-opacity="0.8"/>"#,
                            to_x(frac),
                            to_y(point.y),
                            color
                        ));
                    }
                }
            }
            ChartKind::Bar => {
                let band = match &x_scale {
                    XScale::Bands { labels, .. } => plot_width / labels.len().max(1) as f64,
                    XScale::Linear { .. } => plot_width,
                };
                let bar_width = band * 0.8 / series_count as f64;
                let baseline = to_y(0.0);
                for point in &series.points {
                    if let Some(frac) = x_scale.position(&point.x) {
                        let x = to_x(frac) - band * 0.4 + idx as f64 * bar_width;
                        let top = to_y(point.y);
                        svg.push_str(&format!(
                            r#"<rect class="series" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {:.2}</title></rect>"#,
                            x,
                            top.min(baseline),
                            bar_width,
                            (baseline - top).abs(),
                            color,
                            escape(&point.x.to_string()),
                            point.y
                        ));
                    }
                }
            }
        }
    }

    // Legend
    if chart.series.len() > 1 {
        for (idx, series) in chart.series.iter().enumerate() {
            let x = WIDTH - MARGIN_RIGHT - 60.0;
            let y = MARGIN_TOP + idx as f64 * 18.0;
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}"/><text class="legend" x="{:.1}" y="{:.1}">{}</text>"#,
                x,
                y,
                SERIES_COLORS[idx % SERIES_COLORS.len()],
                x + 10.0,
                y + 4.0,
                escape(&series.name)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Shorten month names to fit under a band
fn abbreviate(label: &str) -> String {
    if label.chars().count() > 9 {
        label.chars().take(3).collect()
    } else {
        label.to_string()
    }
}
