//! Data Visualization page: three chart tabs over the sample series

use super::{AxisValue, ChartKind, ChartPoint, ChartSpec, Series, Tab, ViewNode};
use crate::data::{SampleSeries, Segment};
use crate::nav::RenderContext;

const SNIPPET: &str = r#"
// Generate sample data once per session
let key = SampleKey::new(2024, config.sample.seed, session_id);
let series = cache.get_or_generate(&key).await?;

// Chart specs are plain data
let line = ChartSpec::new(ChartKind::Line, "Sales Over Time")
    .axes("date", "sales")
    .series(Series::new("sales", points));
"#;

pub fn build(ctx: &RenderContext, sample: &SampleSeries) -> Vec<ViewNode> {
    let mut nodes = vec![
        ViewNode::header("📊 Data Visualization Examples"),
        ViewNode::Tabs {
            tabs: vec![
                tab("Line Chart", sales_over_time(sample)),
                tab("Bar Chart", monthly_sales(sample)),
                tab("Scatter Plot", sales_vs_customers(sample)),
            ],
        },
    ];

    if ctx.nav.show_code {
        nodes.push(ViewNode::code("rust", SNIPPET));
    }

    nodes
}

fn tab(label: &str, chart: ChartSpec) -> Tab {
    Tab {
        label: label.to_string(),
        content: vec![ViewNode::Chart(chart)],
    }
}

pub fn sales_over_time(sample: &SampleSeries) -> ChartSpec {
    let points = sample
        .rows
        .iter()
        .map(|row| ChartPoint {
            x: AxisValue::Date(row.date),
            y: row.sales,
        })
        .collect();

    ChartSpec::new(ChartKind::Line, "Sales Over Time")
        .axes("date", "sales")
        .series(Series::new("sales", points))
}

pub fn monthly_sales(sample: &SampleSeries) -> ChartSpec {
    let points = sample
        .monthly_sales()
        .into_iter()
        .map(|m| ChartPoint {
            x: AxisValue::Label(m.name.to_string()),
            y: m.sales,
        })
        .collect();

    ChartSpec::new(ChartKind::Bar, "Average Monthly Sales")
        .axes("month", "sales")
        .series(Series::new("sales", points))
}

/// One series per category, so each gets its own color
pub fn sales_vs_customers(sample: &SampleSeries) -> ChartSpec {
    Segment::all().iter().fold(
        ChartSpec::new(ChartKind::Scatter, "Sales vs Customers by Category")
            .axes("customers", "sales"),
        |chart, segment| {
            let points = sample
                .rows
                .iter()
                .filter(|row| row.category == *segment)
                .map(|row| ChartPoint {
                    x: AxisValue::Number(row.customers as f64),
                    y: row.sales,
                })
                .collect();
            chart.series(Series::new(segment.to_string(), points))
        },
    )
}
