//! Chart specifications
//!
//! Backend-agnostic description of a chart: kind, axes and data series.
//! [`crate::render::svg`] draws these as inline SVG; the JSON API returns
//! them as-is for client-side plotting.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

/// X-axis value of a point
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AxisValue {
    Date(NaiveDate),
    Number(f64),
    Label(String),
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            AxisValue::Number(n) => write!(f, "{}", n),
            AxisValue::Label(l) => write!(f, "{}", l),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub x: AxisValue,
    pub y: f64,
}

/// Named data series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
        }
    }

    /// Builder method: set axis labels
    pub fn axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Builder method: add a series
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}
