//! Page Router and Views
//!
//! Each page is a pure function from the [`RenderContext`] (plus sample
//! data, form values or an upload where the page needs them) to a list of
//! [`ViewNode`] instructions. Nothing here performs I/O; the instructions
//! are handed to [`crate::render`] or serialized as JSON by the API.
//!
//! - [`home`]: metric cards and feature overview
//! - [`visualization`]: line, bar and scatter charts over the sample series
//! - [`demo`]: input form with live preview, CSV upload summary
//! - [`about`]: project description and links

pub mod about;
pub mod chart;
pub mod demo;
pub mod home;
pub mod visualization;

pub use chart::{AxisValue, ChartKind, ChartPoint, ChartSpec, Series};

use serde::Serialize;
use thiserror::Error;

use crate::data::{DataError, SampleSeries};
use crate::form::FormSubmission;
use crate::nav::{Page, RenderContext};

/// Inline piece of rich text
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Plain(String),
    Strong(String),
    Code(String),
    Link { label: String, url: String },
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span::Plain(text.into())
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Span::Strong(text.into())
    }

    pub fn code(text: impl Into<String>) -> Self {
        Span::Code(text.into())
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Span::Link {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One tab of a tab panel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tab {
    pub label: String,
    pub content: Vec<ViewNode>,
}

/// A single display instruction
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewNode {
    Header {
        text: String,
    },
    Subheader {
        text: String,
    },
    Paragraph {
        spans: Vec<Span>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Span>>,
    },
    /// Bold label followed by a value
    Field {
        label: String,
        value: String,
    },
    Metric {
        label: String,
        value: String,
        delta: String,
    },
    /// Side-by-side regions; `weights` gives their relative widths
    Columns {
        weights: Vec<u8>,
        columns: Vec<Vec<ViewNode>>,
    },
    Tabs {
        tabs: Vec<Tab>,
    },
    Chart(ChartSpec),
    Code {
        language: String,
        source: String,
    },
    Table {
        columns: Vec<String>,
        index: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Expander {
        label: String,
        content: Vec<ViewNode>,
    },
    Form {
        action: String,
        values: FormSubmission,
    },
    FileUpload {
        action: String,
        label: String,
        accept: String,
    },
    Success {
        text: String,
    },
    Divider,
}

impl ViewNode {
    pub fn header(text: impl Into<String>) -> Self {
        ViewNode::Header { text: text.into() }
    }

    pub fn subheader(text: impl Into<String>) -> Self {
        ViewNode::Subheader { text: text.into() }
    }

    /// Paragraph of plain text
    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Paragraph {
            spans: vec![Span::plain(text)],
        }
    }

    pub fn paragraph(spans: Vec<Span>) -> Self {
        ViewNode::Paragraph { spans }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        ViewNode::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn metric(
        label: impl Into<String>,
        value: impl Into<String>,
        delta: impl Into<String>,
    ) -> Self {
        ViewNode::Metric {
            label: label.into(),
            value: value.into(),
            delta: delta.into(),
        }
    }

    /// Equal-width columns
    pub fn columns(columns: Vec<Vec<ViewNode>>) -> Self {
        ViewNode::Columns {
            weights: vec![1; columns.len()],
            columns,
        }
    }

    pub fn code(language: impl Into<String>, source: impl Into<String>) -> Self {
        ViewNode::Code {
            language: language.into(),
            source: source.into().trim().to_string(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        ViewNode::Success { text: text.into() }
    }
}

/// An uploaded file as received from the client
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Optional per-page inputs of a render pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewInputs<'a> {
    pub sample: Option<&'a SampleSeries>,
    pub form: Option<&'a FormSubmission>,
    pub upload: Option<&'a Upload>,
}

/// Result of routing one render pass
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewOutput {
    /// Page whose view produced the nodes
    pub page: Page,
    pub nodes: Vec<ViewNode>,
}

/// Errors raised while building a view
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Sample data is required for the {0} page")]
    MissingSampleData(Page),

    #[error("Could not read uploaded file: {0}")]
    Upload(#[from] DataError),
}

/// Dispatch to the view of the selected page.
///
/// Exactly one view runs per call.
pub fn route(ctx: &RenderContext, inputs: &ViewInputs<'_>) -> Result<ViewOutput, ViewError> {
    let page = ctx.page();

    let nodes = match page {
        Page::Home => home::build(ctx),
        Page::DataViz => {
            let sample = inputs.sample.ok_or(ViewError::MissingSampleData(page))?;
            visualization::build(ctx, sample)
        }
        Page::Demo => {
            let form = inputs.form.cloned().unwrap_or_default();
            demo::build(ctx, &form, inputs.upload)?
        }
        Page::About => about::build(ctx),
    };

    tracing::debug!(page = %page, nodes = nodes.len(), "Built view");

    Ok(ViewOutput { page, nodes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate, rng_for};
    use crate::nav::NavigationState;

    /// Header text that only the given page's view emits
    fn marker(page: Page) -> &'static str {
        match page {
            Page::Home => "Features",
            Page::DataViz => "Data Visualization Examples",
            Page::Demo => "Interactive Demo",
            Page::About => "About This Application",
        }
    }

    fn headers(output: &ViewOutput) -> Vec<String> {
        output
            .nodes
            .iter()
            .filter_map(|n| match n {
                ViewNode::Header { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_each_page_renders_only_its_own_view() {
        let sample = generate(2024, &mut rng_for(Some(1))).unwrap();
        let inputs = ViewInputs {
            sample: Some(&sample),
            ..Default::default()
        };

        for page in Page::all() {
            let ctx = RenderContext::new(NavigationState::new(*page));
            let output = route(&ctx, &inputs).unwrap();
            assert_eq!(output.page, *page);

            let headers = headers(&output);
            for other in Page::all() {
                let present = headers.iter().any(|h| h.contains(marker(*other)));
                assert_eq!(present, other == page, "page {:?}, marker of {:?}", page, other);
            }
        }
    }

    #[test]
    fn test_dataviz_without_sample_is_an_error() {
        let ctx = RenderContext::new(NavigationState::new(Page::DataViz));
        let err = route(&ctx, &ViewInputs::default()).unwrap_err();
        assert!(matches!(err, ViewError::MissingSampleData(Page::DataViz)));
    }

    #[test]
    fn test_output_serializes_with_node_types() {
        let ctx = RenderContext::new(NavigationState::new(Page::Home));
        let output = route(&ctx, &ViewInputs::default()).unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["page"], "home");
        assert_eq!(json["nodes"][0]["type"], "columns");
    }
}
