//! Home page: headline metrics and a feature overview

use super::ViewNode;
use crate::nav::RenderContext;

const METRICS: [(&str, &str, &str); 3] = [
    ("Total Users", "1,234", "+12%"),
    ("Revenue", "$45,678", "-2.3%"),
    ("Performance", "98.5%", "+5.1%"),
];

const FEATURES_LEFT: [(&str, &str); 2] = [
    (
        "📊 Data Visualization",
        "Create beautiful and interactive charts from plain chart specs.",
    ),
    (
        "🔧 Easy Configuration",
        "Simple setup and configuration for quick deployment.",
    ),
];

const FEATURES_RIGHT: [(&str, &str); 2] = [
    (
        "🎨 Customizable UI",
        "Flexible layout options and custom styling capabilities.",
    ),
    (
        "⚡ Real-time Updates",
        "Every interaction re-renders the page from fresh control values.",
    ),
];

const SNIPPET: &str = r#"
// Example: creating metrics
ViewNode::columns(vec![
    vec![ViewNode::metric("Total Users", "1,234", "+12%")],
    vec![ViewNode::metric("Revenue", "$45,678", "-2.3%")],
    vec![ViewNode::metric("Performance", "98.5%", "+5.1%")],
])
"#;

pub fn build(ctx: &RenderContext) -> Vec<ViewNode> {
    let mut nodes = vec![
        ViewNode::columns(
            METRICS
                .iter()
                .map(|(label, value, delta)| vec![ViewNode::metric(*label, *value, *delta)])
                .collect(),
        ),
        ViewNode::Divider,
        ViewNode::header("Features"),
        ViewNode::columns(vec![feature_column(&FEATURES_LEFT), feature_column(&FEATURES_RIGHT)]),
    ];

    if ctx.nav.show_code {
        nodes.push(ViewNode::code("rust", SNIPPET));
    }

    nodes
}

fn feature_column(features: &[(&str, &str)]) -> Vec<ViewNode> {
    features
        .iter()
        .flat_map(|(title, blurb)| [ViewNode::subheader(*title), ViewNode::text(*blurb)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavigationState, Page};

    #[test]
    fn test_three_metric_cards() {
        let nodes = build(&RenderContext::new(NavigationState::new(Page::Home)));
        let ViewNode::Columns { columns, weights } = &nodes[0] else {
            panic!("first node should be the metric row");
        };
        assert_eq!(weights, &vec![1, 1, 1]);
        assert_eq!(
            columns[1][0],
            ViewNode::metric("Revenue", "$45,678", "-2.3%")
        );
    }

    #[test]
    fn test_code_snippet_follows_toggle() {
        let hidden = build(&RenderContext::new(NavigationState::new(Page::Home)));
        assert!(!hidden.iter().any(|n| matches!(n, ViewNode::Code { .. })));

        let shown = build(&RenderContext::new(
            NavigationState::new(Page::Home).show_code(true),
        ));
        assert!(matches!(shown.last(), Some(ViewNode::Code { language, .. }) if language == "rust"));
    }
}
