//! About page: what the template contains and where to go next

use super::{Span, ViewNode};
use crate::nav::RenderContext;

const FEATURES: [(&str, &str); 7] = [
    ("Multiple pages", " with sidebar navigation"),
    ("Data visualization", " examples rendered as SVG charts"),
    ("Interactive widgets", " and forms"),
    ("Custom styling", " with light and dark themes"),
    ("Caching", " of generated sample data"),
    ("File upload", " functionality"),
    ("Responsive layout", " with columns"),
];

const TECH_STACK: [(&str, &str); 4] = [
    ("axum", " - HTTP server and routing"),
    ("serde", " - view instructions as JSON"),
    ("csv", " - upload parsing and data export"),
    ("rand", " - seedable sample data"),
];

const RESOURCES: [(&str, &str); 3] = [
    ("axum Documentation", "https://docs.rs/axum"),
    ("Rust Book", "https://doc.rust-lang.org/book/"),
    ("crates.io", "https://crates.io"),
];

pub fn build(ctx: &RenderContext) -> Vec<ViewNode> {
    vec![
        ViewNode::header("ℹ️ About This Application"),
        ViewNode::subheader(format!("Welcome to {}!", ctx.title)),
        ViewNode::text(
            "This application serves as a starting template for your dashboard projects. \
             It includes common patterns and components that you might need:",
        ),
        bold_list(&FEATURES),
        ViewNode::subheader("Getting Started"),
        ViewNode::List {
            ordered: true,
            items: vec![
                vec![Span::plain("Clone this repository")],
                vec![Span::plain("Build it: "), Span::code("cargo build --release")],
                vec![Span::plain("Run the app: "), Span::code("cargo run --bin dashkit")],
                vec![Span::plain("Start customizing for your needs!")],
            ],
        },
        ViewNode::subheader("Tech Stack"),
        bold_list(&TECH_STACK),
        ViewNode::subheader("Resources"),
        ViewNode::List {
            ordered: false,
            items: RESOURCES
                .iter()
                .map(|(label, url)| vec![Span::link(*label, *url)])
                .collect(),
        },
        ViewNode::Expander {
            label: "🎈 Fun Fact".to_string(),
            content: vec![ViewNode::text("You found the hidden balloons! 🎉")],
        },
    ]
}

fn bold_list(entries: &[(&str, &str)]) -> ViewNode {
    ViewNode::List {
        ordered: false,
        items: entries
            .iter()
            .map(|(strong, rest)| vec![Span::strong(*strong), Span::plain(*rest)])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavigationState, Page};

    #[test]
    fn test_expander_holds_fun_fact() {
        let nodes = build(&RenderContext::new(NavigationState::new(Page::About)));
        let Some(ViewNode::Expander { label, content }) = nodes.last() else {
            panic!("about page should end with the expander");
        };
        assert!(label.contains("Fun Fact"));
        assert_eq!(content.len(), 1);
    }

    #[test]
    fn test_welcome_uses_title() {
        let mut ctx = RenderContext::new(NavigationState::new(Page::About));
        ctx.title = "Sales Board".to_string();
        let nodes = build(&ctx);
        assert_eq!(nodes[1], ViewNode::subheader("Welcome to Sales Board!"));
    }
}
