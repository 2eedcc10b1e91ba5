//! HTML page rendering
//!
//! Wraps view instructions in the page chrome (header, sidebar with
//! navigation and settings, footer) and renders every [`ViewNode`] as
//! plain HTML. Works without JavaScript: tabs are CSS radio groups, the
//! sidebar is a GET form and the demo widgets are ordinary HTML forms.

use super::svg::render_chart;
use crate::form::{FormSubmission, Interest, MAX_AGE, MIN_AGE};
use crate::nav::{NavigationState, Page, RenderContext, Theme};
use crate::view::{Span, Tab, ViewNode, ViewOutput};

/// Main content of a page
#[derive(Debug, Clone, Copy)]
pub enum PageBody<'a> {
    View(&'a ViewOutput),
    Error { title: &'a str, message: &'a str },
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete HTML document
pub fn render_page(ctx: &RenderContext, body: PageBody<'_>) -> String {
    let mut renderer = HtmlRenderer::new(ctx.nav);

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} · {}</title>\n<style>{}</style>\n</head>\n",
        escape(ctx.nav.page.label()),
        escape(&ctx.title),
        stylesheet(ctx.nav.theme)
    ));
    html.push_str(&format!(
        "<body class=\"theme-{}\">\n<div class=\"layout\">\n",
        ctx.nav.theme
    ));

    html.push_str(&sidebar(&ctx.nav));

    html.push_str("<main>\n");
    html.push_str(&format!(
        "<h1 class=\"main-header\">🚀 {}</h1>\n<p class=\"sub-header\">{}</p>\n",
        escape(&ctx.title),
        escape(&ctx.subtitle)
    ));

    match body {
        PageBody::View(output) => {
            for node in &output.nodes {
                renderer.node(node);
            }
        }
        PageBody::Error { title, message } => {
            renderer.out.push_str(&format!(
                "<div class=\"alert alert-error\" role=\"alert\"><strong>{}</strong><pre>{}</pre></div>\n",
                escape(title),
                escape(message)
            ));
        }
    }
    html.push_str(&renderer.out);

    html.push_str(&format!(
        "<hr>\n<footer>Made with ❤️ using Rust | <a href=\"{}\" target=\"_blank\" rel=\"noopener\">GitHub</a></footer>\n",
        escape(&ctx.repository_url)
    ));
    html.push_str("</main>\n</div>\n</body>\n</html>\n");
    html
}

fn sidebar(nav: &NavigationState) -> String {
    let mut html = String::from(
        "<aside class=\"sidebar\">\n<form method=\"get\" action=\"/\">\n<h2>Navigation</h2>\n<fieldset><legend>Select a page:</legend>\n",
    );

    for page in Page::all() {
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"page\" value=\"{}\"{}> {}</label>\n",
            page.slug(),
            checked(*page == nav.page),
            page.label()
        ));
    }
    html.push_str("</fieldset>\n<hr>\n<h3>Settings</h3>\n<label>Choose theme:\n<select name=\"theme\">\n");

    for theme in Theme::all() {
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            theme,
            if *theme == nav.theme { " selected" } else { "" },
            theme.label()
        ));
    }
    html.push_str(&format!(
        "</select></label>\n<label><input type=\"checkbox\" name=\"show_code\" value=\"true\"{}> Show code snippets</label>\n",
        checked(nav.show_code)
    ));
    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n</aside>\n");
    html
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

/// Hidden inputs that carry display preferences through POST forms
fn preference_inputs(nav: &NavigationState) -> String {
    format!(
        "<input type=\"hidden\" name=\"theme\" value=\"{}\"><input type=\"hidden\" name=\"show_code\" value=\"{}\">",
        nav.theme, nav.show_code
    )
}

struct HtmlRenderer {
    nav: NavigationState,
    out: String,
    /// Counter for unique tab group ids
    tab_groups: usize,
}

impl HtmlRenderer {
    fn new(nav: NavigationState) -> Self {
        Self {
            nav,
            out: String::new(),
            tab_groups: 0,
        }
    }

    fn node(&mut self, node: &ViewNode) {
        match node {
            ViewNode::Header { text } => {
                self.out.push_str(&format!("<h2>{}</h2>\n", escape(text)));
            }
            ViewNode::Subheader { text } => {
                self.out.push_str(&format!("<h3>{}</h3>\n", escape(text)));
            }
            ViewNode::Paragraph { spans } => {
                self.out.push_str(&format!("<p>{}</p>\n", spans_html(spans)));
            }
            ViewNode::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                self.out.push_str(&format!("<{}>\n", tag));
                for item in items {
                    self.out.push_str(&format!("<li>{}</li>\n", spans_html(item)));
                }
                self.out.push_str(&format!("</{}>\n", tag));
            }
            ViewNode::Field { label, value } => {
                self.out.push_str(&format!(
                    "<p class=\"field\"><strong>{}:</strong> {}</p>\n",
                    escape(label),
                    escape(value)
                ));
            }
            ViewNode::Metric {
                label,
                value,
                delta,
            } => {
                let direction = if delta.starts_with('-') { "down" } else { "up" };
                let arrow = if direction == "down" { "↓" } else { "↑" };
                self.out.push_str(&format!(
                    "<div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div><div class=\"metric-delta delta-{}\">{} {}</div></div>\n",
                    escape(label),
                    escape(value),
                    direction,
                    arrow,
                    escape(delta)
                ));
            }
            ViewNode::Columns { weights, columns } => {
                let template: Vec<String> = weights.iter().map(|w| format!("{}fr", w)).collect();
                self.out.push_str(&format!(
                    "<div class=\"columns\" style=\"grid-template-columns: {}\">\n",
                    template.join(" ")
                ));
                for column in columns {
                    self.out.push_str("<div class=\"column\">\n");
                    for child in column {
                        self.node(child);
                    }
                    self.out.push_str("</div>\n");
                }
                self.out.push_str("</div>\n");
            }
            ViewNode::Tabs { tabs } => self.tabs(tabs),
            ViewNode::Chart(chart) => {
                self.out.push_str(&format!(
                    "<figure class=\"chart-frame\">{}</figure>\n",
                    render_chart(chart)
                ));
            }
            ViewNode::Code { language, source } => {
                self.out.push_str(&format!(
                    "<pre class=\"code\"><code class=\"language-{}\">{}</code></pre>\n",
                    escape(language),
                    escape(source)
                ));
            }
            ViewNode::Table {
                columns,
                index,
                rows,
            } => {
                self.out.push_str("<table class=\"dataframe\">\n<thead><tr><th></th>");
                for column in columns {
                    self.out.push_str(&format!("<th>{}</th>", escape(column)));
                }
                self.out.push_str("</tr></thead>\n<tbody>\n");
                for (label, row) in index.iter().zip(rows) {
                    self.out.push_str(&format!("<tr><th>{}</th>", escape(label)));
                    for cell in row {
                        self.out.push_str(&format!("<td>{}</td>", escape(cell)));
                    }
                    self.out.push_str("</tr>\n");
                }
                self.out.push_str("</tbody>\n</table>\n");
            }
            ViewNode::Expander { label, content } => {
                self.out.push_str(&format!(
                    "<details class=\"expander\"><summary>{}</summary>\n",
                    escape(label)
                ));
                for child in content {
                    self.node(child);
                }
                self.out.push_str("</details>\n");
            }
            ViewNode::Form { action, values } => self.form(action, values),
            ViewNode::FileUpload {
                action,
                label,
                accept,
            } => {
                self.out.push_str(&format!(
                    "<form class=\"upload\" method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">{}\n<label>{}<input type=\"file\" name=\"file\" accept=\"{}\" required></label>\n<button type=\"submit\">Upload</button>\n</form>\n",
                    escape(action),
                    preference_inputs(&self.nav),
                    escape(label),
                    escape(accept)
                ));
            }
            ViewNode::Success { text } => {
                self.out.push_str(&format!(
                    "<div class=\"alert alert-success\" role=\"status\">{}</div>\n",
                    escape(text)
                ));
            }
            ViewNode::Divider => self.out.push_str("<hr>\n"),
        }
    }

    fn tabs(&mut self, tabs: &[Tab]) {
        let group = self.tab_groups;
        self.tab_groups += 1;

        self.out.push_str("<div class=\"tabs\">\n");
        for (idx, tab) in tabs.iter().enumerate() {
            let id = format!("tabs-{}-{}", group, idx);
            self.out.push_str(&format!(
                "<input type=\"radio\" name=\"tabs-{}\" id=\"{}\"{}><label for=\"{}\">{}</label>\n<div class=\"tab-panel\">\n",
                group,
                id,
                checked(idx == 0),
                id,
                escape(&tab.label)
            ));
            for child in &tab.content {
                self.node(child);
            }
            self.out.push_str("</div>\n");
        }
        self.out.push_str("</div>\n");
    }

    fn form(&mut self, action: &str, values: &FormSubmission) {
        self.out.push_str(&format!(
            "<form class=\"user-form\" method=\"post\" action=\"{}\">{}\n",
            escape(action),
            preference_inputs(&self.nav)
        ));
        self.out.push_str(&format!(
            "<label>Name<input type=\"text\" name=\"name\" value=\"{}\"></label>\n",
            escape(&values.name)
        ));
        self.out.push_str(&format!(
            "<label>Age <span class=\"slider-value\">{age}</span><input type=\"range\" name=\"age\" min=\"{min}\" max=\"{max}\" value=\"{age}\"></label>\n",
            age = values.age,
            min = MIN_AGE,
            max = MAX_AGE
        ));
        self.out.push_str(&format!(
            "<label>Email<input type=\"text\" name=\"email\" value=\"{}\"></label>\n",
            escape(&values.email)
        ));
        self.out.push_str("<label>Interests<select name=\"interests\" multiple>\n");
        for interest in Interest::all() {
            self.out.push_str(&format!(
                "<option value=\"{label}\"{selected}>{label}</option>\n",
                label = interest.label(),
                selected = if values.interests.contains(interest) {
                    " selected"
                } else {
                    ""
                }
            ));
        }
        self.out.push_str("</select></label>\n");
        self.out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"newsletter\" value=\"on\"{}> Subscribe to newsletter</label>\n",
            checked(values.newsletter)
        ));
        self.out.push_str(
            "<button type=\"submit\" name=\"submit\" value=\"Submit\">Submit</button>\n</form>\n",
        );
    }
}

fn spans_html(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => escape(text),
            Span::Strong(text) => format!("<strong>{}</strong>", escape(text)),
            Span::Code(text) => format!("<code>{}</code>", escape(text)),
            Span::Link { label, url } => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape(url),
                escape(label)
            ),
        })
        .collect()
}

fn stylesheet(theme: Theme) -> String {
    let (background, surface, text, muted, border) = match theme {
        Theme::Light => ("#ffffff", "#f0f2f6", "#262730", "#636363", "#e6e9ef"),
        Theme::Dark => ("#0e1117", "#262730", "#fafafa", "#a3a8b8", "#3d4150"),
    };

    format!(
        r#"
:root {{ --bg: {background}; --surface: {surface}; --text: {text}; --muted: {muted}; --border: {border}; }}
body {{ margin: 0; font-family: "Source Sans Pro", system-ui, sans-serif; background: var(--bg); color: var(--text); }}
.layout {{ display: grid; grid-template-columns: 260px 1fr; min-height: 100vh; }}
.sidebar {{ background: var(--surface); padding: 1.5rem; border-right: 1px solid var(--border); }}
.sidebar label {{ display: block; margin: 0.4rem 0; }}
.sidebar fieldset {{ border: none; padding: 0; }}
main {{ padding: 2rem 3rem; max-width: 1100px; }}
.main-header {{ font-size: 3rem; color: #1f77b4; text-align: center; margin-bottom: 2rem; }}
.sub-header {{ font-size: 1.5rem; color: var(--muted); text-align: center; margin-bottom: 3rem; }}
hr {{ border: none; border-top: 1px solid var(--border); margin: 2rem 0; }}
.columns {{ display: grid; gap: 2rem; }}
.metric-label {{ color: var(--muted); font-size: 0.9rem; }}
.metric-value {{ font-size: 2.2rem; }}
.delta-up {{ color: #09ab3b; }}
.delta-down {{ color: #ff2b2b; }}
.tabs {{ display: flex; flex-wrap: wrap; }}
.tabs > input {{ display: none; }}
.tabs > label {{ padding: 0.5rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }}
.tabs > input:checked + label {{ border-bottom-color: #ff4b4b; color: #ff4b4b; }}
.tabs > .tab-panel {{ order: 1; width: 100%; display: none; }}
.tabs > input:checked + label + .tab-panel {{ display: block; }}
.chart-frame {{ margin: 1rem 0; }}
.chart {{ width: 100%; height: auto; background: var(--bg); }}
.chart .grid {{ stroke: var(--border); }}
.chart text {{ fill: var(--muted); font-size: 12px; }}
.chart .chart-title {{ fill: var(--text); font-size: 16px; }}
.code {{ background: var(--surface); padding: 1rem; border-radius: 0.5rem; overflow-x: auto; }}
.dataframe {{ border-collapse: collapse; margin: 1rem 0; }}
.dataframe th, .dataframe td {{ border: 1px solid var(--border); padding: 0.3rem 0.7rem; text-align: right; }}
.user-form label, .upload label {{ display: block; margin: 0.6rem 0; }}
.user-form input[type=text], .user-form select {{ display: block; width: 100%; padding: 0.4rem; }}
.alert {{ padding: 0.8rem 1rem; border-radius: 0.5rem; margin: 1rem 0; }}
.alert-success {{ background: #d4edda; color: #155724; }}
.alert-error {{ background: #f8d7da; color: #721c24; }}
.expander {{ border: 1px solid var(--border); border-radius: 0.5rem; padding: 0.8rem 1rem; }}
footer {{ text-align: center; color: #888; }}
"#
    )
}
