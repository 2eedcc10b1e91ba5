//! HTML and SVG rendering of view instructions

pub mod html;
pub mod svg;

pub use html::{escape, render_page, PageBody};
pub use svg::render_chart;
