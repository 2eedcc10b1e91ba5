//! # dashkit
//!
//! A small multi-page data dashboard served over HTTP: a home page with
//! metric cards, charts over a generated daily sales series, an interactive
//! form and CSV upload demo, and an about page.
//!
//! ## Features
//!
//! - **Pure views**: every page is a function from an immutable
//!   [`RenderContext`] to a list of [`ViewNode`] instructions
//! - **Reproducible data**: the sample generator takes an injected RNG and an
//!   optional seed
//! - **Bounded caching**: sample tables are memoized per session in a FIFO
//!   [`SampleCache`]
//! - **No JavaScript needed**: pages are plain HTML with inline SVG charts
//!
//! ## Modules
//!
//! - [`nav`]: pages, themes and the render context
//! - [`view`]: page router and the four page views
//! - [`data`]: sample generator, cache and CSV summarizer
//! - [`form`]: demo form handling
//! - [`render`]: HTML and SVG output
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use dashkit::nav::{NavigationState, Page, RenderContext};
//! use dashkit::render::{render_page, PageBody};
//! use dashkit::view::{route, ViewInputs};
//!
//! let ctx = RenderContext::new(NavigationState::new(Page::About));
//! let output = route(&ctx, &ViewInputs::default()).unwrap();
//! let html = render_page(&ctx, PageBody::View(&output));
//!
//! assert!(html.contains("About This Application"));
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod form;
pub mod logging;
pub mod nav;
pub mod render;
pub mod view;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use data::{DataError, DataTable, SampleCache, SampleSeries, UploadSummary};
pub use form::FormSubmission;
pub use nav::{NavigationState, Page, RenderContext, Theme};
pub use view::{route, ViewError, ViewNode, ViewOutput};
