//! Navigation State
//!
//! The page selector and display preferences read from each request.
//! Everything here is rebuilt on every render pass and never persisted.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One of the four mutually exclusive screens. Serialized as its slug.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "data-visualization")]
    DataViz,
    #[serde(rename = "interactive-demo")]
    Demo,
    #[serde(rename = "about")]
    About,
}

impl Page {
    /// All pages in sidebar order
    pub fn all() -> &'static [Page] {
        &[Page::Home, Page::DataViz, Page::Demo, Page::About]
    }

    /// Label shown in the page selector
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DataViz => "Data Visualization",
            Page::Demo => "Interactive Demo",
            Page::About => "About",
        }
    }

    /// URL-safe identifier used in query strings and API paths
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::DataViz => "data-visualization",
            Page::Demo => "interactive-demo",
            Page::About => "about",
        }
    }

    /// Whether the view for this page reads the sample time series
    pub fn needs_sample_data(&self) -> bool {
        matches!(self, Page::DataViz)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Page {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::all()
            .iter()
            .copied()
            .find(|p| p.slug().eq_ignore_ascii_case(wanted) || p.label().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_lowercase().as_str() {
                "dataviz" | "data_viz" | "visualization" => Some(Page::DataViz),
                "demo" | "interactive_demo" => Some(Page::Demo),
                _ => None,
            })
            .ok_or_else(|| NavError::UnknownPage(s.to_string()))
    }
}

/// Color scheme choice from the settings panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(NavError::UnknownTheme(s.to_string())),
        }
    }
}

/// Errors raised while reading navigation parameters
#[derive(Debug, Error, PartialEq)]
pub enum NavError {
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Invalid boolean value: {0}")]
    InvalidFlag(String),
}

/// Selected page plus display preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub page: Page,
    pub theme: Theme,
    pub show_code: bool,
}

impl NavigationState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Builder method: set theme
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Builder method: set the show-code toggle
    pub fn show_code(mut self, show_code: bool) -> Self {
        self.show_code = show_code;
        self
    }

    /// Build from raw control values.
    ///
    /// Missing values fall back to Home, `default_theme` and `false`.
    pub fn from_params(
        page: Option<&str>,
        theme: Option<&str>,
        show_code: Option<&str>,
        default_theme: Theme,
    ) -> Result<Self, NavError> {
        let page = match page.filter(|p| !p.trim().is_empty()) {
            Some(p) => p.parse()?,
            None => Page::Home,
        };
        let theme = match theme.filter(|t| !t.trim().is_empty()) {
            Some(t) => t.parse()?,
            None => default_theme,
        };
        let show_code = match show_code {
            Some(v) => parse_flag(v)?,
            None => false,
        };

        Ok(Self {
            page,
            theme,
            show_code,
        })
    }

    /// Query string reproducing this state, with `page` overridden
    pub fn query_for(&self, page: Page) -> String {
        let mut query = format!("page={}&theme={}", page.slug(), self.theme);
        if self.show_code {
            query.push_str("&show_code=true");
        }
        query
    }
}

/// Parse an HTML/query-string boolean
pub fn parse_flag(value: &str) -> Result<bool, NavError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        _ => Err(NavError::InvalidFlag(value.to_string())),
    }
}

/// Everything a view may read during one render pass
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub nav: NavigationState,
    /// Application title shown in the page header
    pub title: String,
    /// Line under the title
    pub subtitle: String,
    /// External link in the footer
    pub repository_url: String,
}

impl RenderContext {
    pub fn new(nav: NavigationState) -> Self {
        Self {
            nav,
            title: "Dashkit Boilerplate Application".to_string(),
            subtitle: "A starting template for your dashboard projects".to_string(),
            repository_url: "https://github.com/dashkit/dashkit".to_string(),
        }
    }

    /// Build a context using the `[ui]` section of the config
    pub fn from_ui(nav: NavigationState, ui: &crate::config::UiConfig) -> Self {
        Self {
            nav,
            title: ui.title.clone(),
            subtitle: ui.subtitle.clone(),
            repository_url: ui.repository_url.clone(),
        }
    }

    pub fn page(&self) -> Page {
        self.nav.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parse_slugs_and_labels() {
        assert_eq!("home".parse::<Page>().unwrap(), Page::Home);
        assert_eq!("Data Visualization".parse::<Page>().unwrap(), Page::DataViz);
        assert_eq!("interactive-demo".parse::<Page>().unwrap(), Page::Demo);
        assert_eq!("ABOUT".parse::<Page>().unwrap(), Page::About);
        assert_eq!(
            "settings".parse::<Page>(),
            Err(NavError::UnknownPage("settings".to_string()))
        );
    }

    #[test]
    fn test_slug_roundtrip_for_every_page() {
        for page in Page::all() {
            assert_eq!(page.slug().parse::<Page>().unwrap(), *page);
        }
    }

    #[test]
    fn test_page_json_uses_slug() {
        for page in Page::all() {
            let json = serde_json::to_value(page).unwrap();
            assert_eq!(json, page.slug());
            let back: Page = serde_json::from_value(json).unwrap();
            assert_eq!(back, *page);
        }
        assert_eq!(
            serde_json::to_string(&Page::DataViz).unwrap(),
            "\"data-visualization\""
        );
    }

    #[test]
    fn test_from_params_defaults() {
        let nav = NavigationState::from_params(None, None, None, Theme::Dark).unwrap();
        assert_eq!(nav.page, Page::Home);
        assert_eq!(nav.theme, Theme::Dark);
        assert!(!nav.show_code);
    }

    #[test]
    fn test_from_params_checkbox_value() {
        let nav = NavigationState::from_params(Some("about"), Some("light"), Some("on"), Theme::Light)
            .unwrap();
        assert_eq!(nav.page, Page::About);
        assert!(nav.show_code);

        let err = NavigationState::from_params(None, None, Some("maybe"), Theme::Light);
        assert!(matches!(err, Err(NavError::InvalidFlag(_))));
    }

    #[test]
    fn test_query_for() {
        let nav = NavigationState::new(Page::Home).theme(Theme::Dark).show_code(true);
        assert_eq!(
            nav.query_for(Page::About),
            "page=about&theme=dark&show_code=true"
        );
    }
}
