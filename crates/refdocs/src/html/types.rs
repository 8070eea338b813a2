//! HTML generation types
//!
//! Supporting types for HTML rendering.

use serde::{Deserialize, Serialize};

/// Configuration for HTML rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// Wrap each fragment in a complete HTML document
    pub standalone: bool,
    /// Stylesheet linked from standalone pages
    pub stylesheet: Option<String>,
}

impl HtmlConfig {
    /// Configuration for complete, directly viewable pages
    pub fn standalone() -> Self {
        Self {
            standalone: true,
            stylesheet: None,
        }
    }

    /// Link a stylesheet from standalone pages
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Some(href.into());
        self
    }
}

/// Template context for the standalone page wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    /// Page title
    pub title: String,
    /// Stylesheet href
    pub stylesheet: Option<&'a str>,
    /// Rendered entry fragment
    pub body: &'a str,
    /// Generator name and version
    pub generator: String,
}
