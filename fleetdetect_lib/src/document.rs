//! Thin wrapper over `scraper` for querying a parsed vehicle page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ConfigError;
use crate::error::StructuralParseError;

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw markup into a tree.
    ///
    /// The HTML parser recovers from almost anything, so the only rejected
    /// inputs are empty markup and text without a single tag.
    pub fn parse(markup: &str) -> Result<Self, StructuralParseError> {
        if markup.trim().is_empty() {
            return Err(StructuralParseError::new("document is empty"));
        }
        if !markup.contains('<') {
            return Err(StructuralParseError::new("document contains no markup"));
        }
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::debug!("Recovered from {} HTML parse errors", html.errors.len());
        }
        Ok(Self { html })
    }

    /// First element matching `selector`, in document order.
    pub fn region(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(selector)
    }

    /// First text node anywhere in the document matching `pattern`, normalised.
    pub fn find_text(&self, pattern: &Regex) -> Option<String> {
        self.html
            .root_element()
            .text()
            .find(|t| pattern.is_match(t))
            .map(collapse_whitespace)
            .filter(|t| !t.is_empty())
    }
}

/// Text of a single cell: text nodes concatenated, whitespace collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Text of a whole region: text nodes joined by spaces so neighbouring
/// elements do not run together, then collapsed.
pub fn region_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn compile_selector(name: &'static str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
        name,
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

pub(crate) fn compile_pattern(name: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        name,
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
