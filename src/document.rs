//! Thin wrapper over `scraper::Html` exposing the handful of queries the
//! extractors need. Parsing is html5ever's lenient tree builder, so broken
//! or partial markup still produces a document.

use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = Fragment<'a>> + 'a {
        self.html.select(selector).map(Fragment)
    }

    pub fn first(&self, selector: &Selector) -> Option<Fragment<'_>> {
        self.html.select(selector).next().map(Fragment)
    }

    /// Trimmed text of the first match, empty when nothing matches.
    pub fn first_text(&self, selector: &Selector) -> String {
        self.first(selector).map(|f| f.text()).unwrap_or_default()
    }

    pub fn first_attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.first(selector).and_then(|f| f.attr(name))
    }
}

/// One element of a parsed [`Document`].
#[derive(Clone, Copy)]
pub struct Fragment<'a>(ElementRef<'a>);

impl<'a> Fragment<'a> {
    /// Text content of the whole subtree, trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    /// First descendant matching `selector`.
    pub fn first(&self, selector: &Selector) -> Option<Fragment<'a>> {
        self.0.select(selector).next().map(Fragment)
    }

    pub fn first_text(&self, selector: &Selector) -> String {
        self.first(selector).map(|f| f.text()).unwrap_or_default()
    }

    pub fn first_attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.first(selector).and_then(|f| f.attr(name))
    }
}
