//! CSS selectors for Noor Book pages.
//!
//! Every selector the extractors use lives here; when the site changes its
//! markup this is the file to update.

use scraper::Selector;
use std::sync::LazyLock;

fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector {selector:?}: {e:?}"))
}

/// First link inside a fragment; its href carries the record id.
pub static LINK: LazyLock<Selector> = LazyLock::new(|| css("a"));
pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| css("img"));

/// Listing pages (search, category, tag, new releases, popular, latest).
pub mod book {
    use super::*;

    pub static ITEM: LazyLock<Selector> = LazyLock::new(|| css(".book-item"));
    pub static RELATED_ITEM: LazyLock<Selector> = LazyLock::new(|| css(".related-book-item"));

    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| css(".book-title"));
    pub static AUTHOR: LazyLock<Selector> = LazyLock::new(|| css(".book-author"));
    pub static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css(".book-description"));
    pub static RATING: LazyLock<Selector> = LazyLock::new(|| css(".rating"));
    pub static PAGES: LazyLock<Selector> = LazyLock::new(|| css(".book-pages"));
    pub static SIZE: LazyLock<Selector> = LazyLock::new(|| css(".book-size"));
    pub static FORMAT: LazyLock<Selector> = LazyLock::new(|| css(".book-format"));
}

/// The categories index page.
pub mod category {
    use super::*;

    pub static ITEM: LazyLock<Selector> = LazyLock::new(|| css(".category-item"));
    pub static NAME: LazyLock<Selector> = LazyLock::new(|| css(".category-name"));
    pub static COUNT: LazyLock<Selector> = LazyLock::new(|| css(".book-count"));

    /// Header of a single category page.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| css(".category-title"));
    pub static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css(".category-description"));
}

/// A single book page.
pub mod detail {
    use super::*;

    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| css("h1.book-title"));
    pub static AUTHOR_LINK: LazyLock<Selector> = LazyLock::new(|| css(".book-author a"));
    pub static COVER: LazyLock<Selector> = LazyLock::new(|| css(".book-cover img"));
    pub static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css(".book-description"));
    pub static DETAIL_ROW: LazyLock<Selector> = LazyLock::new(|| css(".book-details li"));
    pub static CATEGORY_LINK: LazyLock<Selector> = LazyLock::new(|| css(".book-categories a"));
    pub static TAG_LINK: LazyLock<Selector> = LazyLock::new(|| css(".book-tags a"));
    pub static DOWNLOAD_LINK: LazyLock<Selector> = LazyLock::new(|| css(".download-links a"));
}

/// Page index entries, minus the next/previous arrows.
pub static PAGE_INDEX: LazyLock<Selector> = LazyLock::new(|| {
    css(".pagination .page-item:not(.next):not(.prev):not(.previous)")
});
