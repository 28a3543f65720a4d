//! Single book page extraction.

use scraper::Selector;
use std::collections::BTreeMap;

use crate::document::Document;
use crate::extract::extract_list;
use crate::models::{Author, BookDetail, DownloadLink, NamedLink};
use crate::selectors::{self, detail};

/// Split a details row such as `"Publisher: Dar Al Ilm"` into label and value.
///
/// Splits on the first `:` only; the rest is kept verbatim, so
/// `"Time: 10:30"` gives `("Time", "10:30")` and `"10:30:00"` gives
/// `("10", "30:00")`. Rows without a colon yield `None`.
pub fn split_detail_row(text: &str) -> Option<(String, String)> {
    let (key, value) = text.trim().split_once(':')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

fn links<'a>(
    doc: &'a Document,
    selector: &'a Selector,
) -> impl Iterator<Item = (String, Option<String>)> + 'a {
    // No filtering: empty anchors are kept so positions match the page.
    doc.select(selector).map(|a| (a.text(), a.attr("href")))
}

pub fn extract_detail(doc: &Document, id: &str) -> BookDetail {
    let mut details = BTreeMap::new();
    for row in doc.select(&detail::DETAIL_ROW) {
        if let Some((key, value)) = split_detail_row(&row.text()) {
            details.insert(key, value);
        }
    }

    BookDetail {
        id: id.to_string(),
        title: doc.first_text(&detail::TITLE),
        author: Author {
            name: doc.first_text(&detail::AUTHOR_LINK),
            url: doc.first_attr(&detail::AUTHOR_LINK, "href"),
        },
        cover: doc.first_attr(&detail::COVER, "src"),
        description: doc.first_text(&detail::DESCRIPTION),
        details,
        categories: links(doc, &detail::CATEGORY_LINK)
            .map(|(name, url)| NamedLink { name, url })
            .collect(),
        tags: links(doc, &detail::TAG_LINK)
            .map(|(name, url)| NamedLink { name, url })
            .collect(),
        download_links: links(doc, &detail::DOWNLOAD_LINK)
            .map(|(format, url)| DownloadLink { format, url })
            .collect(),
        related_books: extract_list(doc, &selectors::book::RELATED_ITEM),
    }
}
