//! List extraction: turn repeated item fragments into flat records.
//!
//! A [`FieldMap`] describes how each output field is read from a fragment
//! (text of a sub-element, or one of its attributes) and which field must be
//! non-empty for the record to be kept. The same walk serves books and
//! categories; only the table differs.

use scraper::Selector;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::document::{Document, Fragment};
use crate::models::{BookSummary, Category};
use crate::selectors;

/// Where a field's value comes from inside a fragment.
#[derive(Debug, Clone, Copy)]
pub enum FieldSource {
    /// Trimmed text of the first matching descendant
    Text,
    /// Named attribute of the first matching descendant
    Attr(&'static str),
}

#[derive(Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub selector: &'static LazyLock<Selector>,
    pub source: FieldSource,
}

impl FieldRule {
    pub const fn text(field: &'static str, selector: &'static LazyLock<Selector>) -> Self {
        Self {
            field,
            selector,
            source: FieldSource::Text,
        }
    }

    pub const fn attr(
        field: &'static str,
        selector: &'static LazyLock<Selector>,
        name: &'static str,
    ) -> Self {
        Self {
            field,
            selector,
            source: FieldSource::Attr(name),
        }
    }
}

#[derive(Debug)]
pub struct FieldMap {
    /// Records whose value for this field is empty are skipped.
    pub required: &'static str,
    pub rules: &'static [FieldRule],
}

/// Values pulled out of one fragment, keyed by field name.
#[derive(Debug, Default)]
pub struct FieldRow {
    pub id: String,
    values: HashMap<&'static str, String>,
}

impl FieldRow {
    /// Text value, empty when the field was absent.
    pub fn text(&mut self, field: &str) -> String {
        self.values.remove(field).unwrap_or_default()
    }

    /// Attribute value, `None` when the attribute (or its element) was absent.
    pub fn attr(&mut self, field: &str) -> Option<String> {
        self.values.remove(field)
    }

    fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

/// A record type the list extractor can build.
pub trait ListRecord: Sized {
    fn field_map() -> &'static FieldMap;
    fn from_row(row: FieldRow) -> Self;
}

/// Last non-empty `/` segment of a link, or an empty string.
pub fn id_from_href(href: Option<&str>) -> String {
    href.and_then(|h| h.split('/').filter(|s| !s.is_empty()).last())
        .unwrap_or("")
        .to_string()
}

fn read_row(fragment: Fragment<'_>, map: &FieldMap) -> FieldRow {
    let mut row = FieldRow {
        id: id_from_href(fragment.first_attr(&selectors::LINK, "href").as_deref()),
        values: HashMap::with_capacity(map.rules.len()),
    };
    for rule in map.rules {
        let value = match rule.source {
            FieldSource::Text => Some(fragment.first_text(rule.selector)),
            FieldSource::Attr(name) => fragment.first_attr(rule.selector, name),
        };
        if let Some(value) = value {
            row.values.insert(rule.field, value);
        }
    }
    row
}

/// Rows for every fragment matching `item`, in document order, skipping
/// those whose required field is empty.
pub fn extract_rows(doc: &Document, item: &Selector, map: &FieldMap) -> Vec<FieldRow> {
    doc.select(item)
        .map(|fragment| read_row(fragment, map))
        .filter(|row| !row.get(map.required).trim().is_empty())
        .collect()
}

pub fn extract_list<R: ListRecord>(doc: &Document, item: &Selector) -> Vec<R> {
    extract_rows(doc, item, R::field_map())
        .into_iter()
        .map(R::from_row)
        .collect()
}

static BOOK_FIELDS: FieldMap = FieldMap {
    required: "title",
    rules: &[
        FieldRule::text("title", &selectors::book::TITLE),
        FieldRule::text("author", &selectors::book::AUTHOR),
        FieldRule::attr("cover", &selectors::IMAGE, "src"),
        FieldRule::attr("url", &selectors::LINK, "href"),
        FieldRule::text("description", &selectors::book::DESCRIPTION),
        FieldRule::text("rating", &selectors::book::RATING),
        FieldRule::text("pages", &selectors::book::PAGES),
        FieldRule::text("size", &selectors::book::SIZE),
        FieldRule::text("format", &selectors::book::FORMAT),
    ],
};

static CATEGORY_FIELDS: FieldMap = FieldMap {
    required: "name",
    rules: &[
        FieldRule::text("name", &selectors::category::NAME),
        FieldRule::attr("url", &selectors::LINK, "href"),
        FieldRule::text("count", &selectors::category::COUNT),
        FieldRule::attr("icon", &selectors::IMAGE, "src"),
    ],
};

impl ListRecord for BookSummary {
    fn field_map() -> &'static FieldMap {
        &BOOK_FIELDS
    }

    fn from_row(mut row: FieldRow) -> Self {
        BookSummary {
            title: row.text("title"),
            author: row.text("author"),
            cover: row.attr("cover"),
            url: row.attr("url"),
            description: row.text("description"),
            rating: row.text("rating"),
            pages: row.text("pages"),
            size: row.text("size"),
            format: row.text("format"),
            id: row.id,
        }
    }
}

impl ListRecord for Category {
    fn field_map() -> &'static FieldMap {
        &CATEGORY_FIELDS
    }

    fn from_row(mut row: FieldRow) -> Self {
        Category {
            name: row.text("name"),
            url: row.attr("url"),
            count: row.text("count"),
            icon: row.attr("icon"),
            id: row.id,
        }
    }
}
