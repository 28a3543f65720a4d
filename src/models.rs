use serde::Serialize;
use std::collections::BTreeMap;

/// One book card from a listing page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    pub rating: String,
    pub pages: String,
    pub size: String,
    pub format: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub count: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Heading of a category page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct CategoryInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A category or tag link on a book page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NamedLink {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    pub id: String,
    pub title: String,
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub description: String,
    /// Free-text labels from the page; sorted so output is stable
    pub details: BTreeMap<String, String>,
    pub categories: Vec<NamedLink>,
    pub tags: Vec<NamedLink>,
    pub download_links: Vec<DownloadLink>,
    pub related_books: Vec<BookSummary>,
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(page: u32, total_pages: u32, items: Vec<T>) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages.max(1),
            items,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Success envelope for every book listing endpoint.
///
/// `query`, `category` and `tag` are only present on the endpoints that
/// carry them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    pub count: usize,
    pub books: Vec<BookSummary>,
}

impl From<PageResult<BookSummary>> for BookListResponse {
    fn from(result: PageResult<BookSummary>) -> Self {
        Self {
            success: true,
            query: None,
            category: None,
            tag: None,
            page: result.page,
            total_pages: result.total_pages,
            count: result.count(),
            books: result.items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub count: usize,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub success: bool,
    pub book: BookDetail,
}

/// Result of the raw search probe: the first characters of upstream markup.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub success: bool,
    pub query: String,
    pub raw: String,
}
