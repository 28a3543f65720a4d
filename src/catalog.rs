//! Endpoint composition: fetch → parse → extract → paginate.
//!
//! Every resource goes through [`Catalog::run`]; the endpoints only differ
//! in the upstream URL they build and the extraction stage they hand it.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::detail::extract_detail;
use crate::document::Document;
use crate::error::{ApiError, MISSING_QUERY_MESSAGE};
use crate::extract::extract_list;
use crate::http_client::{fetch_page, parse_url, PageSource};
use crate::models::{
    BookListResponse, BookResponse, BookSummary, CategoriesResponse, Category, CategoryInfo,
    PageResult, ProbeResponse,
};
use crate::pagination::count_pages;
use crate::selectors;

/// How much upstream markup the search probe echoes back
pub const PROBE_PREVIEW_CHARS: usize = 500;

/// Plain book listings that take nothing but a page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    NewReleases,
    Popular,
    Latest,
}

impl Listing {
    pub fn path(self) -> &'static str {
        match self {
            Listing::NewReleases => "/en/new-releases",
            Listing::Popular => "/en/most-popular",
            Listing::Latest => "/en/latest",
        }
    }
}

pub struct Catalog {
    source: Arc<dyn PageSource>,
    base_url: String,
}

impl Catalog {
    pub fn new(source: Arc<dyn PageSource>, base_url: &str) -> Self {
        Self {
            source,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch `url` at `page` and run `stage` over the parsed document.
    ///
    /// A panic inside `stage` is turned into [`ApiError::Extraction`] so one
    /// bad page only fails its own request.
    async fn run<T>(
        &self,
        url: &str,
        page: u32,
        stage: impl FnOnce(&Document) -> T,
    ) -> Result<T, ApiError> {
        let markup = fetch_page(self.source.as_ref(), url, page).await?;

        catch_unwind(AssertUnwindSafe(|| {
            let doc = Document::parse(&markup);
            stage(&doc)
        }))
        .map_err(|payload| {
            let message = panic_message(payload.as_ref());
            log::warn!("Extraction failed for {}: {}", url, message);
            ApiError::Extraction(message)
        })
    }

    async fn book_page(&self, url: &str, page: u32) -> Result<PageResult<BookSummary>, ApiError> {
        self.run(url, page, |doc| {
            PageResult::new(page, count_pages(doc), extract_list(doc, &selectors::book::ITEM))
        })
        .await
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<BookListResponse, ApiError> {
        let url = format!("{}/en/search?term={}", self.base_url, urlencoding::encode(query));
        let mut response = BookListResponse::from(self.book_page(&url, page).await?);
        response.query = Some(query.to_string());
        Ok(response)
    }

    pub async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        let url = format!("{}/en/categories", self.base_url);
        let categories: Vec<Category> = self
            .run(&url, 1, |doc| extract_list(doc, &selectors::category::ITEM))
            .await?;
        Ok(CategoriesResponse {
            success: true,
            count: categories.len(),
            categories,
        })
    }

    pub async fn category_books(
        &self,
        slug: &str,
        page: u32,
    ) -> Result<BookListResponse, ApiError> {
        let url = format!("{}/en/category/{}", self.base_url, urlencoding::encode(slug));
        let (info, books) = self
            .run(&url, page, |doc| {
                let info = CategoryInfo {
                    name: doc.first_text(&selectors::category::TITLE),
                    description: doc.first_text(&selectors::category::DESCRIPTION),
                };
                let books = PageResult::new(
                    page,
                    count_pages(doc),
                    extract_list(doc, &selectors::book::ITEM),
                );
                (info, books)
            })
            .await?;
        let mut response = BookListResponse::from(books);
        response.category = Some(info);
        Ok(response)
    }

    pub async fn tag_books(&self, slug: &str, page: u32) -> Result<BookListResponse, ApiError> {
        let url = format!("{}/en/tag/{}", self.base_url, urlencoding::encode(slug));
        let mut response = BookListResponse::from(self.book_page(&url, page).await?);
        response.tag = Some(slug.to_string());
        Ok(response)
    }

    pub async fn listing(&self, listing: Listing, page: u32) -> Result<BookListResponse, ApiError> {
        let url = format!("{}{}", self.base_url, listing.path());
        Ok(BookListResponse::from(self.book_page(&url, page).await?))
    }

    pub async fn book(&self, id: &str) -> Result<BookResponse, ApiError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(id));
        let book = self.run(&url, 1, |doc| extract_detail(doc, id)).await?;
        Ok(BookResponse {
            success: true,
            book,
        })
    }

    /// Raw search probe: echoes the start of the upstream search page.
    ///
    /// A missing or blank query is rejected before any request goes out.
    pub async fn probe(&self, query: Option<&str>) -> Result<ProbeResponse, ApiError> {
        let query = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q,
            _ => return Err(ApiError::MissingInput(MISSING_QUERY_MESSAGE)),
        };

        let url = parse_url(&format!(
            "{}/site/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        ))?;
        let markup = self.source.get_text(&url).await.map_err(|e| {
            log::error!("Error fetching page: {}", e);
            ApiError::UpstreamFetch
        })?;

        Ok(ProbeResponse {
            success: true,
            query: query.to_string(),
            raw: markup.chars().take(PROBE_PREVIEW_CHARS).collect(),
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected error while extracting page".to_string()
    }
}
