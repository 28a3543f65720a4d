/// Route-level tests: the real handlers and extraction pipeline running
/// against canned upstream pages instead of the live site.
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use noor_book_api::app_state::AppState;
use noor_book_api::error::FetchError;
use noor_book_api::http_client::PageSource;
use noor_book_api::routes;
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const BASE_URL: &str = "https://www.noor-book.com";

const LISTING: &str = include_str!("fixtures/listing.html");
const CATEGORY: &str = include_str!("fixtures/category.html");
const CATEGORIES: &str = include_str!("fixtures/categories.html");
const BOOK: &str = include_str!("fixtures/book.html");

/// Serves fixtures by upstream path; `None` simulates an unreachable site.
struct FixtureSite {
    pages: Option<Vec<(&'static str, &'static str)>>,
    requested: Mutex<Vec<String>>,
}

impl FixtureSite {
    fn serving(pages: Vec<(&'static str, &'static str)>) -> Arc<Self> {
        Arc::new(Self {
            pages: Some(pages),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn down() -> Arc<Self> {
        Arc::new(Self {
            pages: None,
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FixtureSite {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let pages = self.pages.as_ref().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 503,
        })?;
        Ok(pages
            .iter()
            .find(|(path, _)| *path == url.path())
            .map(|(_, markup)| markup.to_string())
            .unwrap_or_default())
    }
}

async fn get_json(site: Arc<FixtureSite>, uri: &str) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new(site, BASE_URL)))
            .configure(routes::configure),
    )
    .await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_latest_listing() {
    let site = FixtureSite::serving(vec![("/en/latest", LISTING)]);
    let (status, body) = get_json(site.clone(), "/api/latest?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["count"], 2);
    assert_eq!(body["books"][0]["title"], "The Muqaddimah");
    assert_eq!(body["books"][1]["title"], "Kalila wa Dimna");
    assert_eq!(
        body["books"][0],
        json!({
            "id": "the-muqaddimah-pdf",
            "title": "The Muqaddimah",
            "author": "Ibn Khaldun",
            "cover": "https://cdn.noor-book.com/covers/muqaddimah.jpg",
            "url": "/en/book/the-muqaddimah-pdf",
            "description": "An introduction to history.",
            "rating": "4.8",
            "pages": "480",
            "size": "12 MB",
            "format": "PDF"
        })
    );
    assert_eq!(site.requested(), vec!["https://www.noor-book.com/en/latest?page=2"]);
}

#[actix_web::test]
async fn test_new_releases_and_popular_paths() {
    let site = FixtureSite::serving(vec![
        ("/en/new-releases", LISTING),
        ("/en/most-popular", LISTING),
    ]);
    let (status, body) = get_json(site.clone(), "/api/new-releases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["count"], 2);

    let (status, _) = get_json(site.clone(), "/api/popular?page=abc").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        site.requested(),
        vec![
            "https://www.noor-book.com/en/new-releases?page=1",
            "https://www.noor-book.com/en/most-popular?page=1",
        ]
    );
}

#[actix_web::test]
async fn test_search_echoes_query() {
    let site = FixtureSite::serving(vec![("/en/search", LISTING)]);
    let (status, body) = get_json(site.clone(), "/api/search/history%20books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "history books");
    assert_eq!(body["count"], 2);
    assert!(body.get("tag").is_none());
    assert_eq!(
        site.requested(),
        vec!["https://www.noor-book.com/en/search?term=history%20books&page=1"]
    );
}

#[actix_web::test]
async fn test_categories() {
    let site = FixtureSite::serving(vec![("/en/categories", CATEGORIES)]);
    let (status, body) = get_json(site, "/api/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "count": 2,
            "categories": [
                {
                    "id": "history",
                    "name": "History",
                    "url": "/en/category/history",
                    "count": "3,120",
                    "icon": "/icons/history.svg"
                },
                {
                    "id": "novels",
                    "name": "Novels",
                    "url": "/en/category/novels",
                    "count": "9,004"
                }
            ]
        })
    );
}

#[actix_web::test]
async fn test_category_books_include_heading() {
    let site = FixtureSite::serving(vec![("/en/category/history", CATEGORY)]);
    let (status, body) = get_json(site, "/api/category/history?page=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["category"],
        json!({"name": "History books", "description": "Books about the history of nations."})
    );
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["count"], 1);
}

#[actix_web::test]
async fn test_tag_books() {
    let site = FixtureSite::serving(vec![("/en/tag/poetry", LISTING)]);
    let (status, body) = get_json(site, "/api/tag/poetry?page=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tag"], "poetry");
    assert_eq!(body["page"], 3);
    assert!(body.get("query").is_none());
}

#[actix_web::test]
async fn test_book_detail() {
    let site = FixtureSite::serving(vec![("/the-muqaddimah-pdf", BOOK)]);
    let (status, body) = get_json(site.clone(), "/api/book/the-muqaddimah-pdf").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let book = &body["book"];
    assert_eq!(book["id"], "the-muqaddimah-pdf");
    assert_eq!(book["title"], "The Muqaddimah");
    assert_eq!(book["author"], json!({"name": "Ibn Khaldun", "url": "/en/author/ibn-khaldun"}));
    assert_eq!(
        book["details"],
        json!({
            "Language": "Arabic",
            "Published": "2020-01-01",
            "Publisher": "Dar Al Ilm",
            "Reading time": "10:30"
        })
    );
    assert_eq!(book["categories"], json!([{"name": "History", "url": "/en/category/history"}]));
    assert_eq!(book["tags"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        book["downloadLinks"],
        json!([{"format": "PDF", "url": "/download/the-muqaddimah.pdf"}])
    );
    assert_eq!(book["relatedBooks"][0]["id"], "kalila-wa-dimna-pdf");
    assert_eq!(
        site.requested(),
        vec!["https://www.noor-book.com/the-muqaddimah-pdf?page=1"]
    );
}

#[actix_web::test]
async fn test_upstream_failure_is_500_everywhere() {
    let uris = [
        "/api/search/history",
        "/api/categories",
        "/api/category/history",
        "/api/tag/poetry",
        "/api/new-releases",
        "/api/popular",
        "/api/latest",
        "/api/book/the-muqaddimah-pdf",
        "/api/search?query=history",
    ];
    for uri in uris {
        let (status, body) = get_json(FixtureSite::down(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(
            body,
            json!({"success": false, "error": "Failed to fetch data"}),
            "{uri}"
        );
    }
}

#[actix_web::test]
async fn test_probe_without_query_is_400_and_offline() {
    for uri in ["/api/search", "/api/search?query=", "/api/search?query=%20%20"] {
        let site = FixtureSite::serving(Vec::new());
        let (status, body) = get_json(site.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "يرجى إدخال كلمة البحث");
        assert!(site.requested().is_empty(), "{uri} must not reach upstream");
    }
}

#[actix_web::test]
async fn test_probe_returns_raw_preview() {
    let site = FixtureSite::serving(vec![("/site/search", LISTING)]);
    let (status, body) = get_json(site.clone(), "/api/search?query=history").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "history");
    let raw = body["raw"].as_str().unwrap();
    assert_eq!(raw.chars().count(), 500);
    assert!(raw.starts_with("<!DOCTYPE html>"));
    assert_eq!(site.requested(), vec!["https://www.noor-book.com/site/search?q=history"]);
}

#[actix_web::test]
async fn test_empty_upstream_page_is_empty_result() {
    let site = FixtureSite::serving(Vec::new());
    let (status, body) = get_json(site, "/api/latest").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["books"], json!([]));
}

#[actix_web::test]
async fn test_index_lists_endpoints() {
    let (status, body) = get_json(FixtureSite::down(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Noor Book API");
    assert_eq!(body["endpoints"]["latest"], "/api/latest");
}
