//! HTTP handlers. Each one pulls its parameters out of the request and hands
//! off to [`Catalog`](crate::catalog::Catalog); errors render through
//! [`ApiError`]'s `ResponseError` impl.

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::app_state::AppState;
use crate::catalog::Listing;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Requested page; absent, non-numeric or zero means page 1.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }
}

#[derive(Debug, Deserialize)]
pub struct ProbeQuery {
    query: Option<String>,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Noor Book API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "search": "/api/search/:query",
            "categories": "/api/categories",
            "categoryBooks": "/api/category/:slug",
            "tagBooks": "/api/tag/:slug",
            "newReleases": "/api/new-releases",
            "popular": "/api/popular",
            "latest": "/api/latest",
            "book": "/api/book/:id"
        },
        "note": "All list endpoints support ?page=N for pagination"
    }))
}

#[get("/api/search")]
async fn search_probe(
    data: web::Data<AppState>,
    query: web::Query<ProbeQuery>,
) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.probe(query.query.as_deref()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/search/{query}")]
async fn search(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.search(&path, query.page()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/categories")]
async fn categories(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.categories().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/category/{slug}")]
async fn category_books(
    data: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.category_books(&slug, query.page()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/tag/{slug}")]
async fn tag_books(
    data: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.tag_books(&slug, query.page()).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn listing(
    data: &AppState,
    listing: Listing,
    query: &PageQuery,
) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.listing(listing, query.page()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/new-releases")]
async fn new_releases(
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    listing(&data, Listing::NewReleases, &query).await
}

#[get("/api/popular")]
async fn popular(
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    listing(&data, Listing::Popular, &query).await
}

#[get("/api/latest")]
async fn latest(
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    listing(&data, Listing::Latest, &query).await
}

#[get("/api/book/{id}")]
async fn book(data: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let response = data.catalog.book(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Register every route; shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(search_probe)
        .service(search)
        .service(categories)
        .service(category_books)
        .service(tag_books)
        .service(new_releases)
        .service(popular)
        .service(latest)
        .service(book);
}
