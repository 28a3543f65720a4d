// Library interface for noor_book_api
// The binary and the integration tests both build on these modules

pub mod app_state;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod document;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod selectors;
