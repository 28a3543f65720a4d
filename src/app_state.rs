//! Application state for the Actix-web server
//!
//! Wrapped in `web::Data` and shared by every handler. It holds only
//! immutable values: the catalog pipeline (fetcher + upstream base URL).
//! Nothing written by one request is ever read by another.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::http_client::PageSource;

pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(source: Arc<dyn PageSource>, base_url: &str) -> Self {
        Self {
            catalog: Catalog::new(source, base_url),
        }
    }
}
