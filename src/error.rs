//! Error types for the fetch layer and the HTTP surface.
//!
//! `FetchError` keeps the detail of what went wrong talking to the upstream
//! site so it can be logged. `ApiError` is what handlers return; it renders
//! itself as the `{success: false, error}` envelope.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients when the upstream page could not be fetched.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch data";

/// Message returned when the search probe is called without a search term
/// ("please enter a search term").
pub const MISSING_QUERY_MESSAGE: &str = "يرجى إدخال كلمة البحث";

/// Failures talking to the upstream catalog site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target could not be turned into a URL.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network-level failure (DNS, connect, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Anything that went wrong fetching the upstream page.
    #[error("{}", UPSTREAM_FAILURE_MESSAGE)]
    UpstreamFetch,

    /// A required query parameter was absent or blank.
    #[error("{0}")]
    MissingInput(&'static str),

    /// Unexpected fault while walking the parsed markup.
    #[error("{0}")]
    Extraction(String),

    /// A slug, id or configured base URL that cannot form an upstream URL.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl { url, .. } => ApiError::InvalidUrl(url),
            _ => ApiError::UpstreamFetch,
        }
    }
}

/// Failure envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.to_string(),
        })
    }
}
