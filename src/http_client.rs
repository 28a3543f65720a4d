use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Url};
use std::time::Duration;

use crate::error::FetchError;

/// Desktop user agents to rotate through to avoid bot detection
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
const ACCEPT_ENCODING: &str = "gzip, deflate";

/// Picks an index into a user-agent pool of the given (non-zero) length.
pub type UserAgentPicker = fn(usize) -> usize;

/// Uniform random pick, a fresh draw per request
pub fn random_pick(len: usize) -> usize {
    rand::thread_rng().gen_range(0..len)
}

/// Configuration for the upstream HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// `None` keeps reqwest's default (no overall timeout)
    pub timeout: Option<Duration>,
    pub enable_gzip: bool,
    pub user_agents: Vec<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            enable_gzip: true,
            user_agents: USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

/// Something that can turn a URL into page markup.
///
/// The reqwest-backed [`EnhancedHttpClient`] is the production transport;
/// tests plug in fixture-serving implementations.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError>;
}

/// Appends `page=<n>` to `base_url`, keeping any query it already has.
pub fn with_page_param(base_url: &str, page: u32) -> Result<Url, FetchError> {
    let mut url = parse_url(base_url)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url)
}

pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Fetch one listing/detail page: `base_url?page=<page>`.
///
/// Failures are logged here and handed back as-is; nothing is retried.
pub async fn fetch_page(
    source: &dyn PageSource,
    base_url: &str,
    page: u32,
) -> Result<String, FetchError> {
    let url = with_page_param(base_url, page)?;
    log::debug!("Fetching {}", url);
    match source.get_text(&url).await {
        Ok(markup) => Ok(markup),
        Err(e) => {
            log::error!("Error fetching page: {}", e);
            Err(e)
        }
    }
}

/// HTTP client that presents itself as an ordinary desktop browser
pub struct EnhancedHttpClient {
    client: Client,
    user_agents: Vec<String>,
    pick: UserAgentPicker,
}

impl EnhancedHttpClient {
    /// Create a new enhanced HTTP client with default configuration
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new enhanced HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Self::with_picker(config, random_pick)
    }

    /// Same as [`with_config`](Self::with_config) but with a caller-chosen
    /// user-agent selection, so outgoing headers are predictable in tests.
    pub fn with_picker(
        config: HttpClientConfig,
        pick: UserAgentPicker,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = ClientBuilder::new()
            .gzip(config.enable_gzip)
            .deflate(config.enable_gzip)
            .default_headers(Self::browser_headers(config.enable_gzip));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let user_agents = if config.user_agents.is_empty() {
            USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
        } else {
            config.user_agents
        };

        Ok(Self {
            client: builder.build()?,
            user_agents,
            pick,
        })
    }

    /// Headers that mimic a real browser; User-Agent is set per request.
    ///
    /// Compression is only advertised when the client can decode it.
    fn browser_headers(enable_gzip: bool) -> HeaderMap {
        let accept_encoding = if enable_gzip { ACCEPT_ENCODING } else { "identity" };
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static(ACCEPT));
        headers.insert("Accept-Language", HeaderValue::from_static(ACCEPT_LANGUAGE));
        headers.insert("Accept-Encoding", HeaderValue::from_static(accept_encoding));
        headers.insert("Connection", HeaderValue::from_static("keep-alive"));
        headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
        headers
    }

    /// Get a user agent from the pool
    fn user_agent(&self) -> &str {
        let index = (self.pick)(self.user_agents.len()) % self.user_agents.len();
        &self.user_agents[index]
    }
}

#[async_trait]
impl PageSource for EnhancedHttpClient {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", self.user_agent())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }
}
