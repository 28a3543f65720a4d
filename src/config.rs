use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::http_client::{EnhancedHttpClient, HttpClientConfig, USER_AGENTS};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Catalog site every request is sent to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout for upstream requests in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Enable gzip/deflate response decoding
    #[serde(default = "default_true")]
    pub enable_gzip: bool,

    /// Desktop user agents to rotate through
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

fn default_true() -> bool { true }
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_base_url() -> String { "https://www.noor-book.com".to_string() }
fn default_user_agents() -> Vec<String> { USER_AGENTS.iter().map(|ua| ua.to_string()).collect() }

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            enable_gzip: true,
            user_agents: default_user_agents(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream: UpstreamConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, then apply `PORT`.
    pub fn load() -> Self {
        let mut cfg = Self::from_file(Path::new("config.toml"));
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            cfg.port = port;
        }
        cfg
    }

    /// Parse a config file, falling back to defaults when it is missing or invalid.
    pub fn from_file(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Ignoring invalid {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Upstream base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.upstream.base_url.trim_end_matches('/')
    }
}

impl HttpConfig {
    /// Create the upstream HTTP client from this configuration
    pub fn create_http_client(&self) -> Result<EnhancedHttpClient, reqwest::Error> {
        use std::time::Duration;

        let config = HttpClientConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            enable_gzip: self.enable_gzip,
            user_agents: self.user_agents.clone(),
        };

        EnhancedHttpClient::with_config(config)
    }
}
