use crate::error::SummaryError;
use crate::filter::TargetFilterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding the client base URL
pub const BASE_URL_ENV: &str = "SUMMARY_BASE_URL";

/// Environment variable overriding the gateway listen address
pub const LISTEN_ADDR_ENV: &str = "SUMMARY_LISTEN_ADDR";

/// How the submitted URL is placed into the request query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryEncoding {
    /// Percent-encode the value as a query parameter
    #[default]
    Encoded,
    /// Append the value verbatim; reserved characters like `&` and `#` leak into the URL
    Raw,
}

/// Configuration for the summary request client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the summary API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the summary endpoint
    #[serde(default = "default_summary_path")]
    pub summary_path: String,

    /// Name of the query parameter carrying the page URL
    #[serde(default = "default_query_param")]
    pub query_param: String,

    #[serde(default)]
    pub query_encoding: QueryEncoding,

    /// Request timeout in seconds (none by default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Configuration for the summary gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Timeout in seconds for fetching target pages
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User agent sent when fetching target pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Rules for which targets may be fetched
    #[serde(default)]
    pub filter: TargetFilterConfig,
}

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_summary_path() -> String {
    "/v1/summary".to_string()
}

fn default_query_param() -> String {
    "url".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:4000".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("page-summary/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            summary_path: default_summary_path(),
            query_param: default_query_param(),
            query_encoding: QueryEncoding::default(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the query encoding
    pub fn with_query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.query_encoding = encoding;
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            filter: TargetFilterConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Override the listen address
    pub fn with_listen_addr(mut self, listen_addr: impl Into<String>) -> Self {
        self.listen_addr = listen_addr.into();
        self
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SummaryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SummaryError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SummaryError> {
        serde_json::from_str(json).map_err(|e| SummaryError::Config(e.to_string()))
    }

    /// Apply overrides from environment variables
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(LISTEN_ADDR_ENV).ok(),
        )
    }

    fn apply_overrides(mut self, base_url: Option<String>, listen_addr: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|v| !v.is_empty()) {
            ::log::debug!("Using base URL from {}: {}", BASE_URL_ENV, base_url);
            self.client.base_url = base_url;
        }
        if let Some(listen_addr) = listen_addr.filter(|v| !v.is_empty()) {
            ::log::debug!("Using listen address from {}: {}", LISTEN_ADDR_ENV, listen_addr);
            self.gateway.listen_addr = listen_addr;
        }
        self
    }
}
