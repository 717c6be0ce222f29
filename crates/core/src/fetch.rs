//! Live page fetching over HTTP.
//!
//! [`HttpSource`] is the [`DocumentSource`] used outside of tests. It turns a
//! [`PageRequest`] into a URL under [`FetchConfig::base_url`], performs a GET
//! and parses the body.

use std::time::Duration;

use reqwest::Client;
use tracing::info;
use url::Url;

use crate::parse::Document;
use crate::source::{DocumentSource, PageRequest};
use crate::{Result, TiebaError};

/// Root of the mobile site.
pub const DEFAULT_BASE_URL: &str = "http://tieba.baidu.com/mo/m";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Root URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; tiebafetch/0.1)".to_string(),
        }
    }
}

/// Fetches pages from the live site.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: FetchConfig,
}

impl HttpSource {
    /// Builds a source with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`TiebaError::InvalidUrl`] if the base URL does not parse and
    /// [`TiebaError::Http`] if the client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| TiebaError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// The URL `request` resolves to.
    pub fn url_for(&self, request: &PageRequest) -> Result<Url> {
        let base = format!("{}{}", self.config.base_url.trim_end_matches('/'), request.endpoint.path());
        Url::parse_with_params(&base, request.params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| TiebaError::InvalidUrl(e.to_string()))
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, request: &PageRequest) -> Result<Document> {
        let url = self.url_for(request)?;
        info!(%url, "requesting page");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                if e.is_timeout() { TiebaError::Timeout { timeout: self.config.timeout } } else { TiebaError::Http(e) }
            })?;

        let body = response.text().await?;
        Document::parse(&body)
    }
}
