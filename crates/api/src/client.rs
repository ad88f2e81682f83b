use chrono::Locale;
use quill_types::page::Page;
use tracing::{debug, error};

use super::{endpoint::Endpoint, error::Error, response};

/// Configuration for the client.
/// api_url: Base URL of the content repository, e.g. https://myblog.cdn.example/api/v2
/// page_size: Number of posts requested per page. (default: 100)
/// max_retries: The maximum number of retries for a request. (default: 2)
/// timeout_ms: Per-request timeout in milliseconds. (default: 30000)
/// locale: Locale used for display dates. (default: pt_BR)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub page_size: Option<u32>,
    pub max_retries: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub locale: Option<Locale>,
}

impl Config {
    const DEFAULT_PAGE_SIZE: u32 = 100;
    const DEFAULT_MAX_RETRIES: usize = 2;
    const DEFAULT_TIMEOUT_MS: u64 = 30_000;
    const DEFAULT_LOCALE: Locale = Locale::pt_BR;

    pub fn new(api_url: &str) -> Self {
        Config {
            api_url: api_url.to_string(),
            page_size: None,
            max_retries: None,
            timeout_ms: None,
            locale: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries.unwrap_or(Self::DEFAULT_MAX_RETRIES)
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(Self::DEFAULT_TIMEOUT_MS)
    }

    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or(Self::DEFAULT_LOCALE)
    }
}

/// A client for a Prismic-style content repository. Two operations cover the
/// blog home page: the build-time search for the first page of posts, and
/// plain GETs against the opaque cursor URLs that link the following pages.
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
    http: reqwest::Client,
}

impl Client {
    const FETCH_FIELDS: [&'static str; 3] = ["post.title", "post.content", "post.author"];

    pub fn new(cfg: Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms()))
            .build()?;
        Ok(Self { cfg, http })
    }

    pub fn locale(&self) -> Locale {
        self.cfg.locale()
    }

    async fn get(&self, endpoint: &Endpoint) -> Result<Page, Error> {
        let url = endpoint.url(&self.cfg.api_url);
        debug!("Sending request to {}", url);
        let resp = self.http.get(&url).send().await?;
        self.handle_response(endpoint, resp).await
    }

    pub async fn get_with_retry(&self, endpoint: &Endpoint) -> Result<Page, Error> {
        let mut retries: usize = 0;
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(retries as u64)).await;
            match self.get(endpoint).await {
                Ok(page) => return Ok(page),
                Err(e) => {
                    if let Error::StatusCode(ref code) = e {
                        if code == "404" {
                            return Err(e);
                        }
                    }
                    retries += 1;
                    if retries > self.cfg.max_retries() {
                        return Err(e);
                    }
                    error!(
                        "Error getting {}: {}, retry {}/{}",
                        endpoint,
                        e,
                        retries,
                        self.cfg.max_retries(),
                    );
                }
            }
        }
    }

    async fn handle_response(
        &self,
        endpoint: &Endpoint,
        resp: reqwest::Response,
    ) -> Result<Page, Error> {
        match resp.status() {
            reqwest::StatusCode::OK => {
                debug!("request: {} status: OK", endpoint);
                response::parse_page(resp, self.locale()).await
            }
            status => {
                error!("request: {} status: {}", endpoint, status);
                Err(Error::StatusCode(status.as_u16().to_string()))
            }
        }
    }

    /// Build-time query: the first page of `post` documents with the fields
    /// the home page renders.
    pub async fn front_page(&self) -> Result<Page, Error> {
        self.get_with_retry(&Endpoint::posts(&Self::FETCH_FIELDS, self.cfg.page_size()))
            .await
    }

    /// Follow an opaque pagination cursor returned by a previous page.
    pub async fn follow_cursor(&self, cursor: &str) -> Result<Page, Error> {
        self.get_with_retry(&Endpoint::Cursor(cursor.to_string()))
            .await
    }
}
