use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};

use crate::fetcher::{
    errors::FetchError,
    pipeline::decode_body,
    types::{LoadedPage, PageSource},
};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = concat!("LeapRead/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can turn a [`PageSource`] into page HTML.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, source: &PageSource) -> Result<LoadedPage, FetchError>;
}

/// Loads pages over HTTP or from disk.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static(
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    ),
                );
                headers
            })
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<LoadedPage, FetchError> {
        let parsed_url = url::Url::parse(url)?;

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Content-Length can be missing or wrong
        if body.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        let (html, encoding) = decode_body(&content_type, &body)?;
        debug!(
            final_url = %final_url,
            charset = encoding.name(),
            bytes = body.len(),
            "Fetched page"
        );

        Ok(LoadedPage {
            location: final_url,
            charset: encoding.name().to_string(),
            html,
            fetched_at: Utc::now(),
        })
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn read_file(&self, path: &std::path::Path) -> Result<LoadedPage, FetchError> {
        let body = tokio::fs::read(path).await.map_err(|source| FetchError::File {
            path: path.display().to_string(),
            source,
        })?;

        if body.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        let (html, encoding) = decode_body("", &body)?;

        Ok(LoadedPage {
            location: path.display().to_string(),
            charset: encoding.name().to_string(),
            html,
            fetched_at: Utc::now(),
        })
    }
}

#[async_trait]
impl PageLoader for PageFetcher {
    async fn load(&self, source: &PageSource) -> Result<LoadedPage, FetchError> {
        match source {
            PageSource::Url(url) => self.fetch(url.as_str()).await,
            PageSource::File(path) => self.read_file(path).await,
        }
    }
}
