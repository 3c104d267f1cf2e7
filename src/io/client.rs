use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, RANGE};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::error::BoxError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static SHARED_CLIENT: OnceLock<Arc<ReqwestClient>> = OnceLock::new();

/// Response to a metadata probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    /// Raw `Content-Length` value, if the server sent one.
    pub content_length: Option<String>,
    /// True if the server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

/// Response to a ranged GET. `body` is only populated for 2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// HTTP operations needed by [`HttpRangeReader`](crate::HttpRangeReader).
///
/// Implementations own transport policy (timeouts, TLS, proxies, pooling)
/// and may be shared by any number of readers.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a HEAD request for `url`.
    async fn head(&self, url: &str) -> Result<HeadResponse, BoxError>;

    /// Send a GET for the inclusive byte interval `start..=end`.
    async fn get_range(&self, url: &str, start: u64, end: u64) -> Result<RangeResponse, BoxError>;
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: Client,
}

impl ReqwestClient {
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }

    /// Build an isolated client with its own request timeout
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let inner = Client::builder().timeout(timeout).build()?;
        Ok(Self { inner })
    }

    /// Process-wide default client, built on first successful call
    pub fn shared() -> reqwest::Result<Arc<ReqwestClient>> {
        if let Some(client) = SHARED_CLIENT.get() {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(Self::with_timeout(DEFAULT_TIMEOUT)?);
        Ok(Arc::clone(SHARED_CLIENT.get_or_init(|| client)))
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn head(&self, url: &str) -> Result<HeadResponse, BoxError> {
        let resp = self.inner.head(url).send().await?;

        let content_length = resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let accept_ranges = resp
            .headers()
            .get(ACCEPT_RANGES)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("bytes"));

        Ok(HeadResponse {
            status: resp.status().as_u16(),
            content_length,
            accept_ranges,
        })
    }

    async fn get_range(&self, url: &str, start: u64, end: u64) -> Result<RangeResponse, BoxError> {
        let resp = self
            .inner
            .get(url)
            .header(RANGE, format!("bytes={}-{}", start, end))
            .send()
            .await?;

        let status = resp.status();
        let body = if status.is_success() {
            resp.bytes().await?.to_vec()
        } else {
            Vec::new()
        };

        Ok(RangeResponse {
            status: status.as_u16(),
            body,
        })
    }
}
