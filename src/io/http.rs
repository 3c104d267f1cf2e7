use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::{HttpClient, ReadAt, ReqwestClient, Whence};
use crate::error::{Error, MetadataErrorKind, Result};

/// Seekable reader over a remote resource, backed by HTTP Range requests.
///
/// The resource size is probed once when the reader is opened and is assumed
/// not to change afterwards. An optional prefix of the resource is cached in
/// memory so header-region reads do not hit the network.
///
/// `read` and `seek` take `&mut self`: a reader has a single cursor and is not
/// meant to be driven from several tasks at once. `read_at` only needs `&self`
/// and never touches the cursor. Use one reader per consumer, or share the
/// [`HttpClient`] between readers instead.
pub struct HttpRangeReader {
    client: Arc<dyn HttpClient>,
    url: String,
    size: u64,
    position: i64,
    head: Vec<u8>,
    transferred_bytes: AtomicU64,
}

impl HttpRangeReader {
    /// Open `url` using the process-wide shared client.
    ///
    /// See [`open_with_client`](Self::open_with_client).
    /// Fails with [`Error::Transport`] if the shared client cannot be built.
    pub async fn open(url: impl Into<String>, prefetch: usize) -> Result<Self> {
        let client = ReqwestClient::shared().map_err(|e| Error::Transport(Box::new(e)))?;
        Self::open_with_client(client, url, prefetch).await
    }

    /// Open `url` using `client` for every request.
    ///
    /// Sends a HEAD request to learn the resource size; failure there is
    /// returned as [`Error::Metadata`]. If `prefetch` is non-zero, the first
    /// `prefetch` bytes are then read and cached. A failed prefetch is logged
    /// and the reader is returned without a cache.
    pub async fn open_with_client(
        client: Arc<dyn HttpClient>,
        url: impl Into<String>,
        prefetch: usize,
    ) -> Result<Self> {
        let url = url.into();

        let size = match probe_size(client.as_ref(), &url).await {
            Ok(size) => size,
            Err(kind) => return Err(Error::Metadata { url, kind }),
        };
        debug!(url = %url, size, "probed remote resource");

        let mut reader = Self {
            client,
            url,
            size,
            position: 0,
            head: Vec::new(),
            transferred_bytes: AtomicU64::new(0),
        };

        if prefetch > 0 {
            let mut head = vec![0u8; prefetch];
            match reader.read_at(0, &mut head).await {
                Ok(n) => {
                    head.truncate(n);
                    debug!(url = %reader.url, bytes = n, "prefetched head");
                    reader.head = head;
                }
                Err(e) => {
                    warn!(url = %reader.url, error = %e, "failed to prefetch {} bytes", prefetch);
                }
            }
        }

        Ok(reader)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Size of the resource as reported by the metadata probe
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Current cursor. May be negative or past the end after a seek.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Cached leading bytes of the resource (empty if none)
    pub fn prefetched(&self) -> &[u8] {
        &self.head
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }

    /// Move the cursor and return its new value.
    ///
    /// `Whence::End` sets the cursor to `size - offset`. The result is not
    /// clamped; an out-of-range cursor is reported by the next `read`.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        let position = match whence {
            Whence::Start => Some(offset),
            Whence::Current => self.position.checked_add(offset),
            // size fits in i64, checked in probe_size
            Whence::End => (self.size as i64).checked_sub(offset),
        }
        .ok_or(Error::SeekOverflow)?;

        self.position = position;
        Ok(position)
    }

    /// Read at the cursor and advance it by the number of bytes read.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let offset =
            u64::try_from(self.position).map_err(|_| Error::NegativePosition(self.position))?;
        let n = self.read_at(offset, buf).await?;
        self.position += n as i64;
        Ok(n)
    }

    /// Read `buf.len()` bytes starting at `offset` without touching the cursor.
    ///
    /// Served from the prefetch cache when it holds the whole interval with at
    /// least one byte to spare, otherwise with a single ranged GET. Returns
    /// [`Error::EndOfStream`] when `offset` is at or past the end, or when
    /// `buf` is empty.
    pub async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let end = offset.saturating_add(buf.len() as u64);

        if self.head.len() as u64 > end {
            buf.copy_from_slice(&self.head[offset as usize..end as usize]);
            return Ok(buf.len());
        }

        if offset >= self.size || buf.is_empty() {
            return Err(Error::EndOfStream);
        }

        debug!(url = %self.url, start = offset, end = end - 1, "ranged GET");
        let resp = self
            .client
            .get_range(&self.url, offset, end - 1)
            .await
            .map_err(Error::Transport)?;

        if !(200..300).contains(&resp.status) {
            return Err(Error::RemoteFetch {
                status: resp.status,
            });
        }

        self.transferred_bytes
            .fetch_add(resp.body.len() as u64, Ordering::Relaxed);

        if resp.body.is_empty() {
            return Err(Error::EndOfStream);
        }

        let n = resp.body.len().min(buf.len());
        buf[..n].copy_from_slice(&resp.body[..n]);
        Ok(n)
    }
}

/// Send the metadata probe and parse the resource size out of it
async fn probe_size(
    client: &dyn HttpClient,
    url: &str,
) -> std::result::Result<u64, MetadataErrorKind> {
    let resp = client
        .head(url)
        .await
        .map_err(MetadataErrorKind::Transport)?;

    if !(200..300).contains(&resp.status) {
        return Err(MetadataErrorKind::Status(resp.status));
    }

    if !resp.accept_ranges {
        warn!(url = %url, "server does not advertise Accept-Ranges: bytes");
    }

    let raw = resp.content_length.ok_or(MetadataErrorKind::MissingLength)?;
    match raw.trim().parse::<i64>() {
        Ok(size) if size >= 0 => Ok(size as u64),
        _ => Err(MetadataErrorKind::InvalidLength(raw)),
    }
}

#[async_trait]
impl ReadAt for HttpRangeReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        HttpRangeReader::read_at(self, offset, buf).await
    }

    fn size(&self) -> u64 {
        self.size
    }
}
