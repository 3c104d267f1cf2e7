//! In-memory [`HttpClient`] serving a fixed body, for unit tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{HeadResponse, HttpClient, RangeResponse};
use crate::error::BoxError;

pub(crate) struct MockClient {
    body: Vec<u8>,
    content_length: Option<String>,
    head_status: u16,
    accept_ranges: bool,
    range_status: Option<u16>,
    fail_ranges: bool,
    heads: AtomicUsize,
    ranges: Mutex<Vec<(u64, u64)>>,
}

impl MockClient {
    pub(crate) fn new(body: Vec<u8>) -> Self {
        let content_length = Some(body.len().to_string());
        Self {
            body,
            content_length,
            head_status: 200,
            accept_ranges: true,
            range_status: None,
            fail_ranges: false,
            heads: AtomicUsize::new(0),
            ranges: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn content_length(mut self, value: Option<&str>) -> Self {
        self.content_length = value.map(str::to_string);
        self
    }

    pub(crate) fn head_status(mut self, status: u16) -> Self {
        self.head_status = status;
        self
    }

    pub(crate) fn without_accept_ranges(mut self) -> Self {
        self.accept_ranges = false;
        self
    }

    /// Answer every ranged GET with `status` and no body.
    pub(crate) fn range_status(mut self, status: u16) -> Self {
        self.range_status = Some(status);
        self
    }

    /// Fail every ranged GET at the transport level.
    pub(crate) fn failing_ranges(mut self) -> Self {
        self.fail_ranges = true;
        self
    }

    pub(crate) fn head_count(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }

    /// Inclusive intervals requested so far, in order.
    pub(crate) fn ranges(&self) -> Vec<(u64, u64)> {
        self.ranges.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn head(&self, _url: &str) -> Result<HeadResponse, BoxError> {
        self.heads.fetch_add(1, Ordering::SeqCst);
        Ok(HeadResponse {
            status: self.head_status,
            content_length: self.content_length.clone(),
            accept_ranges: self.accept_ranges,
        })
    }

    async fn get_range(&self, _url: &str, start: u64, end: u64) -> Result<RangeResponse, BoxError> {
        self.ranges.lock().unwrap().push((start, end));

        if self.fail_ranges {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        if let Some(status) = self.range_status {
            return Ok(RangeResponse {
                status,
                body: Vec::new(),
            });
        }

        let len = self.body.len() as u64;
        if start >= len || end < start {
            return Ok(RangeResponse {
                status: 416,
                body: Vec::new(),
            });
        }
        let end = end.min(len - 1);
        Ok(RangeResponse {
            status: 206,
            body: self.body[start as usize..=end as usize].to_vec(),
        })
    }
}
