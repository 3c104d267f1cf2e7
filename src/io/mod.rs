mod client;
mod http;
#[cfg(test)]
mod mock;

pub use client::{HeadResponse, HttpClient, RangeResponse, ReqwestClient};
pub use http::HttpRangeReader;

use crate::error::{Error, Result};
use async_trait::async_trait;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Reference point for [`HttpRangeReader::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Position is the offset itself.
    Start,
    /// Position is the current cursor plus the offset.
    Current,
    /// Position is the resource size *minus* the offset.
    End,
}

impl TryFrom<i32> for Whence {
    type Error = Error;

    /// Converts the conventional numeric modes (0, 1, 2).
    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            other => Err(Error::UnsupportedWhence(other)),
        }
    }
}
