//! # rangeseek
//!
//! Seekable, random-access reads of remote files over HTTP Range requests.
//!
//! [`HttpRangeReader`] treats a resource reachable only over HTTP as if it were
//! a local file: it probes the size once with a HEAD request, then turns every
//! positional read into a single ranged GET for exactly the bytes asked for.
//! An optional prefix of the resource can be prefetched at open time so that
//! repeated reads of a file header stay in memory.
//!
//! ## Example
//!
//! ```no_run
//! use rangeseek::{HttpRangeReader, Whence};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Cache the first 4 KiB, which holds the format header
//!     let mut reader = HttpRangeReader::open("https://example.com/large.bin", 4096).await?;
//!
//!     let mut magic = [0u8; 4];
//!     reader.read_at(0, &mut magic).await?;
//!
//!     // Jump to the trailer and read it sequentially
//!     reader.seek(64, Whence::End)?;
//!     let mut trailer = [0u8; 64];
//!     let n = reader.read(&mut trailer).await?;
//!     println!("read {} trailer bytes, now at {}", n, reader.position());
//!
//!     Ok(())
//! }
//! ```
//!
//! Readers opened with [`HttpRangeReader::open`] share one process-wide
//! `reqwest` client. Pass your own [`HttpClient`] to
//! [`HttpRangeReader::open_with_client`] for a different timeout or proxy
//! policy, or to serve requests from somewhere other than the network.

pub mod cli;
pub mod error;
pub mod io;
pub mod logging;

pub use cli::Cli;
pub use error::{BoxError, Error, MetadataErrorKind, Result};
pub use io::{
    HeadResponse, HttpClient, HttpRangeReader, RangeResponse, ReadAt, ReqwestClient, Whence,
};
