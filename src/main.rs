//! Main entry point for the rangeseek CLI application.
//!
//! Opens a remote file, seeks, and streams the requested byte range to stdout
//! using sequential reads.

use anyhow::{Result, bail};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use rangeseek::{Cli, HttpClient, HttpRangeReader, ReqwestClient, logging};

/// Largest single ranged GET issued while streaming.
const CHUNK_SIZE: usize = 256 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if !cli.is_http_url() {
        bail!("not an HTTP URL: {}", cli.url);
    }

    // A timeout needs a dedicated client; otherwise share the default one
    let client: Arc<dyn HttpClient> = match cli.timeout {
        Some(secs) => Arc::new(ReqwestClient::with_timeout(Duration::from_secs(secs))?),
        None => ReqwestClient::shared()?,
    };

    let mut reader =
        HttpRangeReader::open_with_client(client, cli.url.clone(), cli.prefetch).await?;

    if cli.size {
        println!("{}", reader.size());
        return Ok(());
    }

    let start = reader.seek(cli.offset, cli.whence.into())?;
    tracing::info!(start, length = ?cli.length, "streaming range");

    let written = copy_to_stdout(&mut reader, cli.length).await?;

    if !cli.is_quiet() {
        eprintln!(
            "\n{} written, {} transferred",
            format_size(written),
            format_size(reader.transferred_bytes())
        );
    }

    Ok(())
}

/// Read from the cursor until `limit` bytes are written or the resource ends
async fn copy_to_stdout(reader: &mut HttpRangeReader, limit: Option<u64>) -> Result<u64> {
    let mut stdout = tokio::io::stdout();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        let Some(want) = next_chunk_len(limit, written) else {
            break;
        };

        let n = match reader.read(&mut buf[..want]).await {
            Ok(n) => n,
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => return Err(e.into()),
        };

        stdout.write_all(&buf[..n]).await?;
        written += n as u64;
    }

    stdout.flush().await?;
    Ok(written)
}

/// Size of the next read, or `None` once `limit` bytes have been written
fn next_chunk_len(limit: Option<u64>, written: u64) -> Option<usize> {
    match limit {
        Some(limit) if written >= limit => None,
        // clamp in u64 so a large limit cannot truncate on 32-bit targets
        Some(limit) => Some((limit - written).min(CHUNK_SIZE as u64) as usize),
        None => Some(CHUNK_SIZE),
    }
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
