use thiserror::Error;

/// Boxed error produced by an [`HttpClient`](crate::HttpClient) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by [`HttpRangeReader`](crate::HttpRangeReader).
#[derive(Debug, Error)]
pub enum Error {
    /// The size of the resource could not be determined while opening it.
    #[error("metadata probe for {url} failed")]
    Metadata {
        url: String,
        #[source]
        kind: MetadataErrorKind,
    },

    #[error("unsupported seek mode: {0}")]
    UnsupportedWhence(i32),

    /// The read started at or past the end of the resource, or asked for nothing.
    #[error("end of stream")]
    EndOfStream,

    #[error("ranged GET returned HTTP {status}")]
    RemoteFetch { status: u16 },

    #[error("HTTP transport error")]
    Transport(#[source] BoxError),

    #[error("cannot read at negative position {0}")]
    NegativePosition(i64),

    #[error("seek position overflows i64")]
    SeekOverflow,
}

#[derive(Debug, Error)]
pub enum MetadataErrorKind {
    #[error("HEAD request failed")]
    Transport(#[source] BoxError),

    #[error("HEAD returned HTTP {0}")]
    Status(u16),

    #[error("response has no Content-Length header")]
    MissingLength,

    #[error("invalid Content-Length header: {0:?}")]
    InvalidLength(String),
}

impl Error {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream)
    }

    /// HTTP status carried by a failed ranged GET.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteFetch { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;

        let kind = match &err {
            Error::EndOfStream => ErrorKind::UnexpectedEof,
            Error::UnsupportedWhence(_) | Error::NegativePosition(_) | Error::SeekOverflow => {
                ErrorKind::InvalidInput
            }
            Error::Metadata { .. } | Error::RemoteFetch { .. } | Error::Transport(_) => {
                ErrorKind::Other
            }
        };
        std::io::Error::new(kind, err)
    }
}
