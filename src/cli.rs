use clap::{Parser, ValueEnum};

use crate::io::Whence;

#[derive(Parser, Debug)]
#[command(name = "rangeseek")]
#[command(version)]
#[command(about = "Read byte ranges of a remote file over HTTP Range requests", long_about = None)]
#[command(after_help = "Examples:\n  \
  rangeseek -s https://example.com/disk.img              print the remote size\n  \
  rangeseek -o 512 -n 64 https://example.com/disk.img    dump 64 bytes at offset 512\n  \
  rangeseek -w end -o 22 https://example.com/a.zip | xxd  dump the last 22 bytes")]
pub struct Cli {
    /// HTTP or HTTPS URL of the resource
    #[arg(value_name = "URL")]
    pub url: String,

    /// Offset to seek to before reading
    #[arg(short = 'o', long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i64,

    /// What the offset is relative to (`end` means size minus offset)
    #[arg(short = 'w', long, value_enum, default_value_t = SeekMode::Start)]
    pub whence: SeekMode,

    /// Number of bytes to read (default: to end of resource)
    #[arg(short = 'n', long, value_name = "BYTES")]
    pub length: Option<u64>,

    /// Bytes to prefetch from the start of the resource
    #[arg(short = 'p', long, value_name = "BYTES", default_value_t = 0)]
    pub prefetch: usize,

    /// Request timeout in seconds for a dedicated HTTP client
    #[arg(short = 't', long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the resource size and exit
    #[arg(short = 's', long)]
    pub size: bool,

    /// Quiet mode, no summary on stderr
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeekMode {
    Start,
    Current,
    End,
}

impl From<SeekMode> for Whence {
    fn from(mode: SeekMode) -> Self {
        match mode {
            SeekMode::Start => Whence::Start,
            SeekMode::Current => Whence::Current,
            SeekMode::End => Whence::End,
        }
    }
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
