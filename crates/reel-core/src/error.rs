use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Chatreel pipeline.
#[derive(Error, Debug)]
pub enum ReelError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed at all.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The export parsed as JSON but does not match the expected shape.
    #[error("Export schema mismatch in {path}: {detail}")]
    Schema { path: PathBuf, detail: String },

    /// The export contains no messages at all.
    #[error("Export {0} contains no messages")]
    EmptyExport(PathBuf),

    /// No export part files were found under the given directory.
    #[error("No export files found in {0}")]
    NoExportFiles(PathBuf),

    /// An epoch-milliseconds timestamp is outside the representable range.
    #[error("Timestamp out of range: {0} ms")]
    Timestamp(i64),

    /// A chart scaling domain could not be computed (e.g. empty series).
    #[error("Invalid chart domain: {0}")]
    InvalidDomain(String),

    /// A timezone name is not a recognised IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the reel crates.
pub type Result<T> = std::result::Result<T, ReelError>;
