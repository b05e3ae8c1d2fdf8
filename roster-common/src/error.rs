//! Common error types for the roster service

use thiserror::Error;

/// Common result type for roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which record collection a malformed record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Member,
    GroupPhoto,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Member => write!(f, "member"),
            RecordKind::GroupPhoto => write!(f, "group photo"),
        }
    }
}

/// Common error types across the roster crates
#[derive(Error, Debug)]
pub enum Error {
    /// Content API answered with a non-success status
    #[error("HTTP error: {url} returned {status}")]
    Http { url: String, status: u16 },

    /// Request never produced a response (connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON envelope
    #[error("Decode error: {0}")]
    Decode(String),

    /// A record in a batch has a missing or unusable field; the whole batch
    /// is rejected
    #[error("Malformed {kind} record at position {position}: {problem} `{field}`")]
    MalformedRecord {
        kind: RecordKind,
        position: usize,
        field: &'static str,
        /// "missing" or "out-of-range"
        problem: &'static str,
    },

    /// The fallback year has no group photo
    #[error("No group photo for default year {0}")]
    MissingDefaultPhoto(i32),

    /// Roster data has not finished loading
    #[error("Roster data not loaded")]
    NotReady,

    /// Requested year has no member records
    #[error("No members recorded for year {0}")]
    UnknownYear(i32),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// True for the error kinds produced by a failed fetch
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Http { .. } | Error::Network(_) | Error::Decode(_)
        )
    }
}
