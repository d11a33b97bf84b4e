//! Error types for the die-core library.
//!
//! "No detection result" is not an error: the native library reports it
//! with a null buffer and the boundary turns that into
//! [`ScanResult::Absent`](crate::domain::ScanResult::Absent). The variants
//! below are local failures the caller has to be able to tell apart from it.

use std::collections::TryReserveError;
use std::ffi::NulError;
use std::str::Utf8Error;

use thiserror::Error;

/// Result type alias for die-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around a scan.
#[derive(Error, Debug)]
pub enum Error {
    /// A path contains a NUL byte and cannot be handed to the C API.
    #[error("Path contains an interior NUL byte at position {}", .0.nul_position())]
    InteriorNul(#[from] NulError),

    /// The path is not valid Unicode (non-Unix targets only).
    #[error("Path is not valid Unicode: {0}")]
    NonUnicodePath(String),

    /// The in-memory buffer is larger than the C API can address.
    #[error("Buffer of {len} bytes exceeds the 32-bit length limit")]
    Overflow { len: usize },

    /// Allocating the owned copy of a report failed.
    #[error("Out of memory while copying scan report: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The report returned by the library is not UTF-8.
    #[error("Scan report is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// The library refused to load a signature database.
    #[error("Failed to load signature database (error code {code})")]
    Database { code: i32 },

    /// The crate was built without a native engine.
    #[error("Native scanning support is not available: {0}")]
    Unsupported(String),

    /// The blocking scan task panicked or was cancelled.
    #[error("Scan task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
