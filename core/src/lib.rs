//! die-core
//!
//! Safe binding over the Detect-It-Easy native scanning library. Provides:
//! - File and in-memory scans with an opaque flag bitmask
//! - Signature database loading
//! - Scan defaults persisted in `~/.die/config.json`
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Requests, flags and results
//! - `ports`: The `DetectEngine` trait the native library is reached through
//! - `adapters`: The ownership boundary and the native engine
//! - `application`: The `Detector` service
//!
//! # Native library
//! Linking `libdie` is opt-in through the `native` feature. Without it the
//! crate still builds and any [`DetectEngine`] implementation can be used.
//!
//! # Thread safety
//! `libdie` does not document reentrancy, so the native engine serialises
//! all calls into it. Scans from several threads are safe but run one at a
//! time.

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{ResultFormat, ScanFlags, ScanRequest, ScanResult, ScanTarget};

// Re-export other commonly used types
pub use application::Detector;
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use ports::DetectEngine;

#[cfg(feature = "native")]
pub use adapters::NativeEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "native")]
mod native_api {
    use std::path::Path;

    use crate::adapters::{boundary, NativeEngine};
    use crate::domain::{ScanFlags, ScanResult};
    use crate::error::Result;

    /// Scan `path` with a raw flag bitmask and the database at `database`.
    ///
    /// Returns `None` when the library has no detection result.
    pub fn scan(path: impl AsRef<Path>, flags: u32, database: impl AsRef<Path>) -> Result<Option<String>> {
        boundary::scan_report(&NativeEngine::new(), path.as_ref(), flags, database.as_ref())
    }

    /// Scan a file with the library's default database.
    pub fn scan_file(path: &Path, flags: ScanFlags) -> Result<ScanResult> {
        boundary::scan_path(&NativeEngine::new(), path, flags, None)
    }

    /// Scan a file with the database at `db_path`.
    pub fn scan_file_with_db(path: &Path, flags: ScanFlags, db_path: &Path) -> Result<ScanResult> {
        boundary::scan_path(&NativeEngine::new(), path, flags, Some(db_path))
    }

    /// Scan a byte slice with the library's default database.
    pub fn scan_memory(data: &[u8], flags: ScanFlags) -> Result<ScanResult> {
        boundary::scan_bytes(&NativeEngine::new(), data, flags, None)
    }

    /// Scan a byte slice with the database at `db_path`.
    pub fn scan_memory_with_db(data: &[u8], flags: ScanFlags, db_path: &Path) -> Result<ScanResult> {
        boundary::scan_bytes(&NativeEngine::new(), data, flags, Some(db_path))
    }

    /// Load the signature database at `path`.
    pub fn load_database(path: &Path) -> Result<()> {
        boundary::load_database(&NativeEngine::new(), path)
    }
}

#[cfg(feature = "native")]
pub use native_api::{
    load_database, scan, scan_file, scan_file_with_db, scan_memory, scan_memory_with_db,
};
