//! Scan request domain model.

use std::path::{Path, PathBuf};

use super::ScanFlags;

/// What a scan looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// A file on disk, opened by the native library itself.
    File(PathBuf),
    /// Bytes already in memory.
    Memory(Vec<u8>),
}

impl ScanTarget {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            ScanTarget::File(path) => path.display().to_string(),
            ScanTarget::Memory(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

/// A single scan request.
///
/// Immutable once built: the builder methods consume and return `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    target: ScanTarget,
    flags: ScanFlags,
    database: Option<PathBuf>,
}

impl ScanRequest {
    /// Scan a file with no flags and the library's default database.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: ScanTarget::File(path.into()),
            flags: ScanFlags::empty(),
            database: None,
        }
    }

    /// Scan an in-memory buffer with no flags and the library's default database.
    pub fn memory(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            target: ScanTarget::Memory(bytes.into()),
            flags: ScanFlags::empty(),
            database: None,
        }
    }

    /// Use these flags.
    pub fn with_flags(mut self, flags: ScanFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Use the signature database at `path`.
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    pub fn flags(&self) -> ScanFlags {
        self.flags
    }

    pub fn database(&self) -> Option<&Path> {
        self.database.as_deref()
    }
}
