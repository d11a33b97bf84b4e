//! Scanning application service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::adapters::boundary;
use crate::config::Config;
use crate::domain::{ScanFlags, ScanRequest, ScanResult};
use crate::error::Result;
use crate::ports::DetectEngine;

/// Application service for scan operations.
///
/// Wraps a [`DetectEngine`] and fills in a default signature database for
/// requests that do not name one. It keeps no state between calls.
pub struct Detector<E: DetectEngine> {
    engine: E,
    default_database: Option<PathBuf>,
}

impl<E: DetectEngine> Detector<E> {
    /// Create a detector that leaves the database choice to the engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            default_database: None,
        }
    }

    /// Create a detector using the database from `config` (or `DIE_DB_PATH`).
    pub fn with_config(engine: E, config: &Config) -> Self {
        Self {
            engine,
            default_database: config.resolve_database(),
        }
    }

    /// Use `path` for requests without a database.
    pub fn with_default_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_database = Some(path.into());
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn default_database(&self) -> Option<&Path> {
        self.default_database.as_deref()
    }

    /// Run a scan request.
    pub fn scan(&self, request: &ScanRequest) -> Result<ScanResult> {
        let database = request.database().or(self.default_database());
        let flags = request.flags();

        debug!(
            scan_target = %request.target().describe(),
            flags = flags.bits(),
            database = ?database,
            "Starting scan"
        );

        boundary::scan_target(&self.engine, request.target(), flags, database)
    }

    /// Scan a file with the default database.
    pub fn scan_file(&self, path: &Path, flags: ScanFlags) -> Result<ScanResult> {
        debug!(path = %path.display(), flags = flags.bits(), "Scanning file");
        boundary::scan_path(&self.engine, path, flags, self.default_database())
    }

    /// Scan a file with an explicit database.
    pub fn scan_file_with_db(&self, path: &Path, flags: ScanFlags, db: &Path) -> Result<ScanResult> {
        debug!(
            path = %path.display(),
            flags = flags.bits(),
            database = %db.display(),
            "Scanning file"
        );
        boundary::scan_path(&self.engine, path, flags, Some(db))
    }

    /// Scan a byte slice with the default database.
    pub fn scan_memory(&self, data: &[u8], flags: ScanFlags) -> Result<ScanResult> {
        debug!(len = data.len(), flags = flags.bits(), "Scanning memory");
        boundary::scan_bytes(&self.engine, data, flags, self.default_database())
    }

    /// Scan a byte slice with an explicit database.
    pub fn scan_memory_with_db(&self, data: &[u8], flags: ScanFlags, db: &Path) -> Result<ScanResult> {
        debug!(
            len = data.len(),
            flags = flags.bits(),
            database = %db.display(),
            "Scanning memory"
        );
        boundary::scan_bytes(&self.engine, data, flags, Some(db))
    }

    /// Load a signature database into the engine.
    pub fn load_database(&self, path: &Path) -> Result<()> {
        debug!(database = %path.display(), "Loading signature database");
        boundary::load_database(&self.engine, path)
    }
}

impl<E: DetectEngine + 'static> Detector<E> {
    /// Run a scan on tokio's blocking pool.
    ///
    /// The scan itself cannot be cancelled; dropping the returned future
    /// only stops waiting for it.
    pub async fn scan_blocking(self: Arc<Self>, request: ScanRequest) -> Result<ScanResult> {
        tokio::task::spawn_blocking(move || self.scan(&request)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::{CallKind, FakeEngine};

    #[test]
    fn test_default_database_is_applied() {
        let detector = Detector::new(FakeEngine::new().with_report("/bin/a", "PE32"))
            .with_default_database("/opt/die/db");

        let result = detector.scan(&ScanRequest::file("/bin/a")).unwrap();
        assert_eq!(result.report(), Some("PE32"));

        let calls = detector.engine().calls();
        assert_eq!(calls[0].database.as_deref(), Some(&b"/opt/die/db"[..]));
    }

    #[test]
    fn test_request_database_wins() {
        let detector = Detector::new(FakeEngine::new()).with_default_database("/opt/die/db");

        let request = ScanRequest::file("/bin/a").with_database("sigs.db");
        detector.scan(&request).unwrap();

        let calls = detector.engine().calls();
        assert_eq!(calls[0].database.as_deref(), Some(&b"sigs.db"[..]));
    }

    #[test]
    fn test_memory_request_gets_default_database() {
        let data = vec![0x7f, b'E', b'L', b'F'];
        let detector = Detector::new(FakeEngine::new().with_report(&data, "ELF64"))
            .with_default_database("/opt/die/db");

        let result = detector.scan(&ScanRequest::memory(data)).unwrap();
        assert_eq!(result.report(), Some("ELF64"));

        let calls = detector.engine().calls();
        assert_eq!(calls[0].kind, CallKind::Memory);
        assert_eq!(calls[0].database.as_deref(), Some(&b"/opt/die/db"[..]));
    }

    #[test]
    fn test_no_database_anywhere() {
        let detector = Detector::new(FakeEngine::new());
        detector.scan_file(Path::new("/bin/a"), ScanFlags::DEEP_SCAN).unwrap();

        let calls = detector.engine().calls();
        assert_eq!(calls[0].database, None);
        assert_eq!(calls[0].flags, ScanFlags::DEEP_SCAN.bits());
    }

    #[test]
    fn test_with_config() {
        let config = Config {
            database_path: Some(PathBuf::from("/etc/die/db")),
            ..Default::default()
        };
        let detector = Detector::with_config(FakeEngine::new(), &config);
        assert_eq!(detector.default_database(), Some(Path::new("/etc/die/db")));
    }

    #[test]
    fn test_scan_memory_variants() {
        let data = b"MZ\x90\x00".to_vec();
        let detector = Detector::new(FakeEngine::new().with_report(&data, "MSDOS"));

        let result = detector.scan_memory(&data, ScanFlags::empty()).unwrap();
        assert_eq!(result.report(), Some("MSDOS"));

        let result = detector
            .scan_memory_with_db(&data, ScanFlags::VERBOSE, Path::new("sigs.db"))
            .unwrap();
        assert_eq!(result.report(), Some("MSDOS"));

        let engine = detector.engine();
        let calls = engine.calls();
        assert!(calls.iter().all(|c| c.kind == CallKind::Memory));
        assert_eq!(calls[1].flags, ScanFlags::VERBOSE.bits());
        assert_eq!(calls[1].database.as_deref(), Some(&b"sigs.db"[..]));
        assert_eq!(engine.released(), engine.acquired());
    }

    #[test]
    fn test_scan_file_with_db() {
        let detector = Detector::new(FakeEngine::new().with_report("/bin/a", "PE32,gcc"));

        let result = detector
            .scan_file_with_db(Path::new("/bin/a"), ScanFlags::empty(), Path::new("sigs.db"))
            .unwrap();
        assert_eq!(result, ScanResult::Detected("PE32,gcc".to_string()));
        assert_eq!(detector.engine().released().len(), 1);
    }

    #[test]
    fn test_load_database() {
        let detector = Detector::new(FakeEngine::new());
        detector.load_database(Path::new("/opt/die/db")).unwrap();
        assert_eq!(detector.engine().loaded(), vec![b"/opt/die/db".to_vec()]);
    }

    #[tokio::test]
    async fn test_scan_blocking() {
        let detector = Arc::new(Detector::new(
            FakeEngine::new().with_report("/bin/a", "ELF64"),
        ));

        let result = detector
            .clone()
            .scan_blocking(ScanRequest::file("/bin/a"))
            .await
            .unwrap();
        assert_eq!(result.report(), Some("ELF64"));

        let absent = detector
            .clone()
            .scan_blocking(ScanRequest::file("/bin/unknown"))
            .await
            .unwrap();
        assert!(absent.is_absent());
        assert_eq!(detector.engine().released().len(), 1);
    }

    #[test]
    fn test_scan_blocking_on_current_thread() {
        let detector = Arc::new(Detector::new(FakeEngine::new()));
        let result = tokio_test::block_on(detector.scan_blocking(ScanRequest::memory(vec![0u8; 8])));
        assert!(result.unwrap().is_absent());
    }
}
