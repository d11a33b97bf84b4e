//! Scan result domain model.

use serde::{Deserialize, Serialize};

/// Outcome of a scan.
///
/// `Absent` is the library's only failure signal ("no detection result")
/// and is not an error. A `Detected` report is always an owned copy and
/// never points into memory owned by the native library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "report", rename_all = "camelCase")]
pub enum ScanResult {
    /// The library produced a detection report.
    Detected(String),
    /// The library returned nothing.
    Absent,
}

impl ScanResult {
    pub fn is_detected(&self) -> bool {
        matches!(self, ScanResult::Detected(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ScanResult::Absent)
    }

    /// Borrow the report, if any.
    pub fn report(&self) -> Option<&str> {
        match self {
            ScanResult::Detected(report) => Some(report),
            ScanResult::Absent => None,
        }
    }

    /// Take ownership of the report, if any.
    pub fn into_report(self) -> Option<String> {
        self.into()
    }
}

impl From<Option<String>> for ScanResult {
    fn from(report: Option<String>) -> Self {
        match report {
            Some(report) => ScanResult::Detected(report),
            None => ScanResult::Absent,
        }
    }
}

impl From<ScanResult> for Option<String> {
    fn from(result: ScanResult) -> Self {
        match result {
            ScanResult::Detected(report) => Some(report),
            ScanResult::Absent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let detected = ScanResult::Detected("PE32".to_string());
        assert!(detected.is_detected());
        assert_eq!(detected.report(), Some("PE32"));
        assert_eq!(detected.into_report(), Some("PE32".to_string()));

        let absent = ScanResult::Absent;
        assert!(absent.is_absent());
        assert_eq!(absent.report(), None);
        assert_eq!(absent.into_report(), None);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ScanResult::Detected("ELF64".to_string())).unwrap();
        assert_eq!(json, r#"{"status":"detected","report":"ELF64"}"#);

        let json = serde_json::to_string(&ScanResult::Absent).unwrap();
        assert_eq!(json, r#"{"status":"absent"}"#);
    }
}
