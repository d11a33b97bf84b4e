//! Scan flag bitmask and output format selection.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flag bitmask handed to the native scanner.
    ///
    /// The value is opaque to this crate: whatever bits a caller sets,
    /// including ones without a named constant, reach the library unchanged
    /// (see [`ScanFlags::from_raw`]). The constants below are the bits
    /// documented in `die.h`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ScanFlags: u32 {
        /// Scan the whole file instead of stopping at the first match.
        const DEEP_SCAN = 0x0000_0001;
        /// Enable heuristic signatures.
        const HEURISTIC_SCAN = 0x0000_0002;
        /// Scan every file type, not only the ones the database targets.
        const ALLTYPES_SCAN = 0x0000_0004;
        /// Descend into overlays, resources and archive members.
        const RECURSIVE_SCAN = 0x0000_0008;
        /// Include informational records in the report.
        const VERBOSE = 0x0000_0010;
        /// Report as XML.
        const RESULT_AS_XML = 0x0001_0000;
        /// Report as JSON.
        const RESULT_AS_JSON = 0x0002_0000;
        /// Report as TSV.
        const RESULT_AS_TSV = 0x0004_0000;
        /// Report as CSV.
        const RESULT_AS_CSV = 0x0008_0000;
    }
}

impl ScanFlags {
    const FORMAT_MASK: u32 = Self::RESULT_AS_XML.bits()
        | Self::RESULT_AS_JSON.bits()
        | Self::RESULT_AS_TSV.bits()
        | Self::RESULT_AS_CSV.bits();

    /// Wrap a raw bitmask without dropping unknown bits.
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Replace any output format bits with the ones for `format`.
    pub fn with_format(self, format: ResultFormat) -> Self {
        Self::from_bits_retain(self.bits() & !Self::FORMAT_MASK) | format.flags()
    }

    /// The output format selected by these flags, if exactly one is set.
    pub fn format(&self) -> Option<ResultFormat> {
        match self.bits() & Self::FORMAT_MASK {
            0 => Some(ResultFormat::Text),
            bits if bits == Self::RESULT_AS_JSON.bits() => Some(ResultFormat::Json),
            bits if bits == Self::RESULT_AS_XML.bits() => Some(ResultFormat::Xml),
            bits if bits == Self::RESULT_AS_CSV.bits() => Some(ResultFormat::Csv),
            bits if bits == Self::RESULT_AS_TSV.bits() => Some(ResultFormat::Tsv),
            _ => None,
        }
    }
}

/// Layout of the report produced by the native scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Plain text, one record per line.
    #[default]
    Text,
    Json,
    Xml,
    Csv,
    Tsv,
}

impl ResultFormat {
    /// All available formats.
    pub const ALL: [ResultFormat; 5] = [
        ResultFormat::Text,
        ResultFormat::Json,
        ResultFormat::Xml,
        ResultFormat::Csv,
        ResultFormat::Tsv,
    ];

    /// The flag bits that request this format.
    pub fn flags(&self) -> ScanFlags {
        match self {
            ResultFormat::Text => ScanFlags::empty(),
            ResultFormat::Json => ScanFlags::RESULT_AS_JSON,
            ResultFormat::Xml => ScanFlags::RESULT_AS_XML,
            ResultFormat::Csv => ScanFlags::RESULT_AS_CSV,
            ResultFormat::Tsv => ScanFlags::RESULT_AS_TSV,
        }
    }

    /// Lowercase name, as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFormat::Text => "text",
            ResultFormat::Json => "json",
            ResultFormat::Xml => "xml",
            ResultFormat::Csv => "csv",
            ResultFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| {
                format!("unknown format '{s}' (expected one of: text, json, xml, csv, tsv)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bits_survive() {
        let flags = ScanFlags::from_raw(0xdead_beef);
        assert_eq!(flags.bits(), 0xdead_beef);

        let flags = ScanFlags::from_raw(0x0100_0000) | ScanFlags::DEEP_SCAN;
        assert_eq!(flags.bits(), 0x0100_0001);
    }

    #[test]
    fn test_documented_values() {
        assert_eq!(ScanFlags::DEEP_SCAN.bits(), 0x1);
        assert_eq!(ScanFlags::VERBOSE.bits(), 0x10);
        assert_eq!(ScanFlags::RESULT_AS_JSON.bits(), 0x20000);
        assert_eq!(ScanFlags::RESULT_AS_CSV.bits(), 0x80000);
    }

    #[test]
    fn test_with_format_replaces_previous() {
        let flags = (ScanFlags::DEEP_SCAN | ScanFlags::RESULT_AS_XML).with_format(ResultFormat::Json);
        assert!(flags.contains(ScanFlags::DEEP_SCAN));
        assert!(flags.contains(ScanFlags::RESULT_AS_JSON));
        assert!(!flags.contains(ScanFlags::RESULT_AS_XML));
        assert_eq!(flags.format(), Some(ResultFormat::Json));

        let text = flags.with_format(ResultFormat::Text);
        assert_eq!(text, ScanFlags::DEEP_SCAN);
    }

    #[test]
    fn test_with_format_keeps_unknown_bits() {
        let flags = ScanFlags::from_raw(0x8000_0000).with_format(ResultFormat::Csv);
        assert_eq!(flags.bits(), 0x8000_0000 | 0x80000);
    }

    #[test]
    fn test_ambiguous_format() {
        let flags = ScanFlags::RESULT_AS_JSON | ScanFlags::RESULT_AS_XML;
        assert_eq!(flags.format(), None);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<ResultFormat>(), Ok(ResultFormat::Json));
        assert_eq!("TSV".parse::<ResultFormat>(), Ok(ResultFormat::Tsv));
        assert!("yaml".parse::<ResultFormat>().is_err());
        for format in ResultFormat::ALL {
            assert_eq!(format.to_string().parse::<ResultFormat>(), Ok(format));
        }
    }
}
