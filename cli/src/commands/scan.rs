//! Scan commands - identify a file on disk or its bytes in memory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use die_core::{
    Config, ConfigStore, DetectEngine, Detector, ResultFormat, ScanFlags, ScanRequest, ScanResult,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// File to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Signature database (defaults to the configured one, then $DIE_DB_PATH)
    #[arg(short, long = "database-path", value_name = "DATABASE")]
    pub database: Option<PathBuf>,

    /// Report format (text, json, xml, csv, tsv)
    #[arg(long)]
    pub format: Option<ResultFormat>,

    /// Stop at the first match instead of a deep scan
    #[arg(long)]
    pub no_deep: bool,

    /// Enable heuristic signatures
    #[arg(long)]
    pub heuristic: bool,

    /// Descend into overlays, resources and archive members
    #[arg(long)]
    pub recursive: bool,

    /// Scan every file type
    #[arg(long)]
    pub all_types: bool,

    /// Raw flag bitmask (0x-prefixed hex or decimal); overrides every other flag option
    #[arg(long, value_name = "BITS", value_parser = parse_flags)]
    pub flags: Option<u32>,

    /// Stop waiting for the scan after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Scan a file on disk.
pub async fn file(store: &ConfigStore, args: ScanArgs, verbosity: u8, json: bool) -> Result<()> {
    let config = store.load().await?;
    let flags = resolve_flags(&config, &args, verbosity);
    let request = with_database(ScanRequest::file(&args.file).with_flags(flags), &args);

    let detector = Arc::new(Detector::with_config(super::engine()?, &config));
    let result = run(detector, request, args.timeout).await?;
    print_result(&args.file, &result, json)
}

/// Read a file and scan its bytes.
pub async fn memory(store: &ConfigStore, args: ScanArgs, verbosity: u8, json: bool) -> Result<()> {
    let config = store.load().await?;
    let flags = resolve_flags(&config, &args, verbosity);

    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    debug!(path = %args.file.display(), len = data.len(), "Read file into memory");

    let request = with_database(ScanRequest::memory(data).with_flags(flags), &args);

    let detector = Arc::new(Detector::with_config(super::engine()?, &config));
    let result = run(detector, request, args.timeout).await?;
    print_result(&args.file, &result, json)
}

/// Run `request` on the blocking pool, optionally bounded by `timeout` seconds.
pub async fn run<E: DetectEngine + 'static>(
    detector: Arc<Detector<E>>,
    request: ScanRequest,
    timeout: Option<u64>,
) -> Result<ScanResult> {
    let scan = detector.scan_blocking(request);

    let result = match timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), scan)
            .await
            .map_err(|_| anyhow!("Scan did not finish within {secs}s"))?,
        None => scan.await,
    };

    Ok(result?)
}

/// Parse a flag bitmask given as `0x`-prefixed hex or decimal.
pub fn parse_flags(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid flag bitmask '{s}': {e}"))
}

/// Combine configured defaults with command-line options.
pub fn resolve_flags(config: &Config, args: &ScanArgs, verbosity: u8) -> ScanFlags {
    if let Some(bits) = args.flags {
        return ScanFlags::from_raw(bits);
    }

    let mut flags = config.scan_flags();
    if args.no_deep {
        flags.remove(ScanFlags::DEEP_SCAN);
    }
    if args.heuristic {
        flags.insert(ScanFlags::HEURISTIC_SCAN);
    }
    if args.recursive {
        flags.insert(ScanFlags::RECURSIVE_SCAN);
    }
    if args.all_types {
        flags.insert(ScanFlags::ALLTYPES_SCAN);
    }
    if verbosity > 0 {
        flags.insert(ScanFlags::VERBOSE);
    }
    if let Some(format) = args.format {
        flags = flags.with_format(format);
    }
    flags
}

fn with_database(request: ScanRequest, args: &ScanArgs) -> ScanRequest {
    match &args.database {
        Some(db) => request.with_database(db),
        None => request,
    }
}

#[derive(Serialize)]
struct ScanOutput {
    path: String,
    detected: bool,
    report: Option<serde_json::Value>,
}

impl ScanOutput {
    fn new(path: &Path, result: &ScanResult) -> Self {
        // JSON reports are embedded as-is, anything else as a string
        let report = result.report().map(|report| {
            serde_json::from_str(report)
                .unwrap_or_else(|_| serde_json::Value::String(report.to_string()))
        });

        Self {
            path: path.display().to_string(),
            detected: result.is_detected(),
            report,
        }
    }
}

fn print_result(path: &Path, result: &ScanResult, json: bool) -> Result<()> {
    if json {
        let output = ScanOutput::new(path, result);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match result {
        ScanResult::Detected(report) => {
            info!(path = %path.display(), "Detection complete");
            println!("{}:", path.display());
            println!("{}", report.trim_end());
        }
        ScanResult::Absent => {
            println!("{}: No detection result.", path.display());
        }
    }
    Ok(())
}
