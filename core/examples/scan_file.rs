//! Example: Scan one file and print the detection report.
//!
//! Run with `cargo run -p die-core --features native --example scan_file -- <FILE> [DATABASE]`.

use std::path::PathBuf;

use die_core::{Detector, NativeEngine, ScanFlags, ScanRequest, ScanResult};

fn main() {
    let mut args = std::env::args_os().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: scan_file <FILE> [DATABASE]");
        std::process::exit(2);
    };

    let mut request = ScanRequest::file(&path).with_flags(ScanFlags::DEEP_SCAN);
    if let Some(db) = args.next() {
        request = request.with_database(PathBuf::from(db));
    }

    let detector = Detector::new(NativeEngine::new());

    match detector.scan(&request) {
        Ok(ScanResult::Detected(report)) => println!("{}:\n{}", path.display(), report),
        Ok(ScanResult::Absent) => println!("{}: no detection result", path.display()),
        Err(e) => eprintln!("Error scanning {}: {}", path.display(), e),
    }
}
