//! Domain layer - Scan requests, flags and results.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod flags;
mod request;
mod result;

// Re-export all domain types
pub use flags::{ResultFormat, ScanFlags};
pub use request::{ScanRequest, ScanTarget};
pub use result::ScanResult;
