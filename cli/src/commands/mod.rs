//! Subcommand implementations.

pub mod config;
pub mod load_db;
pub mod scan;

/// Engine the scan commands run against.
#[cfg(feature = "native")]
pub type Engine = die_core::NativeEngine;

/// Engine the scan commands run against.
#[cfg(not(feature = "native"))]
pub type Engine = unavailable::Unavailable;

#[cfg(feature = "native")]
pub fn engine() -> anyhow::Result<Engine> {
    Ok(die_core::NativeEngine::new())
}

#[cfg(not(feature = "native"))]
pub fn engine() -> anyhow::Result<Engine> {
    Err(die_core::Error::Unsupported(
        "die-scan was built without libdie; rebuild with `--features native`".to_string(),
    )
    .into())
}

#[cfg(not(feature = "native"))]
mod unavailable {
    use std::ffi::{c_char, c_int, CStr};

    use die_core::DetectEngine;

    /// Stand-in engine for builds without libdie. It cannot be constructed.
    pub enum Unavailable {}

    unsafe impl DetectEngine for Unavailable {
        unsafe fn scan_file(&self, _: &CStr, _: u32, _: Option<&CStr>) -> *const c_char {
            match *self {}
        }

        unsafe fn scan_memory(&self, _: &[u8], _: u32, _: Option<&CStr>) -> *const c_char {
            match *self {}
        }

        fn load_database(&self, _: &CStr) -> c_int {
            match *self {}
        }

        unsafe fn free_memory(&self, _: *const c_char) {
            match *self {}
        }
    }
}
