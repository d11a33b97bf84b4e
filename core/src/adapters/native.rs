//! Engine backed by the linked `libdie`.
//!
//! The library does not document whether it is reentrant, so every call
//! into it (scans, releases, database loads) is serialised behind one
//! process-wide lock.

use std::ffi::CStr;

use libc::{c_char, c_int};
use parking_lot::Mutex;

use crate::adapters::boundary;
use crate::ports::DetectEngine;

static LIBDIE: Mutex<()> = parking_lot::const_mutex(());

/// Handle to the native Detect-It-Easy library.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }
}

// SAFETY: libdie returns NUL-terminated strings it owns until DIE_FreeMemoryA.
unsafe impl DetectEngine for NativeEngine {
    unsafe fn scan_file(&self, file: &CStr, flags: u32, database: Option<&CStr>) -> *const c_char {
        let _guard = LIBDIE.lock();
        match database {
            Some(db) => die_sys::DIE_ScanFileA(file.as_ptr(), flags, db.as_ptr()),
            None => die_sys::DIE_ScanFileExA(file.as_ptr(), flags).cast_const(),
        }
    }

    unsafe fn scan_memory(
        &self,
        data: &[u8],
        flags: u32,
        database: Option<&CStr>,
    ) -> *const c_char {
        let Ok(len) = boundary::memory_len(data.len()) else {
            return std::ptr::null();
        };

        let _guard = LIBDIE.lock();
        let raw = match database {
            Some(db) => die_sys::DIE_ScanMemoryA(data.as_ptr(), len, flags, db.as_ptr()),
            None => die_sys::DIE_ScanMemoryExA(data.as_ptr(), len, flags),
        };
        raw.cast_const()
    }

    fn load_database(&self, database: &CStr) -> c_int {
        let _guard = LIBDIE.lock();
        unsafe { die_sys::DIE_LoadDatabaseA(database.as_ptr()) }
    }

    unsafe fn free_memory(&self, buffer: *const c_char) {
        let _guard = LIBDIE.lock();
        die_sys::DIE_FreeMemoryA(buffer);
    }
}
