//! In-process engine for tests.
//!
//! Hands out real heap buffers so the boundary's copy and release paths run
//! against genuine pointers, and records every acquire and release.

use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString};

use libc::{c_char, c_int};
use parking_lot::Mutex;

use crate::ports::DetectEngine;

/// Which scan entry point was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    File,
    Memory,
}

/// One recorded scan call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub kind: CallKind,
    /// Path bytes for file scans, the scanned data for memory scans.
    pub target: Vec<u8>,
    pub flags: u32,
    pub database: Option<Vec<u8>>,
}

#[derive(Default)]
struct Ledger {
    calls: Vec<Call>,
    acquired: Vec<usize>,
    released: Vec<usize>,
    /// Releases of handles that were never handed out or already freed.
    bad_releases: Vec<usize>,
    live: HashSet<usize>,
    loaded: Vec<Vec<u8>>,
}

/// Deterministic engine keyed by scan target.
#[derive(Default)]
pub(crate) struct FakeEngine {
    reports: HashMap<Vec<u8>, Vec<u8>>,
    load_code: c_int,
    ledger: Mutex<Ledger>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `report` whenever `target` (path or data) is scanned.
    pub fn with_report(mut self, target: impl AsRef<[u8]>, report: impl AsRef<[u8]>) -> Self {
        self.reports
            .insert(target.as_ref().to_vec(), report.as_ref().to_vec());
        self
    }

    /// Return `code` from every database load.
    pub fn with_load_code(mut self, code: c_int) -> Self {
        self.load_code = code;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.ledger.lock().calls.clone()
    }

    pub fn acquired(&self) -> Vec<usize> {
        self.ledger.lock().acquired.clone()
    }

    pub fn released(&self) -> Vec<usize> {
        self.ledger.lock().released.clone()
    }

    pub fn bad_releases(&self) -> Vec<usize> {
        self.ledger.lock().bad_releases.clone()
    }

    pub fn loaded(&self) -> Vec<Vec<u8>> {
        self.ledger.lock().loaded.clone()
    }

    fn respond(&self, call: Call) -> *const c_char {
        let report = self.reports.get(&call.target).cloned();
        let mut ledger = self.ledger.lock();
        ledger.calls.push(call);

        let Some(report) = report else {
            return std::ptr::null();
        };

        let raw = CString::new(report)
            .expect("fake reports must not contain NUL")
            .into_raw();
        let handle = raw as usize;
        ledger.acquired.push(handle);
        ledger.live.insert(handle);
        raw
    }
}

unsafe impl DetectEngine for FakeEngine {
    unsafe fn scan_file(&self, file: &CStr, flags: u32, database: Option<&CStr>) -> *const c_char {
        self.respond(Call {
            kind: CallKind::File,
            target: file.to_bytes().to_vec(),
            flags,
            database: database.map(|db| db.to_bytes().to_vec()),
        })
    }

    unsafe fn scan_memory(&self, data: &[u8], flags: u32, database: Option<&CStr>) -> *const c_char {
        self.respond(Call {
            kind: CallKind::Memory,
            target: data.to_vec(),
            flags,
            database: database.map(|db| db.to_bytes().to_vec()),
        })
    }

    fn load_database(&self, database: &CStr) -> c_int {
        self.ledger.lock().loaded.push(database.to_bytes().to_vec());
        self.load_code
    }

    unsafe fn free_memory(&self, buffer: *const c_char) {
        let handle = buffer as usize;
        let mut ledger = self.ledger.lock();
        ledger.released.push(handle);

        if ledger.live.remove(&handle) {
            drop(CString::from_raw(buffer as *mut c_char));
        } else {
            ledger.bad_releases.push(handle);
        }
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        for handle in self.ledger.get_mut().live.drain() {
            // SAFETY: every live handle came from `CString::into_raw` above
            unsafe { drop(CString::from_raw(handle as *mut c_char)) };
        }
    }
}
