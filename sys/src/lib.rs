//! Raw bindings to the Detect-It-Easy C API (`die.h`).
//!
//! Nothing here is safe to call directly. `die-core` wraps these entry
//! points behind its `DetectEngine` port and releases every returned
//! buffer exactly once.
//!
//! Every `*A` function takes NUL-terminated narrow strings. Non-null
//! results are owned by the library and must be handed back to
//! [`DIE_FreeMemoryA`]; a null result means "no detection result".

#![allow(non_snake_case)]

use libc::{c_char, c_int};

extern "C" {
    /// Scan a file using the signature database at `db`.
    pub fn DIE_ScanFileA(fname: *const c_char, flags: u32, db: *const c_char) -> *const c_char;

    /// Scan a file using the library's default database.
    pub fn DIE_ScanFileExA(fname: *const c_char, flags: u32) -> *mut c_char;

    /// Scan `len` bytes at `mem` using the signature database at `db`.
    pub fn DIE_ScanMemoryA(mem: *const u8, len: u32, flags: u32, db: *const c_char)
        -> *mut c_char;

    /// Scan `len` bytes at `mem` using the library's default database.
    pub fn DIE_ScanMemoryExA(mem: *const u8, len: u32, flags: u32) -> *mut c_char;

    /// Load a signature database. Returns 0 on success.
    pub fn DIE_LoadDatabaseA(db: *const c_char) -> c_int;

    /// Release a buffer returned by one of the scan functions.
    pub fn DIE_FreeMemoryA(str: *const c_char);
}
