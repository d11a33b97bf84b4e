//! Detection engine port (interface).

use std::ffi::CStr;

use libc::{c_char, c_int};

/// Port for the external scanning capability.
///
/// This mirrors the `libdie` C API: scan calls hand back either null
/// ("no detection result") or a NUL-terminated buffer the engine still
/// owns, and every non-null buffer goes back through
/// [`free_memory`](DetectEngine::free_memory) exactly once. Callers should
/// not use it directly; the boundary adapter owns that bookkeeping.
///
/// # Safety
///
/// Implementors promise that every non-null pointer returned from a scan
/// call points to a NUL-terminated buffer that stays valid and unmodified
/// until it is passed to `free_memory` on the same engine.
///
/// The scan calls are `unsafe` so a raw buffer can only be obtained by code
/// that takes on the duty to release it:
///
/// ```compile_fail
/// use std::ffi::CStr;
/// use die_core::DetectEngine;
///
/// fn leak<E: DetectEngine>(engine: &E, file: &CStr) {
///     let _ = engine.scan_file(file, 0, None);
/// }
/// ```
pub unsafe trait DetectEngine: Send + Sync {
    /// Scan the file at `file`, with `database` or the engine's default one.
    ///
    /// # Safety
    ///
    /// A non-null result must be passed to [`free_memory`](DetectEngine::free_memory)
    /// on this engine exactly once and not read afterwards.
    unsafe fn scan_file(&self, file: &CStr, flags: u32, database: Option<&CStr>) -> *const c_char;

    /// Scan `data`, with `database` or the engine's default one.
    ///
    /// Returns null when `data` is longer than `u32::MAX` bytes.
    ///
    /// # Safety
    ///
    /// Same contract as [`scan_file`](DetectEngine::scan_file).
    unsafe fn scan_memory(
        &self,
        data: &[u8],
        flags: u32,
        database: Option<&CStr>,
    ) -> *const c_char;

    /// Load a signature database. Zero means success.
    fn load_database(&self, database: &CStr) -> c_int;

    /// Give a buffer back to the engine.
    ///
    /// # Safety
    ///
    /// `buffer` must be a non-null pointer returned by a scan call on this
    /// engine that has not been freed yet.
    unsafe fn free_memory(&self, buffer: *const c_char);
}
