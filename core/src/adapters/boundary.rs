//! Ownership boundary between Rust callers and a [`DetectEngine`].
//!
//! Requests go out as owned, NUL-terminated copies that outlive the call.
//! Reports come back as engine-owned buffers; they are wrapped in a
//! [`ForeignBuffer`] the moment they are seen, copied into a `String`, and
//! handed back to the engine when the guard drops. That happens exactly
//! once per non-null buffer, whether the copy succeeds, fails or panics.

use std::ffi::{CStr, CString};
use std::path::Path;
use std::ptr::NonNull;

use libc::c_char;
use tracing::{debug, warn};

use crate::domain::{ScanFlags, ScanResult, ScanTarget};
use crate::error::{Error, Result};
use crate::ports::DetectEngine;

/// A report buffer still owned by the engine that produced it.
struct ForeignBuffer<'e, E: DetectEngine + ?Sized> {
    engine: &'e E,
    ptr: NonNull<c_char>,
}

impl<'e, E: DetectEngine + ?Sized> ForeignBuffer<'e, E> {
    /// Take charge of a raw scan result. Null means nothing was acquired.
    ///
    /// # Safety
    ///
    /// `raw` must be the return value of a scan call on `engine` that has
    /// not been freed.
    unsafe fn acquire(engine: &'e E, raw: *const c_char) -> Option<Self> {
        NonNull::new(raw.cast_mut()).map(|ptr| Self { engine, ptr })
    }

    fn as_c_str(&self) -> &CStr {
        // SAFETY: the engine contract guarantees a NUL-terminated buffer that
        // stays valid until `free_memory`, which only `drop` calls.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }
}

impl<E: DetectEngine + ?Sized> Drop for ForeignBuffer<'_, E> {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from this engine and the guard is dropped once.
        unsafe { self.engine.free_memory(self.ptr.as_ptr()) }
    }
}

/// Copy a report into memory owned by the caller.
fn copy_report(report: &CStr) -> Result<String> {
    let text = std::str::from_utf8(report.to_bytes())?;
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

/// Turn a raw scan result into a [`ScanResult`], releasing it afterwards.
///
/// # Safety
///
/// Same contract as [`ForeignBuffer::acquire`].
unsafe fn take_report<E, F>(engine: &E, raw: *const c_char, copy: F) -> Result<ScanResult>
where
    E: DetectEngine + ?Sized,
    F: FnOnce(&CStr) -> Result<String>,
{
    let Some(buffer) = ForeignBuffer::acquire(engine, raw) else {
        return Ok(ScanResult::Absent);
    };

    let copied = copy(buffer.as_c_str());
    drop(buffer);

    match copied {
        Ok(report) => Ok(ScanResult::Detected(report)),
        Err(e) => {
            warn!(error = %e, "Failed to copy scan report, buffer released");
            Err(e)
        }
    }
}

/// Build the NUL-terminated form of a path the C API expects.
#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    Ok(CString::new(path.as_os_str().as_bytes())?)
}

/// Build the NUL-terminated form of a path the C API expects.
#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::NonUnicodePath(path.display().to_string()))?;
    Ok(CString::new(text)?)
}

/// Length of an in-memory target as the C API's `u32`.
pub(crate) fn memory_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Overflow { len })
}

/// Run one scan of `target` against `engine`.
///
/// Returns `ScanResult::Absent` when the engine signals no result. Errors
/// only come from this side of the boundary: unrepresentable paths,
/// oversized buffers, or a report that cannot be copied.
pub fn scan_target<E: DetectEngine + ?Sized>(
    engine: &E,
    target: &ScanTarget,
    flags: ScanFlags,
    database: Option<&Path>,
) -> Result<ScanResult> {
    match target {
        ScanTarget::File(path) => scan_path(engine, path, flags, database),
        ScanTarget::Memory(data) => scan_bytes(engine, data, flags, database),
    }
}

/// Scan `path` with a raw flag bitmask and return the report, if any.
pub fn scan_report<E: DetectEngine + ?Sized>(
    engine: &E,
    path: &Path,
    flags: u32,
    database: &Path,
) -> Result<Option<String>> {
    scan_path(engine, path, ScanFlags::from_raw(flags), Some(database)).map(ScanResult::into_report)
}

/// Scan the file at `path`.
pub fn scan_path<E: DetectEngine + ?Sized>(
    engine: &E,
    path: &Path,
    flags: ScanFlags,
    database: Option<&Path>,
) -> Result<ScanResult> {
    let database = database.map(path_to_cstring).transpose()?;
    let file = path_to_cstring(path)?;

    // SAFETY: `take_report` releases the result, and nothing else sees it.
    let result = unsafe {
        let raw = engine.scan_file(&file, flags.bits(), database.as_deref());
        take_report(engine, raw, copy_report)?
    };
    if result.is_absent() {
        debug!(path = %path.display(), flags = flags.bits(), "No detection result");
    }
    Ok(result)
}

/// Scan `data` in place.
pub fn scan_bytes<E: DetectEngine + ?Sized>(
    engine: &E,
    data: &[u8],
    flags: ScanFlags,
    database: Option<&Path>,
) -> Result<ScanResult> {
    memory_len(data.len())?;
    let database = database.map(path_to_cstring).transpose()?;

    // SAFETY: `take_report` releases the result, and nothing else sees it.
    let result = unsafe {
        let raw = engine.scan_memory(data, flags.bits(), database.as_deref());
        take_report(engine, raw, copy_report)?
    };
    if result.is_absent() {
        debug!(len = data.len(), flags = flags.bits(), "No detection result");
    }
    Ok(result)
}

/// Ask `engine` to load the signature database at `path`.
pub fn load_database<E: DetectEngine + ?Sized>(engine: &E, path: &Path) -> Result<()> {
    let database = path_to_cstring(path)?;
    match engine.load_database(&database) {
        0 => Ok(()),
        code => Err(Error::Database { code }),
    }
}
