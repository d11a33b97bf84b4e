//! Adapters layer - External system implementations.
//!
//! `boundary` moves requests and reports across a
//! [`DetectEngine`](crate::ports::DetectEngine); `native` is the engine
//! backed by the linked library.

pub mod boundary;

#[cfg(feature = "native")]
pub mod native;

#[cfg(test)]
pub(crate) mod fake;

// Re-export main types for convenience
#[cfg(feature = "native")]
pub use native::NativeEngine;
