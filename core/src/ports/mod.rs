//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interface the application layer uses to reach
//! the native scanner. Implementations live in `adapters`.

mod engine;

pub use engine::DetectEngine;
