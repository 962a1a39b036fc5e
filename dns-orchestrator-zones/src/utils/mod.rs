//! Utility modules.

/// Serde helpers for zone timestamps.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
