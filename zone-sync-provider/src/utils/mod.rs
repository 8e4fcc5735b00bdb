//! Utility modules.

/// Date/time serialization helpers for provider records.
pub mod datetime;

/// Log sanitization utilities to prevent record content and bodies flooding logs.
pub mod log_sanitizer;
