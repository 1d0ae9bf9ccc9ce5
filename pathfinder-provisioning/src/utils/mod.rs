//! Utility modules.

/// Parsing of the server's `DateCreated` strings.
pub mod datetime;

/// Truncation of raw documents before they are logged.
pub mod log_sanitizer;
