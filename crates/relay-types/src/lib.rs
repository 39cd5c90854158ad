//! Common types module for the relay system.
//!
//! This module defines the data types shared by every relay component: the
//! pending requests read from a provider snapshot, the options used when
//! submitting transactions, the diagnostic log entries produced by submitters
//! and the receipts returned to callers.

/// Diagnostic log entries buffered while a request is being submitted.
pub mod logs;
/// Receipts describing the submission outcome of a single request.
pub mod receipt;
/// Pending request records and their per-wallet grouping.
pub mod request;
/// Secure string type for mnemonics and other secrets.
pub mod secret_string;
/// Provider snapshot and shared transaction options.
pub mod snapshot;
/// Formatting helpers used in log output.
pub mod utils;

// Re-export all types for convenient access
pub use logs::*;
pub use receipt::*;
pub use request::*;
pub use secret_string::SecretString;
pub use snapshot::*;
pub use utils::truncate_id;
