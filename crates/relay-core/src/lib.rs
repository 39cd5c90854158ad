//! Core orchestration module for the relay system.
//!
//! A submission pass takes a provider snapshot, builds one signing context per
//! wallet index, submits every pending request of every wallet concurrently and
//! reduces the outcomes into a flat list of receipts. Failures stay local to
//! the request (or, for context failures, the wallet) they belong to.

/// Per-wallet submission contexts.
pub mod context;
/// Forwarding of submitter log entries.
pub mod logging;
/// Fan-out of pending requests and reduction into receipts.
pub mod submission;

pub use context::{ContextBuilder, ContextError, WalletContext};
pub use logging::{PendingLogSink, TracingLogSink};
pub use submission::TransactionSubmitter;

#[cfg(test)]
pub(crate) mod test_utils;
