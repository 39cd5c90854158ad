//! Forwarding of buffered submitter logs.

use relay_types::{LogLevel, PendingLog};

/// Destination for the log entries a submitter buffered for one request.
pub trait PendingLogSink: Send + Sync {
	/// Emits `logs` tagged with the name of the run that produced them.
	fn log_pending(&self, run_name: &str, logs: &[PendingLog]);
}

/// Sink emitting each entry as a tracing event at its own level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl PendingLogSink for TracingLogSink {
	fn log_pending(&self, run_name: &str, logs: &[PendingLog]) {
		for log in logs {
			match log.level {
				LogLevel::Debug => tracing::debug!(run = %run_name, "{}", log.message),
				LogLevel::Info => tracing::info!(run = %run_name, "{}", log.message),
				LogLevel::Warn => tracing::warn!(run = %run_name, "{}", log.message),
				LogLevel::Error => tracing::error!(run = %run_name, "{}", log.message),
			}
		}
	}
}
