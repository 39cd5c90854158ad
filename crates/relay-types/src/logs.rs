//! Pending log entries.
//!
//! Submitters do not log directly. They buffer what happened while a request
//! was submitted and hand the entries back with the outcome, so the caller can
//! forward every request's diagnostics as a single batch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
	Debug,
	Info,
	Warn,
	Error,
}

/// A buffered diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLog {
	pub level: LogLevel,
	pub message: String,
}

impl PendingLog {
	pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
		}
	}

	pub fn debug(message: impl Into<String>) -> Self {
		Self::new(LogLevel::Debug, message)
	}

	pub fn info(message: impl Into<String>) -> Self {
		Self::new(LogLevel::Info, message)
	}

	pub fn warn(message: impl Into<String>) -> Self {
		Self::new(LogLevel::Warn, message)
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(LogLevel::Error, message)
	}
}
