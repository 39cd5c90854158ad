//! Receipt types returned by a submission run.

use crate::RequestType;
use serde::{Deserialize, Serialize};

/// Result of submitting a transaction for a request.
///
/// Serialized as either a `data` or an `error` field, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptOutcome {
	/// Transaction data returned by the submitter (the transaction hash).
	Data(String),
	/// Reason the request could not be submitted.
	Error(String),
}

/// Public record of one request's submission outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
	pub id: String,
	#[serde(rename = "type")]
	pub request_type: RequestType,
	#[serde(flatten)]
	pub outcome: ReceiptOutcome,
}

impl Receipt {
	/// Creates a receipt for a successfully submitted request.
	pub fn success(
		id: impl Into<String>,
		request_type: RequestType,
		data: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			request_type,
			outcome: ReceiptOutcome::Data(data.into()),
		}
	}

	/// Creates a receipt for a request that could not be submitted.
	pub fn failure(
		id: impl Into<String>,
		request_type: RequestType,
		error: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			request_type,
			outcome: ReceiptOutcome::Error(error.into()),
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self.outcome, ReceiptOutcome::Data(_))
	}

	pub fn data(&self) -> Option<&str> {
		match &self.outcome {
			ReceiptOutcome::Data(data) => Some(data),
			ReceiptOutcome::Error(_) => None,
		}
	}

	pub fn error(&self) -> Option<&str> {
		match &self.outcome {
			ReceiptOutcome::Data(_) => None,
			ReceiptOutcome::Error(error) => Some(error),
		}
	}
}
