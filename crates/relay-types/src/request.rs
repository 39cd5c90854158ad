//! Pending request types for the relay system.
//!
//! A provider snapshot groups pending requests per wallet index into three
//! collections, one per request kind. The orchestrator flattens them into
//! [`PendingRequest`] values so every request is dispatched the same way.

use alloy_primitives::{Address, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of on-chain transaction a pending request requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
	/// Fulfillment (or error report) for an API call request.
	ApiCall,
	/// Withdrawal of funds from a designated wallet.
	Withdrawal,
	/// Confirmation of a wallet designation.
	WalletDesignation,
}

impl fmt::Display for RequestType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RequestType::ApiCall => write!(f, "ApiCall"),
			RequestType::Withdrawal => write!(f, "Withdrawal"),
			RequestType::WalletDesignation => write!(f, "WalletDesignation"),
		}
	}
}

/// An API call waiting to be fulfilled on-chain.
///
/// Exactly one of `error_code` or `response_value` is normally set by the
/// process that built the snapshot. When neither is present there is nothing
/// to submit for the request yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCall {
	/// Unique request identifier (32 byte hex string).
	pub id: String,
	/// Contract that receives the fulfillment callback.
	pub fulfill_address: Address,
	/// Selector of the fulfillment callback.
	pub fulfill_function_id: FixedBytes<4>,
	/// Contract that receives the error callback.
	pub error_address: Address,
	/// Selector of the error callback.
	pub error_function_id: FixedBytes<4>,
	/// ABI-encoded response to deliver.
	#[serde(default)]
	pub response_value: Option<B256>,
	/// Error code to report instead of a response.
	#[serde(default)]
	pub error_code: Option<u64>,
}

/// A request to withdraw the funds held by a designated wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
	/// Unique request identifier (32 byte hex string).
	pub id: String,
	pub provider_id: B256,
	pub requester_index: U256,
	/// Wallet whose balance is withdrawn.
	pub designated_wallet: Address,
	/// Address receiving the withdrawn funds.
	pub destination_address: Address,
}

/// A request to confirm that a wallet index was designated to a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletDesignation {
	/// Unique request identifier (32 byte hex string).
	pub id: String,
	pub provider_id: B256,
	pub requester_index: U256,
	/// Wallet index assigned to the requester.
	pub wallet_index: U256,
}

/// A single pending request of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
	ApiCall(ApiCall),
	Withdrawal(Withdrawal),
	WalletDesignation(WalletDesignation),
}

impl PendingRequest {
	/// Returns the unique identifier of the request.
	pub fn id(&self) -> &str {
		match self {
			PendingRequest::ApiCall(api_call) => &api_call.id,
			PendingRequest::Withdrawal(withdrawal) => &withdrawal.id,
			PendingRequest::WalletDesignation(designation) => &designation.id,
		}
	}

	/// Returns the kind of transaction the request requires.
	pub fn request_type(&self) -> RequestType {
		match self {
			PendingRequest::ApiCall(_) => RequestType::ApiCall,
			PendingRequest::Withdrawal(_) => RequestType::Withdrawal,
			PendingRequest::WalletDesignation(_) => RequestType::WalletDesignation,
		}
	}
}

/// Pending requests of one wallet, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedRequests {
	#[serde(default)]
	pub api_calls: Vec<ApiCall>,
	#[serde(default)]
	pub withdrawals: Vec<Withdrawal>,
	#[serde(default)]
	pub wallet_designations: Vec<WalletDesignation>,
}

impl GroupedRequests {
	/// Total number of pending requests across all kinds.
	pub fn len(&self) -> usize {
		self.api_calls.len() + self.withdrawals.len() + self.wallet_designations.len()
	}

	/// Returns true if there is nothing to submit.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Flattens the groups into individual pending requests.
	///
	/// API calls come first, then withdrawals, then wallet designations. Within
	/// each kind the snapshot order is preserved.
	pub fn pending(&self) -> impl Iterator<Item = PendingRequest> + '_ {
		let api_calls = self.api_calls.iter().cloned().map(PendingRequest::ApiCall);
		let withdrawals = self
			.withdrawals
			.iter()
			.cloned()
			.map(PendingRequest::Withdrawal);
		let designations = self
			.wallet_designations
			.iter()
			.cloned()
			.map(PendingRequest::WalletDesignation);

		api_calls.chain(withdrawals).chain(designations)
	}
}

/// Everything the snapshot knows about a single derived wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletData {
	/// Address the snapshot expects for the wallet. The derived signer stays
	/// authoritative; a mismatch is only logged.
	#[serde(default)]
	pub address: Option<Address>,
	/// Requests that must be submitted from this wallet.
	#[serde(default)]
	pub requests: GroupedRequests,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn withdrawal(id: &str) -> Withdrawal {
		Withdrawal {
			id: id.to_string(),
			provider_id: B256::ZERO,
			requester_index: U256::from(1),
			designated_wallet: Address::ZERO,
			destination_address: Address::ZERO,
		}
	}

	fn designation(id: &str) -> WalletDesignation {
		WalletDesignation {
			id: id.to_string(),
			provider_id: B256::ZERO,
			requester_index: U256::from(1),
			wallet_index: U256::from(3),
		}
	}

	fn api_call(id: &str) -> ApiCall {
		ApiCall {
			id: id.to_string(),
			fulfill_address: Address::ZERO,
			fulfill_function_id: FixedBytes::ZERO,
			error_address: Address::ZERO,
			error_function_id: FixedBytes::ZERO,
			response_value: None,
			error_code: None,
		}
	}

	#[test]
	fn test_pending_order_and_kinds() {
		let requests = GroupedRequests {
			api_calls: vec![api_call("a1"), api_call("a2")],
			withdrawals: vec![withdrawal("w1")],
			wallet_designations: vec![designation("d1")],
		};

		assert_eq!(requests.len(), 4);
		let flattened: Vec<(String, RequestType)> = requests
			.pending()
			.map(|request| (request.id().to_string(), request.request_type()))
			.collect();

		assert_eq!(
			flattened,
			vec![
				("a1".to_string(), RequestType::ApiCall),
				("a2".to_string(), RequestType::ApiCall),
				("w1".to_string(), RequestType::Withdrawal),
				("d1".to_string(), RequestType::WalletDesignation),
			]
		);
	}

	#[test]
	fn test_empty_groups() {
		let requests = GroupedRequests::default();
		assert!(requests.is_empty());
		assert_eq!(requests.pending().count(), 0);
	}

	#[test]
	fn test_wallet_data_defaults_missing_groups() {
		let json = r#"{
			"requests": {
				"withdrawals": [{
					"id": "0x01",
					"provider_id": "0x0000000000000000000000000000000000000000000000000000000000000000",
					"requester_index": "0x1",
					"designated_wallet": "0x0000000000000000000000000000000000000000",
					"destination_address": "0x0000000000000000000000000000000000000000"
				}]
			}
		}"#;

		let wallet: WalletData = serde_json::from_str(json).unwrap();
		assert!(wallet.address.is_none());
		assert!(wallet.requests.api_calls.is_empty());
		assert_eq!(wallet.requests.withdrawals, vec![withdrawal("0x01")]);
	}
}
