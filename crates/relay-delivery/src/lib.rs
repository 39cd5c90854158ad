//! Transaction delivery module for the relay system.
//!
//! This module turns pending requests into signed transactions against the
//! Airnode contract. It defines the contract handle abstraction used to send
//! transactions from a specific wallet, the factory that binds handles to
//! signers, and the per-kind submitters that build the calldata.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use relay_types::{PendingLog, PendingRequest, TransactionOptions};
use std::sync::Arc;
use thiserror::Error;

pub mod abi;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Kind-specific submitters.
pub mod submitters {
	pub mod api_calls;
	pub mod wallet_designations;
	pub mod withdrawals;
}

pub use submitters::api_calls::submit_api_call;
pub use submitters::wallet_designations::submit_wallet_designation;
pub use submitters::withdrawals::submit_withdrawal;

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the node rejects a transaction.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// The node refused the transaction; carries the node's reason verbatim.
	#[error("{0}")]
	Rejected(String),
	/// The wallet cannot pay for the transaction it is asked to send.
	#[error("Insufficient funds: balance {balance} does not cover transaction cost {cost}")]
	InsufficientFunds { balance: U256, cost: U256 },
	/// The request record cannot be encoded into a transaction.
	#[error("Invalid request: {0}")]
	InvalidRequest(String),
}

/// A contract call ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
	/// ABI-encoded calldata.
	pub input: Bytes,
	/// Native value transferred with the call, in wei.
	pub value: U256,
	pub gas_limit: u64,
}

/// A contract bound to a single signing wallet.
///
/// Every transaction sent through a handle is signed by the wallet it was
/// bound to in [`ContractFactory::bind`].
#[async_trait]
pub trait ContractHandle: Send + Sync {
	/// Address of the bound contract.
	fn address(&self) -> Address;

	/// Address of the wallet signing transactions for this handle.
	fn signer_address(&self) -> Address;

	/// Signs and broadcasts a call, returning the transaction hash.
	///
	/// Does not wait for the transaction to be mined.
	async fn send(
		&self,
		call: ContractCall,
		options: &TransactionOptions,
	) -> Result<B256, DeliveryError>;

	/// Returns the native balance of an address in wei.
	async fn get_balance(&self, address: Address) -> Result<U256, DeliveryError>;
}

/// Trait for binding contract handles to signing identities.
pub trait ContractFactory: Send + Sync {
	/// Binds the contract at `contract_address` to `signer`.
	fn bind(
		&self,
		contract_address: Address,
		signer: PrivateKeySigner,
	) -> Result<Arc<dyn ContractHandle>, DeliveryError>;
}

/// What happened when a single request was submitted.
///
/// `logs` is always populated with what the submitter did, whatever the
/// result. A submission that neither failed nor produced data means there was
/// nothing to send for the request.
#[derive(Debug, Default)]
pub struct SubmissionOutcome {
	pub logs: Vec<PendingLog>,
	pub error: Option<DeliveryError>,
	/// Hash of the submitted transaction, 0x-prefixed.
	pub data: Option<String>,
}

impl SubmissionOutcome {
	pub fn submitted(logs: Vec<PendingLog>, tx_hash: B256) -> Self {
		Self {
			logs,
			error: None,
			data: Some(tx_hash.to_string()),
		}
	}

	pub fn failed(logs: Vec<PendingLog>, error: DeliveryError) -> Self {
		Self {
			logs,
			error: Some(error),
			data: None,
		}
	}

	pub fn skipped(logs: Vec<PendingLog>) -> Self {
		Self {
			logs,
			error: None,
			data: None,
		}
	}
}

/// Trait for submitting a pending request through a bound contract.
#[async_trait]
pub trait RequestSubmitter: Send + Sync {
	/// Submits one request. Never panics and never retries; every failure is
	/// reported through the returned outcome.
	async fn submit(
		&self,
		contract: &dyn ContractHandle,
		request: &PendingRequest,
		options: &TransactionOptions,
	) -> SubmissionOutcome;
}

/// Gas limits used per request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasLimits {
	pub api_call: u64,
	pub withdrawal: u64,
	pub wallet_designation: u64,
}

impl Default for GasLimits {
	fn default() -> Self {
		Self {
			api_call: 500_000,
			withdrawal: 150_000,
			wallet_designation: 150_000,
		}
	}
}

/// Submitter that encodes each request kind into its Airnode contract call.
pub struct ContractSubmitter {
	gas_limits: GasLimits,
}

impl ContractSubmitter {
	pub fn new(gas_limits: GasLimits) -> Self {
		Self { gas_limits }
	}
}

#[async_trait]
impl RequestSubmitter for ContractSubmitter {
	async fn submit(
		&self,
		contract: &dyn ContractHandle,
		request: &PendingRequest,
		options: &TransactionOptions,
	) -> SubmissionOutcome {
		match request {
			PendingRequest::ApiCall(api_call) => {
				submit_api_call(contract, api_call, options, self.gas_limits.api_call).await
			}
			PendingRequest::Withdrawal(withdrawal) => {
				submit_withdrawal(contract, withdrawal, options, self.gas_limits.withdrawal).await
			}
			PendingRequest::WalletDesignation(designation) => {
				submit_wallet_designation(
					contract,
					designation,
					options,
					self.gas_limits.wallet_designation,
				)
				.await
			}
		}
	}
}

/// Parses a request identifier into the bytes32 the contract expects.
pub(crate) fn parse_request_id(id: &str) -> Result<B256, DeliveryError> {
	id.parse::<B256>()
		.map_err(|e| DeliveryError::InvalidRequest(format!("Request ID '{}': {}", id, e)))
}

/// Sends a call and folds the result into an outcome, appending a log entry
/// describing what happened.
pub(crate) async fn send_call(
	contract: &dyn ContractHandle,
	call: ContractCall,
	options: &TransactionOptions,
	mut logs: Vec<PendingLog>,
	label: String,
) -> SubmissionOutcome {
	match contract.send(call, options).await {
		Ok(tx_hash) => {
			logs.push(PendingLog::info(format!("{} submitted Tx:{}", label, tx_hash)));
			SubmissionOutcome::submitted(logs, tx_hash)
		}
		Err(e) => {
			logs.push(PendingLog::error(format!("{} failed: {}", label, e)));
			SubmissionOutcome::failed(logs, e)
		}
	}
}


#[cfg(test)]
mod tests {
	use super::test_utils::*;
	use super::*;
	use crate::abi::IAirnode;
	use alloy_primitives::FixedBytes;
	use alloy_sol_types::SolCall;
	use relay_types::{ApiCall, WalletDesignation, Withdrawal};

	#[tokio::test]
	async fn test_contract_submitter_dispatches_by_kind() {
		let signer = Address::repeat_byte(0x01);
		let mut contract = RecordingContract::new(signer);
		contract.balance = Ok(U256::from(10_000_000u64));
		let submitter = ContractSubmitter::new(GasLimits::default());

		let requests = vec![
			PendingRequest::ApiCall(ApiCall {
				id: request_id(1),
				fulfill_address: Address::repeat_byte(0x02),
				fulfill_function_id: FixedBytes::repeat_byte(0x03),
				error_address: Address::repeat_byte(0x02),
				error_function_id: FixedBytes::repeat_byte(0x04),
				response_value: Some(B256::repeat_byte(0x05)),
				error_code: None,
			}),
			PendingRequest::Withdrawal(Withdrawal {
				id: request_id(2),
				provider_id: B256::repeat_byte(0x06),
				requester_index: U256::from(1),
				designated_wallet: signer,
				destination_address: Address::repeat_byte(0x07),
			}),
			PendingRequest::WalletDesignation(WalletDesignation {
				id: request_id(3),
				provider_id: B256::repeat_byte(0x06),
				requester_index: U256::from(1),
				wallet_index: U256::from(9),
			}),
		];

		for request in &requests {
			let outcome = submitter.submit(&contract, request, &options()).await;
			assert!(outcome.error.is_none(), "{:?}", outcome.error);
			assert!(outcome.data.is_some());
			assert!(!outcome.logs.is_empty());
		}

		let selectors: Vec<[u8; 4]> = contract
			.sent()
			.iter()
			.map(|call| call.input[..4].try_into().unwrap())
			.collect();
		assert_eq!(
			selectors,
			vec![
				IAirnode::fulfillCall::SELECTOR,
				IAirnode::fulfillWithdrawalCall::SELECTOR,
				IAirnode::fulfillWalletDesignationCall::SELECTOR,
			]
		);
	}

	#[test]
	fn test_parse_request_id() {
		assert_eq!(
			parse_request_id(&request_id(0xab)).unwrap(),
			B256::repeat_byte(0xab)
		);
		assert!(matches!(
			parse_request_id("0x1234"),
			Err(DeliveryError::InvalidRequest(_))
		));
	}

	#[test]
	fn test_outcome_data_is_prefixed_hash() {
		let outcome = SubmissionOutcome::submitted(vec![], B256::repeat_byte(0x11));
		assert_eq!(outcome.data.as_deref(), Some(request_id(0x11).as_str()));
		assert!(outcome.data.unwrap().starts_with("0x"));
	}
}
