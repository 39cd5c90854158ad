//! Wallet designation submission.

use crate::abi::IAirnode;
use crate::{parse_request_id, send_call, ContractCall, ContractHandle, SubmissionOutcome};
use alloy_primitives::U256;
use alloy_sol_types::SolCall;
use relay_types::{truncate_id, PendingLog, TransactionOptions, WalletDesignation};

/// Submits the confirmation transaction for a wallet designation.
pub async fn submit_wallet_designation(
	contract: &dyn ContractHandle,
	designation: &WalletDesignation,
	options: &TransactionOptions,
	gas_limit: u64,
) -> SubmissionOutcome {
	let request_id = match parse_request_id(&designation.id) {
		Ok(request_id) => request_id,
		Err(e) => {
			let log = PendingLog::error(format!("Unable to submit wallet designation: {}", e));
			return SubmissionOutcome::failed(vec![log], e);
		}
	};
	let short_id = truncate_id(&designation.id);

	let input = IAirnode::fulfillWalletDesignationCall {
		walletDesignationRequestId: request_id,
		providerId: designation.provider_id,
		requesterIndex: designation.requester_index,
		walletInd: designation.wallet_index,
	}
	.abi_encode();

	let logs = vec![PendingLog::info(format!(
		"Submitting wallet designation of index:{} for Request:{}...",
		designation.wallet_index, short_id
	))];
	let call = ContractCall {
		input: input.into(),
		value: U256::ZERO,
		gas_limit,
	};
	send_call(
		contract,
		call,
		options,
		logs,
		format!("Wallet designation for Request:{}", short_id),
	)
	.await
}
