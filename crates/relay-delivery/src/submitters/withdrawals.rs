//! Withdrawal submission.
//!
//! A withdrawal empties the designated wallet into the requester's
//! destination. The transaction fee is paid from the same balance, so the
//! transferred value is the balance minus `gas_limit * gas_price`.

use crate::abi::IAirnode;
use crate::{
	parse_request_id, send_call, ContractCall, ContractHandle, DeliveryError, SubmissionOutcome,
};
use alloy_primitives::U256;
use alloy_sol_types::SolCall;
use relay_types::{truncate_id, PendingLog, TransactionOptions, Withdrawal};

/// Submits the withdrawal transaction for a request.
pub async fn submit_withdrawal(
	contract: &dyn ContractHandle,
	withdrawal: &Withdrawal,
	options: &TransactionOptions,
	gas_limit: u64,
) -> SubmissionOutcome {
	let short_id = truncate_id(&withdrawal.id);

	let request_id = match parse_request_id(&withdrawal.id) {
		Ok(request_id) => request_id,
		Err(e) => {
			let log = PendingLog::error(format!("Unable to submit withdrawal: {}", e));
			return SubmissionOutcome::failed(vec![log], e);
		}
	};

	if withdrawal.designated_wallet != contract.signer_address() {
		let e = DeliveryError::InvalidRequest(format!(
			"Designated wallet {} does not match signing wallet {}",
			withdrawal.designated_wallet,
			contract.signer_address()
		));
		let log = PendingLog::error(format!("Withdrawal for Request:{} rejected: {}", short_id, e));
		return SubmissionOutcome::failed(vec![log], e);
	}

	let balance = match contract.get_balance(withdrawal.designated_wallet).await {
		Ok(balance) => balance,
		Err(e) => {
			let log = PendingLog::error(format!(
				"Failed to fetch designated wallet balance for Request:{}: {}",
				short_id, e
			));
			return SubmissionOutcome::failed(vec![log], e);
		}
	};

	let cost = U256::from(gas_limit).saturating_mul(options.gas_price);
	if balance <= cost {
		let e = DeliveryError::InsufficientFunds { balance, cost };
		let log = PendingLog::warn(format!(
			"Withdrawal for Request:{} skipped: {}",
			short_id, e
		));
		return SubmissionOutcome::failed(vec![log], e);
	}
	let value = balance - cost;

	let input = IAirnode::fulfillWithdrawalCall {
		withdrawalRequestId: request_id,
		providerId: withdrawal.provider_id,
		requesterIndex: withdrawal.requester_index,
		destination: withdrawal.destination_address,
	}
	.abi_encode();

	let logs = vec![PendingLog::info(format!(
		"Submitting withdrawal of {} wei for Request:{}...",
		value, short_id
	))];
	let call = ContractCall {
		input: input.into(),
		value,
		gas_limit,
	};
	send_call(
		contract,
		call,
		options,
		logs,
		format!("Withdrawal for Request:{}", short_id),
	)
	.await
}
