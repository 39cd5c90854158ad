//! API call submission.
//!
//! An API call is either fulfilled with the response the provider computed or
//! failed with an error code, depending on what the snapshot recorded.

use crate::abi::{encode_error_call, IAirnode};
use crate::{parse_request_id, send_call, ContractCall, ContractHandle, SubmissionOutcome};
use alloy_primitives::U256;
use alloy_sol_types::SolCall;
use relay_types::{truncate_id, ApiCall, PendingLog, TransactionOptions};

/// Status code reported with every successful fulfillment.
const STATUS_OK: u64 = 0;

/// Submits the fulfillment or failure transaction for an API call.
pub async fn submit_api_call(
	contract: &dyn ContractHandle,
	api_call: &ApiCall,
	options: &TransactionOptions,
	gas_limit: u64,
) -> SubmissionOutcome {
	let request_id = match parse_request_id(&api_call.id) {
		Ok(request_id) => request_id,
		Err(e) => {
			let log = PendingLog::error(format!("Unable to submit API call: {}", e));
			return SubmissionOutcome::failed(vec![log], e);
		}
	};
	let short_id = truncate_id(&api_call.id);

	if let Some(error_code) = api_call.error_code {
		let input = encode_error_call(&IAirnode::failCall {
			requestId: request_id,
			errorCode: U256::from(error_code),
			errorAddress: api_call.error_address,
			errorFunctionId: api_call.error_function_id,
		});

		let logs = vec![PendingLog::info(format!(
			"Submitting API call fail for Request:{} with error code:{}...",
			short_id, error_code
		))];
		let call = ContractCall {
			input: input.into(),
			value: U256::ZERO,
			gas_limit,
		};
		return send_call(
			contract,
			call,
			options,
			logs,
			format!("API call fail for Request:{}", short_id),
		)
		.await;
	}

	let Some(response) = api_call.response_value else {
		let log = PendingLog::info(format!(
			"API call for Request:{} has no response value or error code to submit",
			short_id
		));
		return SubmissionOutcome::skipped(vec![log]);
	};

	let input = IAirnode::fulfillCall {
		requestId: request_id,
		statusCode: U256::from(STATUS_OK),
		data: response,
		fulfillAddress: api_call.fulfill_address,
		fulfillFunctionId: api_call.fulfill_function_id,
	}
	.abi_encode();

	let logs = vec![PendingLog::info(format!(
		"Submitting API call fulfillment for Request:{}...",
		short_id
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
		format!("API call fulfillment for Request:{}", short_id),
	)
	.await
}
