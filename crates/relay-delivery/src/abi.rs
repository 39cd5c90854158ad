//! Solidity bindings for the Airnode contract.
//!
//! Only the functions the relay submits are declared here. Calldata is built
//! with [`alloy_sol_types::SolCall::abi_encode`] on the generated call structs,
//! except for the error report, see [`encode_error_call`].

use alloy_sol_types::{sol, SolCall};

sol! {
	/// Request-response protocol contract the relay submits to.
	interface IAirnode {
		function fulfill(bytes32 requestId, uint256 statusCode, bytes32 data, address fulfillAddress, bytes4 fulfillFunctionId) external returns (bool callSuccess, bytes callData);
		/// Argument layout of the contract's `error` function. Its own
		/// selector is never sent.
		function fail(bytes32 requestId, uint256 errorCode, address errorAddress, bytes4 errorFunctionId) external;
		function fulfillWithdrawal(bytes32 withdrawalRequestId, bytes32 providerId, uint256 requesterIndex, address destination) external payable;
		function fulfillWalletDesignation(bytes32 walletDesignationRequestId, bytes32 providerId, uint256 requesterIndex, uint256 walletInd) external;
	}
}

/// Signature of the contract function reporting a failed API call.
pub const ERROR_SIGNATURE: &str = "error(bytes32,uint256,address,bytes4)";

/// First four bytes of `keccak256(ERROR_SIGNATURE)`.
pub const ERROR_SELECTOR: [u8; 4] = [0xc9, 0x48, 0x98, 0x98];

/// Encodes a call to the contract's `error(...)` function.
///
/// `error` is a reserved word in Solidity source, so the arguments are
/// encoded through [`IAirnode::failCall`] behind the real selector.
pub fn encode_error_call(call: &IAirnode::failCall) -> Vec<u8> {
	let mut input = ERROR_SELECTOR.to_vec();
	call.abi_encode_raw(&mut input);
	input
}
