//! Provider snapshot types.
//!
//! The snapshot is the read-only input of a submission run: which wallets have
//! work to do, on which chain, and at what gas price.

use crate::WalletData;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pending work of a provider at a point in time.
///
/// Wallet indices are kept as strings since they come straight from the
/// derivation path component and are only interpreted by the signer deriver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSnapshot {
	/// Name of the run, attached to every forwarded log batch.
	pub name: String,
	/// Chain the transactions are submitted to.
	pub chain_id: u64,
	/// Gas price shared by every transaction of the run, in wei.
	pub gas_price: U256,
	/// Pending requests per wallet index.
	#[serde(default)]
	pub wallet_data_by_index: BTreeMap<String, WalletData>,
}

impl ProviderSnapshot {
	/// Total number of pending requests across all wallets and kinds.
	pub fn request_count(&self) -> usize {
		self.wallet_data_by_index
			.values()
			.map(|wallet| wallet.requests.len())
			.sum()
	}

	/// Options shared by every submission of this snapshot.
	pub fn transaction_options(&self) -> TransactionOptions {
		TransactionOptions {
			gas_price: self.gas_price,
			chain_id: self.chain_id,
		}
	}
}

/// Options applied to every transaction submitted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOptions {
	/// Gas price in wei.
	pub gas_price: U256,
	/// Chain the transaction is signed for.
	pub chain_id: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GroupedRequests, WalletDesignation};
	use alloy_primitives::B256;

	#[test]
	fn test_request_count_spans_wallets() {
		let designation = WalletDesignation {
			id: "d1".to_string(),
			provider_id: B256::ZERO,
			requester_index: U256::from(1),
			wallet_index: U256::from(2),
		};
		let wallet = WalletData {
			address: None,
			requests: GroupedRequests {
				wallet_designations: vec![designation.clone(), designation],
				..Default::default()
			},
		};

		let mut wallet_data_by_index = BTreeMap::new();
		wallet_data_by_index.insert("0".to_string(), wallet.clone());
		wallet_data_by_index.insert("1".to_string(), wallet);
		wallet_data_by_index.insert("2".to_string(), WalletData::default());

		let snapshot = ProviderSnapshot {
			name: "test-run".to_string(),
			chain_id: 31337,
			gas_price: U256::from(1_000_000_000u64),
			wallet_data_by_index,
		};

		assert_eq!(snapshot.request_count(), 4);
		let options = snapshot.transaction_options();
		assert_eq!(options.chain_id, 31337);
		assert_eq!(options.gas_price, U256::from(1_000_000_000u64));
	}
}
