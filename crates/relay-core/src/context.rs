//! Submission context assembly.
//!
//! Each wallet index in a snapshot gets its own context: the signer derived
//! for that index and the Airnode contract bound to it. Contexts are built
//! once per pass and shared by every request of the wallet.

use alloy_primitives::Address;
use relay_account::{AccountError, AccountService};
use relay_delivery::{ContractFactory, ContractHandle, DeliveryError};
use relay_types::{ProviderSnapshot, TransactionOptions};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that prevent a wallet from submitting anything.
#[derive(Debug, Error)]
pub enum ContextError {
	#[error("Failed to derive signing wallet: {0}")]
	Derivation(#[from] AccountError),
	#[error("No Airnode contract configured for chain {0}")]
	UnknownChain(u64),
	#[error("Failed to bind Airnode contract: {0}")]
	Bind(#[from] DeliveryError),
}

/// Everything a wallet needs to submit its pending requests.
pub struct WalletContext {
	pub wallet_index: String,
	pub signer_address: Address,
	/// Contract handle signing with the wallet's key.
	pub contract: Arc<dyn ContractHandle>,
	pub options: TransactionOptions,
}

/// Builds wallet contexts from the configured collaborators.
pub struct ContextBuilder {
	account: Arc<AccountService>,
	contracts: Arc<dyn ContractFactory>,
	/// Airnode contract address per chain id.
	contract_addresses: HashMap<u64, Address>,
}

impl ContextBuilder {
	pub fn new(
		account: Arc<AccountService>,
		contracts: Arc<dyn ContractFactory>,
		contract_addresses: HashMap<u64, Address>,
	) -> Self {
		Self {
			account,
			contracts,
			contract_addresses,
		}
	}

	/// Builds the context for `wallet_index` on the snapshot's chain.
	///
	/// Deterministic: the same index always yields a context signing with the
	/// same key.
	pub fn build(
		&self,
		wallet_index: &str,
		snapshot: &ProviderSnapshot,
	) -> Result<WalletContext, ContextError> {
		let signer = self.account.signer_for(wallet_index)?;
		let signer_address = signer.address();

		let contract_address = self
			.contract_addresses
			.get(&snapshot.chain_id)
			.copied()
			.ok_or(ContextError::UnknownChain(snapshot.chain_id))?;
		let contract = self.contracts.bind(contract_address, signer)?;

		Ok(WalletContext {
			wallet_index: wallet_index.to_string(),
			signer_address,
			contract,
			options: snapshot.transaction_options(),
		})
	}
}
