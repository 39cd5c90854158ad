//! Alloy-based contract binding for EVM chains.
//!
//! Each bound handle owns a provider whose wallet holds exactly one signer, so
//! transactions sent through the handle are always signed by the wallet index
//! the handle was bound for.

use crate::{ContractCall, ContractFactory, ContractHandle, DeliveryError};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, B256, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport_http::Http;
use async_trait::async_trait;
use relay_types::TransactionOptions;
use std::sync::Arc;

type HttpProvider = Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>;

/// Factory binding the Airnode contract to per-wallet signers over HTTP.
pub struct AlloyContractFactory {
	rpc_url: reqwest::Url,
	chain_id: u64,
	/// Unsigned provider used for chain reads.
	provider: HttpProvider,
}

impl AlloyContractFactory {
	/// Creates a new factory for the chain served at `rpc_url`.
	pub fn new(rpc_url: &str, chain_id: u64) -> Result<Self, DeliveryError> {
		let url: reqwest::Url = rpc_url.parse().map_err(|e| {
			DeliveryError::Network(format!("Invalid RPC URL for chain {}: {}", chain_id, e))
		})?;

		let provider = ProviderBuilder::new().on_http(url.clone());

		Ok(Self {
			rpc_url: url,
			chain_id,
			provider: Arc::new(provider) as HttpProvider,
		})
	}

	/// Gets the current gas price of the chain in wei.
	pub async fn gas_price(&self) -> Result<U256, DeliveryError> {
		let gas_price = self
			.provider
			.get_gas_price()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get gas price: {}", e)))?;

		Ok(U256::from(gas_price))
	}
}

impl ContractFactory for AlloyContractFactory {
	fn bind(
		&self,
		contract_address: Address,
		signer: PrivateKeySigner,
	) -> Result<Arc<dyn ContractHandle>, DeliveryError> {
		let signer_address = signer.address();
		let wallet = EthereumWallet::from(signer.with_chain_id(Some(self.chain_id)));

		let provider = ProviderBuilder::new()
			.with_recommended_fillers()
			.wallet(wallet)
			.on_http(self.rpc_url.clone());

		Ok(Arc::new(AlloyContract {
			address: contract_address,
			signer_address,
			provider: Arc::new(provider) as HttpProvider,
		}))
	}
}

/// Airnode contract bound to a single signing wallet.
pub struct AlloyContract {
	address: Address,
	signer_address: Address,
	provider: HttpProvider,
}

#[async_trait]
impl ContractHandle for AlloyContract {
	fn address(&self) -> Address {
		self.address
	}

	fn signer_address(&self) -> Address {
		self.signer_address
	}

	async fn send(
		&self,
		call: ContractCall,
		options: &TransactionOptions,
	) -> Result<B256, DeliveryError> {
		let request = build_transaction(self.signer_address, self.address, call, options);

		// The provider's wallet signs with the bound key
		let pending_tx = self
			.provider
			.send_transaction(request)
			.await
			.map_err(|e| {
				DeliveryError::TransactionFailed(format!("Failed to send transaction: {}", e))
			})?;

		let tx_hash = *pending_tx.tx_hash();
		tracing::info!(
			tx_hash = %tx_hash,
			chain_id = options.chain_id,
			signer = %self.signer_address,
			"Submitted transaction"
		);

		Ok(tx_hash)
	}

	async fn get_balance(&self, address: Address) -> Result<U256, DeliveryError> {
		self.provider
			.get_balance(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get balance: {}", e)))
	}
}

/// Builds a legacy-priced transaction for `call` sent from `from` to `to`.
fn build_transaction(
	from: Address,
	to: Address,
	call: ContractCall,
	options: &TransactionOptions,
) -> TransactionRequest {
	TransactionRequest::default()
		.from(from)
		.to(to)
		.input(call.input.into())
		.value(call.value)
		.gas_limit(call.gas_limit)
		.with_gas_price(options.gas_price.saturating_to::<u128>())
}
