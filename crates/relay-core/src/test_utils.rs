use alloy_primitives::{address, Address, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use relay_account::{parse_wallet_index, AccountError, SignerDerivation};
use relay_delivery::{
	ContractCall, ContractFactory, ContractHandle, DeliveryError, RequestSubmitter,
	SubmissionOutcome,
};
use relay_types::{
	ApiCall, GroupedRequests, PendingLog, PendingRequest, ProviderSnapshot,
	TransactionOptions, WalletData, WalletDesignation, Withdrawal,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;
use tracing::subscriber::DefaultGuard;
use tracing::Level;

use crate::PendingLogSink;

pub const AIRNODE_ADDRESS: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const CHAIN_ID: u64 = 31337;
pub const RUN_NAME: &str = "provider-a";

fn key_for(index: u32) -> B256 {
	B256::left_padding_from(&(index + 1).to_be_bytes())
}

pub fn signer_address(index: u32) -> Address {
	PrivateKeySigner::from_bytes(&key_for(index))
		.unwrap()
		.address()
}

/// Derives a distinct fixed key per index, failing for the listed indices.
pub struct ScriptedDerivation {
	failing: HashSet<String>,
}

impl ScriptedDerivation {
	pub fn failing(indices: &[&str]) -> Self {
		Self {
			failing: indices.iter().map(|index| index.to_string()).collect(),
		}
	}
}

impl SignerDerivation for ScriptedDerivation {
	fn derive(&self, wallet_index: &str) -> Result<PrivateKeySigner, AccountError> {
		if self.failing.contains(wallet_index) {
			return Err(AccountError::Derivation(
				"hardware wallet unavailable".to_string(),
			));
		}
		let index = parse_wallet_index(wallet_index)?;
		PrivateKeySigner::from_bytes(&key_for(index))
			.map_err(|e| AccountError::Derivation(e.to_string()))
	}
}

/// Contract handle that never reaches a node.
pub struct StubContract {
	address: Address,
	signer: Address,
}

#[async_trait]
impl ContractHandle for StubContract {
	fn address(&self) -> Address {
		self.address
	}

	fn signer_address(&self) -> Address {
		self.signer
	}

	async fn send(
		&self,
		_call: ContractCall,
		_options: &TransactionOptions,
	) -> Result<B256, DeliveryError> {
		Err(DeliveryError::Network("stub contract".to_string()))
	}

	async fn get_balance(&self, _address: Address) -> Result<U256, DeliveryError> {
		Err(DeliveryError::Network("stub contract".to_string()))
	}
}

#[derive(Default)]
pub struct StubFactory {
	bind_error: Option<String>,
	bound: Mutex<Vec<Address>>,
}

impl StubFactory {
	/// Factory refusing every bind with `reason`.
	pub fn failing(reason: &str) -> Self {
		Self {
			bind_error: Some(reason.to_string()),
			..Default::default()
		}
	}

	/// Signer addresses bound so far, in bind order.
	pub fn bound(&self) -> Vec<Address> {
		self.bound.lock().unwrap().clone()
	}
}

impl ContractFactory for StubFactory {
	fn bind(
		&self,
		contract_address: Address,
		signer: PrivateKeySigner,
	) -> Result<Arc<dyn ContractHandle>, DeliveryError> {
		if let Some(reason) = &self.bind_error {
			return Err(DeliveryError::Network(reason.clone()));
		}
		self.bound.lock().unwrap().push(signer.address());
		Ok(Arc::new(StubContract {
			address: contract_address,
			signer: signer.address(),
		}))
	}
}

/// What the scripted submitter returns for a request id.
#[derive(Clone)]
pub enum Script {
	Data(String),
	Error(String),
	ErrorWithData(String, String),
	Nothing,
}

/// Submitter returning scripted outcomes and recording who submitted what.
#[derive(Default)]
pub struct ScriptedSubmitter {
	scripts: HashMap<String, Script>,
	calls: Mutex<Vec<(String, Address)>>,
	barrier: Option<Arc<Barrier>>,
}

impl ScriptedSubmitter {
	pub fn new(scripts: Vec<(&str, Script)>) -> Self {
		Self {
			scripts: scripts
				.into_iter()
				.map(|(id, script)| (id.to_string(), script))
				.collect(),
			..Default::default()
		}
	}

	/// Makes every submission wait until `parties` submissions are in flight.
	pub fn with_barrier(mut self, parties: usize) -> Self {
		self.barrier = Some(Arc::new(Barrier::new(parties)));
		self
	}

	/// Request ids and signing wallets seen so far.
	pub fn calls(&self) -> Vec<(String, Address)> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl RequestSubmitter for ScriptedSubmitter {
	async fn submit(
		&self,
		contract: &dyn ContractHandle,
		request: &PendingRequest,
		_options: &TransactionOptions,
	) -> SubmissionOutcome {
		self.calls
			.lock()
			.unwrap()
			.push((request.id().to_string(), contract.signer_address()));

		if let Some(barrier) = &self.barrier {
			barrier.wait().await;
		}

		let logs = vec![PendingLog::info(format!("Submitting {}", request.id()))];
		let script = self
			.scripts
			.get(request.id())
			.cloned()
			.unwrap_or_else(|| Script::Data(format!("tx-{}", request.id())));

		match script {
			Script::Data(data) => SubmissionOutcome {
				logs,
				error: None,
				data: Some(data),
			},
			Script::Error(reason) => {
				SubmissionOutcome::failed(logs, DeliveryError::Rejected(reason))
			}
			Script::ErrorWithData(reason, data) => SubmissionOutcome {
				logs,
				error: Some(DeliveryError::Rejected(reason)),
				data: Some(data),
			},
			Script::Nothing => SubmissionOutcome::skipped(logs),
		}
	}
}

/// Log sink keeping every batch it receives.
#[derive(Default)]
pub struct RecordingSink {
	batches: Mutex<Vec<(String, Vec<PendingLog>)>>,
}

impl RecordingSink {
	pub fn batches(&self) -> Vec<(String, Vec<PendingLog>)> {
		self.batches.lock().unwrap().clone()
	}
}

impl PendingLogSink for RecordingSink {
	fn log_pending(&self, run_name: &str, logs: &[PendingLog]) {
		self.batches
			.lock()
			.unwrap()
			.push((run_name.to_string(), logs.to_vec()));
	}
}

pub fn contract_addresses() -> HashMap<u64, Address> {
	HashMap::from([(CHAIN_ID, AIRNODE_ADDRESS)])
}

pub fn api_call(id: &str) -> ApiCall {
	ApiCall {
		id: id.to_string(),
		fulfill_address: Address::repeat_byte(0x01),
		fulfill_function_id: Default::default(),
		error_address: Address::repeat_byte(0x01),
		error_function_id: Default::default(),
		response_value: Some(B256::repeat_byte(0x02)),
		error_code: None,
	}
}

pub fn withdrawal(id: &str) -> Withdrawal {
	Withdrawal {
		id: id.to_string(),
		provider_id: B256::repeat_byte(0x03),
		requester_index: U256::from(1),
		designated_wallet: Address::repeat_byte(0x04),
		destination_address: Address::repeat_byte(0x05),
	}
}

pub fn designation(id: &str) -> WalletDesignation {
	WalletDesignation {
		id: id.to_string(),
		provider_id: B256::repeat_byte(0x03),
		requester_index: U256::from(1),
		wallet_index: U256::from(7),
	}
}

pub fn wallet(requests: GroupedRequests) -> WalletData {
	WalletData {
		address: None,
		requests,
	}
}

pub fn snapshot(wallets: Vec<(&str, GroupedRequests)>) -> ProviderSnapshot {
	ProviderSnapshot {
		name: RUN_NAME.to_string(),
		chain_id: CHAIN_ID,
		gas_price: U256::from(20_000_000_000u64),
		wallet_data_by_index: wallets
			.into_iter()
			.map(|(index, requests)| (index.to_string(), wallet(requests)))
			.collect(),
	}
}

/// Output of a tracing subscriber scoped to the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
	/// Captures events up to `max_level` until the guard is dropped.
	pub fn install(max_level: Level) -> (Self, DefaultGuard) {
		let logs = Self::default();
		let writer = logs.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_writer(move || writer.clone())
			.with_max_level(max_level)
			.with_ansi(false)
			.without_time()
			.finish();
		(logs, tracing::subscriber::set_default(subscriber))
	}

	pub fn lines(&self) -> Vec<String> {
		String::from_utf8_lossy(&self.0.lock().unwrap())
			.lines()
			.map(str::to_string)
			.collect()
	}
}

impl std::io::Write for CapturedLogs {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}
