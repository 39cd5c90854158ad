//! Provider snapshot files.
//!
//! The snapshot file is the JSON form of a provider snapshot. Fields the relay
//! configuration already knows (run name, chain) are optional, and so is the
//! gas price, which is estimated from the node when absent.

use alloy_primitives::U256;
use relay_config::Config;
use relay_types::{ProviderSnapshot, WalletData};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
	#[error("Failed to read snapshot: {0}")]
	Io(#[from] std::io::Error),
	#[error("Failed to parse snapshot: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("Snapshot is for chain {snapshot} but the relay is configured for chain {configured}")]
	ChainMismatch { snapshot: u64, configured: u64 },
}

/// Snapshot as read from disk.
#[derive(Debug, Deserialize)]
pub struct SnapshotFile {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub chain_id: Option<u64>,
	#[serde(default)]
	pub gas_price: Option<U256>,
	#[serde(default)]
	pub wallet_data_by_index: BTreeMap<String, WalletData>,
}

impl SnapshotFile {
	pub async fn load(path: &Path) -> Result<Self, SnapshotError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Completes the snapshot with configured defaults and the gas price to
	/// use for the run.
	pub fn into_snapshot(
		self,
		config: &Config,
		gas_price: U256,
	) -> Result<ProviderSnapshot, SnapshotError> {
		let configured = config.network.chain_id;
		let chain_id = self.chain_id.unwrap_or(configured);
		if chain_id != configured {
			return Err(SnapshotError::ChainMismatch {
				snapshot: chain_id,
				configured,
			});
		}

		Ok(ProviderSnapshot {
			name: self.name.unwrap_or_else(|| config.relay.name.clone()),
			chain_id,
			gas_price,
			wallet_data_by_index: self.wallet_data_by_index,
		})
	}
}

impl FromStr for SnapshotFile {
	type Err = SnapshotError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(serde_json::from_str(s)?)
	}
}
