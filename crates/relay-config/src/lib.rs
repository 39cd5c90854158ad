//! Configuration module for the relay system.
//!
//! This module provides structures and utilities for managing relay
//! configuration. Configuration is loaded from TOML, with `${VAR}` and
//! `${VAR:-default}` placeholders resolved from the environment before
//! parsing, and is validated once parsed.

use alloy_primitives::Address;
use regex::Regex;
use relay_types::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Identity of this relay instance.
	pub relay: RelayConfig,
	/// Chain the relay submits to.
	pub network: NetworkConfig,
	/// Airnode contract address per chain ID.
	#[serde(deserialize_with = "deserialize_contracts")]
	pub contracts: HashMap<u64, Address>,
	/// Key material for signer derivation.
	pub account: AccountConfig,
	/// Transaction delivery settings.
	#[serde(default)]
	pub delivery: DeliveryConfig,
}

/// Configuration specific to the relay instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
	/// Name attached to every forwarded log batch.
	pub name: String,
}

/// Configuration of the target chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
	pub chain_id: u64,
	/// The HTTP(S) RPC endpoint of the chain.
	pub rpc_url: String,
}

/// Configuration for signer derivation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Master mnemonic every wallet index is derived from.
	pub mnemonic: SecretString,
}

/// Configuration for transaction delivery.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
	#[serde(default = "default_api_call_gas_limit")]
	pub api_call_gas_limit: u64,
	#[serde(default = "default_withdrawal_gas_limit")]
	pub withdrawal_gas_limit: u64,
	#[serde(default = "default_wallet_designation_gas_limit")]
	pub wallet_designation_gas_limit: u64,
}

impl Default for DeliveryConfig {
	fn default() -> Self {
		Self {
			api_call_gas_limit: default_api_call_gas_limit(),
			withdrawal_gas_limit: default_withdrawal_gas_limit(),
			wallet_designation_gas_limit: default_wallet_designation_gas_limit(),
		}
	}
}

fn default_api_call_gas_limit() -> u64 {
	500_000
}

fn default_withdrawal_gas_limit() -> u64 {
	150_000
}

fn default_wallet_designation_gas_limit() -> u64 {
	150_000
}

/// Upper bound for any configured gas limit (a full block on mainnet).
const MAX_GAS_LIMIT: u64 = 30_000_000;

/// Deserializes the contract address table.
///
/// TOML table keys are always strings, so chain IDs arrive as string keys and
/// are converted to u64 here.
fn deserialize_contracts<'de, D>(deserializer: D) -> Result<HashMap<u64, Address>, D::Error>
where
	D: Deserializer<'de>,
{
	let string_map: HashMap<String, Address> = HashMap::deserialize(deserializer)?;
	let mut result = HashMap::new();

	for (key, value) in string_map {
		let chain_id = key
			.parse::<u64>()
			.map_err(|e| serde::de::Error::custom(format!("Invalid chain_id '{}': {}", key, e)))?;
		result.insert(chain_id, value);
	}

	Ok(result)
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				}
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Airnode contract address on the configured chain.
	pub fn contract_address(&self) -> Option<Address> {
		self.contracts.get(&self.network.chain_id).copied()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.relay.name.trim().is_empty() {
			return Err(ConfigError::Validation("Relay name cannot be empty".into()));
		}

		if self.network.chain_id == 0 {
			return Err(ConfigError::Validation("Network chain_id cannot be 0".into()));
		}
		if self.network.rpc_url.trim().is_empty() {
			return Err(ConfigError::Validation("Network rpc_url cannot be empty".into()));
		}

		if self.contract_address().is_none() {
			return Err(ConfigError::Validation(format!(
				"No contract address configured for chain {}",
				self.network.chain_id
			)));
		}

		if self.account.mnemonic.is_blank() {
			return Err(ConfigError::Validation("Account mnemonic cannot be empty".into()));
		}

		let gas_limits = [
			("api_call_gas_limit", self.delivery.api_call_gas_limit),
			("withdrawal_gas_limit", self.delivery.withdrawal_gas_limit),
			(
				"wallet_designation_gas_limit",
				self.delivery.wallet_designation_gas_limit,
			),
		];
		for (name, limit) in gas_limits {
			if limit == 0 {
				return Err(ConfigError::Validation(format!(
					"Delivery {} must be greater than 0",
					name
				)));
			}
			if limit > MAX_GAS_LIMIT {
				return Err(ConfigError::Validation(format!(
					"Delivery {} cannot exceed {}",
					name, MAX_GAS_LIMIT
				)));
			}
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved and the configuration is validated
/// after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
