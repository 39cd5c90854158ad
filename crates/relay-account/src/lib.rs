//! Account management module for the relay system.
//!
//! Every wallet index in a provider snapshot maps to its own signing key. This
//! module defines the interface used to derive those keys and a service that
//! wraps the configured implementation.

use alloy_signer_local::PrivateKeySigner;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod mnemonic;
}

/// Errors that can occur while deriving a signing identity.
#[derive(Debug, Error)]
pub enum AccountError {
	/// The wallet index is not a valid non-hardened derivation index.
	#[error("Invalid wallet index '{0}'")]
	InvalidIndex(String),
	/// The key material could not be turned into a signer.
	#[error("Derivation failed: {0}")]
	Derivation(String),
}

/// Trait defining how signing identities are derived from wallet indices.
///
/// Implementations must be deterministic: deriving the same index twice
/// yields the same key.
pub trait SignerDerivation: Send + Sync {
	/// Derives the signer bound to `wallet_index`.
	fn derive(&self, wallet_index: &str) -> Result<PrivateKeySigner, AccountError>;
}

/// Service that manages signing identity derivation.
pub struct AccountService {
	/// The underlying derivation implementation.
	implementation: Box<dyn SignerDerivation>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn SignerDerivation>) -> Self {
		Self { implementation }
	}

	/// Derives the signing identity for a wallet index.
	///
	/// Failures are returned as-is; retrying is left to the caller.
	pub fn signer_for(&self, wallet_index: &str) -> Result<PrivateKeySigner, AccountError> {
		let signer = self.implementation.derive(wallet_index)?;
		tracing::debug!(
			wallet_index = %wallet_index,
			address = %signer.address(),
			"Derived signing wallet"
		);
		Ok(signer)
	}
}

/// Parses a wallet index into a non-hardened BIP-32 child index.
pub fn parse_wallet_index(wallet_index: &str) -> Result<u32, AccountError> {
	const HARDENED_BIT: u32 = 1 << 31;

	match wallet_index.trim().parse::<u32>() {
		Ok(index) if index < HARDENED_BIT => Ok(index),
		_ => Err(AccountError::InvalidIndex(wallet_index.to_string())),
	}
}
