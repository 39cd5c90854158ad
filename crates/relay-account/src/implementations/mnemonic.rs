//! Mnemonic-based signer derivation.
//!
//! Derives one key per wallet index from a single master mnemonic along the
//! standard Ethereum path `m/44'/60'/0'/0/{index}`.

use crate::{parse_wallet_index, AccountError, SignerDerivation};
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use relay_types::SecretString;

/// Derives wallet signers from a BIP-39 mnemonic.
pub struct MnemonicDerivation {
	mnemonic: SecretString,
}

impl MnemonicDerivation {
	/// Creates a new derivation source.
	///
	/// The mnemonic is checked up front by deriving index 0, so a bad phrase
	/// fails at startup rather than on the first submission.
	pub fn new(mnemonic: SecretString) -> Result<Self, AccountError> {
		if mnemonic.is_blank() {
			return Err(AccountError::Derivation("Mnemonic cannot be empty".to_string()));
		}

		let derivation = Self { mnemonic };
		derivation.derive_index(0)?;
		Ok(derivation)
	}

	fn derive_index(&self, index: u32) -> Result<PrivateKeySigner, AccountError> {
		self.mnemonic.with_exposed(|phrase| {
			MnemonicBuilder::<English>::default()
				.phrase(phrase)
				.index(index)
				.map_err(|e| AccountError::Derivation(e.to_string()))?
				.build()
				.map_err(|e| AccountError::Derivation(e.to_string()))
		})
	}
}

impl SignerDerivation for MnemonicDerivation {
	fn derive(&self, wallet_index: &str) -> Result<PrivateKeySigner, AccountError> {
		let index = parse_wallet_index(wallet_index)?;
		self.derive_index(index)
	}
}

/// Creates a boxed mnemonic derivation from a configured secret.
pub fn create_account(
	mnemonic: &SecretString,
) -> Result<Box<dyn SignerDerivation>, AccountError> {
	Ok(Box::new(MnemonicDerivation::new(mnemonic.clone())?))
}
