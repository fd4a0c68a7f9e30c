//! Signing identity.
//!
//! # Security
//! - The secret URI is read ONLY from the environment
//! - Secrets are never logged or serialized

use std::str::FromStr;

use subxt_signer::sr25519::Keypair;
use subxt_signer::SecretUri;

use crate::blockchain::types::{ChainError, ChainResult};

/// Environment variable holding the secret URI.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// sr25519 signing identity with its SS58 address.
pub struct Wallet {
    keypair: Keypair,
    address: String,
}

impl Wallet {
    /// Derive a wallet from a secret URI.
    ///
    /// Accepts a BIP39 mnemonic or a `0x` hex seed, optionally followed by
    /// `//hard` and `/soft` junctions and a `///password`. Dev URIs such as
    /// `//Alice` derive from the well-known dev phrase.
    pub fn from_uri(secret_uri: &str) -> ChainResult<Self> {
        let uri = SecretUri::from_str(secret_uri.trim())
            .map_err(|e| ChainError::Wallet(format!("Invalid secret URI: {}", e)))?;
        let keypair = Keypair::from_uri(&uri)
            .map_err(|e| ChainError::Wallet(format!("Key derivation failed: {}", e)))?;
        let address = keypair.public_key().to_account_id().to_string();

        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self { keypair, address })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `PRIVATE_KEY` from environment.
    pub fn from_env() -> ChainResult<Self> {
        let secret = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            ChainError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_uri(&secret)
    }

    /// SS58 address (generic prefix 42).
    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
