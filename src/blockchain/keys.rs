// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Addresses, secret seeds and key pairs.
//!
//! Addresses are 63 characters, `boa1` followed by lowercase bech32-style
//! characters. Secret seeds are `S` followed by the 64 hex characters of a
//! secp256k1 scalar. Keys never leave this module in raw form: callers get
//! a [`KeyPair`] that can sign and report its address.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::{signature::Signer, Signature, SigningKey};
use k256::SecretKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

pub const ADDRESS_LENGTH: usize = 63;
pub const ADDRESS_PREFIX: &str = "boa1";
pub const SECRET_SEED_LENGTH: usize = 65;
pub const SECRET_SEED_PREFIX: char = 'S';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid Key length")]
    InvalidLength,
    #[error("This key is not valid")]
    InvalidFormat,
    #[error("Secret decryption failed: {0}")]
    Decryption(String),
}

/// Validated public address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let key = raw.trim();
        if key.len() != ADDRESS_LENGTH {
            return Err(KeyError::InvalidLength);
        }
        let Some(body) = key.strip_prefix(ADDRESS_PREFIX) else {
            return Err(KeyError::InvalidFormat);
        };
        if !body
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(KeyError::InvalidFormat);
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

/// Parsed secret seed.
#[derive(Clone)]
pub struct SecretSeed(SecretKey);

impl SecretSeed {
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let seed = raw.trim();
        if seed.len() != SECRET_SEED_LENGTH {
            return Err(KeyError::InvalidLength);
        }
        let hex_part = seed
            .strip_prefix(SECRET_SEED_PREFIX)
            .ok_or(KeyError::InvalidFormat)?;
        let bytes = hex::decode(hex_part).map_err(|_| KeyError::InvalidFormat)?;
        SecretKey::from_slice(&bytes)
            .map(Self)
            .map_err(|_| KeyError::InvalidFormat)
    }
}

impl fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretSeed(..)")
    }
}

/// Signing key together with the address it controls.
#[derive(Clone)]
pub struct KeyPair {
    address: Address,
    signing_key: SigningKey,
}

impl KeyPair {
    pub fn from_seed(seed: &SecretSeed) -> Self {
        let signing_key = SigningKey::from(&seed.0);
        let address = derive_address(&signing_key);
        Self {
            address,
            signing_key,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// ECDSA (SHA-256) signature, hex encoded.
    pub fn sign(&self, message: &[u8]) -> String {
        let signature: Signature = self.signing_key.sign(message);
        hex::encode(signature.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// `boa1` + the first 59 hex chars of SHA-256 over the compressed public key.
fn derive_address(signing_key: &SigningKey) -> Address {
    let public = signing_key.verifying_key().to_sec1_bytes();
    let digest = hex::encode(Sha256::digest(&public));
    let body = &digest[..ADDRESS_LENGTH - ADDRESS_PREFIX.len()];
    Address(format!("{ADDRESS_PREFIX}{body}"))
}

/// Secret sealed by the wallet's at-rest cipher.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EncryptedSecret {
    pub iv: String,
    pub content: String,
}

/// Signer secret supplied by a caller: either the raw seed or an encrypted
/// blob that a [`SecretCipher`] can open.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SignerSecret {
    Raw(String),
    Encrypted(EncryptedSecret),
}

impl fmt::Debug for SignerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerSecret::Raw(_) => f.write_str("SignerSecret::Raw(..)"),
            SignerSecret::Encrypted(_) => f.write_str("SignerSecret::Encrypted(..)"),
        }
    }
}

/// At-rest decryption collaborator. The wallet only ever decrypts.
pub trait SecretCipher: Send + Sync {
    fn decrypt(&self, secret: &EncryptedSecret) -> Result<String, KeyError>;
}
