//! Keyed HMAC-SHA256 verifiers for API token secrets.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::auth::token::{decode_hex, encode_hex};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenHasherError {
    #[error("token HMAC key must not be empty")]
    EmptyKey,

    #[error("token HMAC key is invalid")]
    InvalidKey,
}

/// Computes and checks token verifiers with a server-side key.
#[derive(Clone)]
pub struct TokenHasher {
    key: Zeroizing<Vec<u8>>,
}

impl TokenHasher {
    /// # Errors
    ///
    /// Returns an error when the key is empty.
    pub fn new(key: &str) -> Result<Self, TokenHasherError> {
        if key.is_empty() {
            return Err(TokenHasherError::EmptyKey);
        }

        Ok(Self {
            key: Zeroizing::new(key.as_bytes().to_vec()),
        })
    }

    fn mac(&self) -> Result<HmacSha256, TokenHasherError> {
        HmacSha256::new_from_slice(&self.key).or(Err(TokenHasherError::InvalidKey))
    }

    /// Hex-encoded HMAC of `input`, suitable for storage.
    ///
    /// # Errors
    ///
    /// Returns an error when the key cannot initialise the MAC.
    pub fn hash(&self, input: &[u8]) -> Result<String, TokenHasherError> {
        let mut mac = self.mac()?;

        mac.update(input);

        Ok(encode_hex(&mac.finalize().into_bytes()))
    }

    /// Constant-time check of `input` against a stored verifier.
    #[must_use]
    pub fn verify(&self, input: &[u8], verifier: &str) -> bool {
        let Some(expected) = decode_hex(verifier) else {
            return false;
        };

        let Ok(mut mac) = self.mac() else {
            return false;
        };

        mac.update(input);

        mac.verify_slice(&expected).is_ok()
    }
}

impl fmt::Debug for TokenHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenHasher(**redacted**)")
    }
}
