//! Argon2id encoder. Construction fixes the cost parameters used for new
//! hashes; verification always uses the parameters embedded in the presented
//! hash, so older hashes keep verifying after the defaults change.

use std::fmt;

use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use super::phc::{self, MIN_SALT_LENGTH};
use crate::config::Argon2Settings;

/// 48 bytes is the longest salt whose B64 form fits a PHC salt segment.
const MAX_SALT_LENGTH: usize = 48;
const MIN_HASH_LENGTH: usize = Params::MIN_OUTPUT_LEN;
const MAX_HASH_LENGTH: usize = password_hash::Output::MAX_LENGTH;
/// The only version new hashes are produced with.
const CURRENT_VERSION: u32 = 0x13;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("encoder construction failed: {0}")]
    Construction(String),
    #[error("secure random source failed: {0}")]
    Random(String),
    #[error("hashing failed: {0}")]
    Hashing(String),
    #[error("malformed encoded hash: {0}")]
    MalformedHash(String),
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("unsupported hash parameters: {0}")]
    UnsupportedParameters(String),
    #[error("hash requires {required_kib} KiB of memory, limit is {limit_kib} KiB")]
    ResourceLimit { required_kib: u32, limit_kib: u32 },
    #[error("verification failed: {0}")]
    Verification(String),
}

/// Capability the text hasher delegates to.
pub trait PasswordEncoder: Send + Sync {
    /// Produces a new self-describing encoded hash of `plain_text`.
    fn encode(&self, plain_text: &str) -> Result<String, EncoderError>;

    /// Returns `Ok(false)` only for a well-formed hash of some other text.
    fn matches(&self, plain_text: &str, encoded: &str) -> Result<bool, EncoderError>;

    /// Whether `encoded` should be replaced by a fresh hash under the current settings.
    fn upgrade_encoding(&self, _encoded: &str) -> Result<bool, EncoderError> {
        Ok(false)
    }
}

#[derive(Clone)]
pub struct Argon2Encoder {
    argon2: Argon2<'static>,
    settings: Argon2Settings,
}

impl Argon2Encoder {
    /// Builds an Argon2id (version 0x13) encoder. Settings the algorithm cannot
    /// honor are rejected here rather than on first use.
    pub fn new(settings: &Argon2Settings) -> Result<Self, EncoderError> {
        if !(MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&settings.salt_length) {
            return Err(EncoderError::Construction(format!(
                "salt length {} outside {MIN_SALT_LENGTH}..={MAX_SALT_LENGTH} bytes",
                settings.salt_length
            )));
        }
        if !(MIN_HASH_LENGTH..=MAX_HASH_LENGTH).contains(&settings.hash_length) {
            return Err(EncoderError::Construction(format!(
                "hash length {} outside {MIN_HASH_LENGTH}..={MAX_HASH_LENGTH} bytes",
                settings.hash_length
            )));
        }
        if settings.max_memory_kib < settings.memory_kib {
            return Err(EncoderError::Construction(format!(
                "memory limit {} KiB is below the memory cost {} KiB",
                settings.max_memory_kib, settings.memory_kib
            )));
        }

        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            Some(settings.hash_length),
        )
        .map_err(|e| EncoderError::Construction(format!("{e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            settings: *settings,
        })
    }

    pub fn settings(&self) -> &Argon2Settings {
        &self.settings
    }
}

impl fmt::Debug for Argon2Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Encoder")
            .field("settings", &self.settings)
            .finish()
    }
}

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, plain_text: &str) -> Result<String, EncoderError> {
        let mut salt_bytes = vec![0u8; self.settings.salt_length];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| EncoderError::Random(format!("{e}")))?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| EncoderError::Hashing(format!("{e}")))?;

        let encoded = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| EncoderError::Hashing(format!("{e}")))?
            .to_string();
        log::debug!(
            "hashed text with argon2id m={}, t={}, p={}",
            self.settings.memory_kib,
            self.settings.iterations,
            self.settings.parallelism
        );
        Ok(encoded)
    }

    fn matches(&self, plain_text: &str, encoded: &str) -> Result<bool, EncoderError> {
        let parsed = phc::parse(encoded)?;
        phc::algorithm(&parsed)?;
        let params = phc::params(&parsed)?;
        if params.m_cost() > self.settings.max_memory_kib {
            log::warn!(
                "refused to verify hash needing {} KiB, limit is {} KiB",
                params.m_cost(),
                self.settings.max_memory_kib
            );
            return Err(EncoderError::ResourceLimit {
                required_kib: params.m_cost(),
                limit_kib: self.settings.max_memory_kib,
            });
        }

        // The verifier re-derives with the embedded algorithm, version and
        // parameters; the output comparison is constant time.
        match self.argon2.verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => {
                log::debug!("text matched encoded hash");
                Ok(true)
            }
            Err(password_hash::Error::Password) => {
                log::debug!("text did not match encoded hash");
                Ok(false)
            }
            Err(e) => Err(EncoderError::Verification(format!("{e}"))),
        }
    }

    fn upgrade_encoding(&self, encoded: &str) -> Result<bool, EncoderError> {
        let info = phc::inspect(encoded)?;
        Ok(info.algorithm != Algorithm::Argon2id.as_str()
            || info.version != Some(CURRENT_VERSION)
            || info.memory_kib < self.settings.memory_kib
            || info.iterations < self.settings.iterations
            || info.salt_length < self.settings.salt_length
            || info.hash_length < self.settings.hash_length)
    }
}
