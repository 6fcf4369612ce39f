//! Argon2 settings. The defaults are the fixed production parameters; a JSON
//! settings file is only read when an operator explicitly asks for alternate
//! parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 256 bit salt.
pub const SALT_LENGTH: usize = 256 / 8;
/// 512 bit derived hash.
pub const HASH_LENGTH: usize = 512 / 8;
pub const PARALLELISM: u32 = 1;
/// 400 MiB expressed in KiB.
pub const MEMORY_KIB: u32 = 400 * 1024;
pub const ITERATIONS: u32 = 2;
/// Largest memory cost a presented hash may ask for before verification is refused.
pub const MAX_MEMORY_KIB: u32 = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file unreadable: {0}")]
    Io(String),
    #[error("settings parse failed: {0}")]
    Parse(String),
}

/// Parameters used to build an Argon2id encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Argon2Settings {
    /// Salt length in bytes.
    pub salt_length: usize,
    /// Derived hash length in bytes.
    pub hash_length: usize,
    pub parallelism: u32,
    #[serde(rename = "memoryInKb")]
    pub memory_kib: u32,
    pub iterations: u32,
    /// Ceiling on the memory cost embedded in a hash presented for verification.
    #[serde(rename = "maxMemoryInKb")]
    pub max_memory_kib: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            salt_length: SALT_LENGTH,
            hash_length: HASH_LENGTH,
            parallelism: PARALLELISM,
            memory_kib: MEMORY_KIB,
            iterations: ITERATIONS,
            max_memory_kib: MAX_MEMORY_KIB,
        }
    }
}

/// Loads settings from a JSON file. Missing fields keep their default values.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Argon2Settings, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    let settings: Argon2Settings =
        serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))?;
    log::debug!(
        "loaded argon2 settings from {}: m={}, t={}, p={}",
        path.as_ref().display(),
        settings.memory_kib,
        settings.iterations,
        settings.parallelism
    );
    Ok(settings)
}
