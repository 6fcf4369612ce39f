//! The text hashing contract and its Argon2 implementation.
//!
//! Implementations must use a hashing algorithm suitable for storing passwords
//! and other sensitive text on a server, in line with the OWASP Password Storage
//! Cheat Sheet. Every hash embeds the settings used to produce it, so
//! [`TextHasher::matches`] needs nothing but the plain text and the hash.

use super::encoder::{Argon2Encoder, EncoderError, PasswordEncoder};
use crate::config::Argon2Settings;

pub trait TextHasher: Send + Sync {
    /// Hashes `plain_text`. Hashing the same text twice yields two different
    /// strings because each hash gets a fresh random salt. The call is
    /// deliberately slow and memory hungry.
    fn hash_text(&self, plain_text: &str) -> Result<String, EncoderError>;

    /// Checks `plain_text` against a hash previously returned by
    /// [`TextHasher::hash_text`]. A hash that cannot be parsed is an error,
    /// never a plain `false`.
    fn matches(&self, plain_text: &str, hashed_text: &str) -> Result<bool, EncoderError>;
}

/// [`TextHasher`] backed by an Argon2id encoder that is built once and reused.
#[derive(Debug)]
pub struct TextHasherArgon2<E = Argon2Encoder> {
    encoder: E,
}

impl TextHasherArgon2 {
    /// Builds a hasher with the fixed production settings: 32 byte salt,
    /// 64 byte hash, parallelism 1, 400 MiB of memory and 2 iterations.
    pub fn new() -> Result<Self, EncoderError> {
        Self::with_builder(Argon2Encoder::new)
    }
}

impl<E: PasswordEncoder> TextHasherArgon2<E> {
    /// Runs `build` once with the fixed settings and keeps the encoder it returns.
    pub fn with_builder<F>(build: F) -> Result<Self, EncoderError>
    where
        F: FnOnce(&Argon2Settings) -> Result<E, EncoderError>,
    {
        let encoder = build(&Argon2Settings::default())?;
        Ok(Self { encoder })
    }

    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Whether a stored hash was produced with weaker settings than the current
    /// ones and should be replaced the next time the plain text is available.
    pub fn needs_rehash(&self, hashed_text: &str) -> Result<bool, EncoderError> {
        self.encoder.upgrade_encoding(hashed_text)
    }
}

impl<E: PasswordEncoder> TextHasher for TextHasherArgon2<E> {
    fn hash_text(&self, plain_text: &str) -> Result<String, EncoderError> {
        self.encoder.encode(plain_text)
    }

    fn matches(&self, plain_text: &str, hashed_text: &str) -> Result<bool, EncoderError> {
        self.encoder.matches(plain_text, hashed_text)
    }
}
