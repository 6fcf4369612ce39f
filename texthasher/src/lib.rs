//! Text hashing for passwords and other sensitive values that must be stored on
//! a server. Hashes are Argon2id PHC strings, so each stored value carries its
//! own salt and cost parameters and can be verified without outside state.

pub mod config;
pub mod crypto;

pub use config::{load_settings, Argon2Settings, ConfigError};
pub use crypto::encoder::{Argon2Encoder, EncoderError, PasswordEncoder};
pub use crypto::factory::{TextHasherFactory, TextHasherFactoryImp};
pub use crypto::hasher::{TextHasher, TextHasherArgon2};
pub use crypto::phc::{inspect, EncodedHashInfo};
