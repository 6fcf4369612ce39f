//! Factory indirection so callers depend on [`TextHasher`] rather than on the
//! concrete Argon2 type.

use super::encoder::EncoderError;
use super::hasher::{TextHasher, TextHasherArgon2};

pub trait TextHasherFactory {
    type Hasher: TextHasher;

    /// Returns a new, independently configured hasher on every call.
    fn create(&self) -> Result<Self::Hasher, EncoderError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextHasherFactoryImp;

impl TextHasherFactory for TextHasherFactoryImp {
    type Hasher = TextHasherArgon2;

    fn create(&self) -> Result<Self::Hasher, EncoderError> {
        TextHasherArgon2::new()
    }
}
