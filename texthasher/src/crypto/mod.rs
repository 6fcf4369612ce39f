//! `hasher` holds the contract callers use, `encoder` does the Argon2 work,
//! `factory` hands out hashers and `phc` reads encoded hashes without verifying.

pub mod encoder;
pub mod factory;
pub mod hasher;
pub mod phc;

#[cfg(test)]
pub(crate) mod spy;
