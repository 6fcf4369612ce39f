//! Read-only access to PHC encoded hashes:
//! `$argon2id$v=19$m=<KiB>,t=<iterations>,p=<parallelism>$<salt>$<hash>`.

use argon2::password_hash::PasswordHash;
use argon2::{Algorithm, Params, Version};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
use serde::Serialize;

use super::encoder::EncoderError;

/// Argon2 refuses salts shorter than 8 bytes.
pub(crate) const MIN_SALT_LENGTH: usize = 8;

/// Parameters and lengths carried by an encoded hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedHashInfo {
    pub algorithm: String,
    pub version: Option<u32>,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    /// Decoded salt length in bytes.
    pub salt_length: usize,
    /// Derived hash length in bytes.
    pub hash_length: usize,
}

/// Parses an encoded hash and reports what it carries without verifying anything.
pub fn inspect(encoded: &str) -> Result<EncodedHashInfo, EncoderError> {
    let parsed = parse(encoded)?;
    let algorithm = algorithm(&parsed)?;
    let params = params(&parsed)?;

    let salt_length = match &parsed.salt {
        Some(salt) => STANDARD_NO_PAD
            .decode(salt.as_str().as_bytes())
            .map_err(|e| EncoderError::MalformedHash(format!("salt is not valid base64: {e}")))?
            .len(),
        None => 0,
    };
    let hash_length = parsed.hash.as_ref().map_or(0, |hash| hash.len());

    Ok(EncodedHashInfo {
        algorithm: algorithm.as_str().to_string(),
        version: parsed.version,
        memory_kib: params.m_cost(),
        iterations: params.t_cost(),
        parallelism: params.p_cost(),
        salt_length,
        hash_length,
    })
}

/// Parses a PHC string that must carry both a salt and a hash. A string missing
/// either, or whose salt does not decode to at least [`MIN_SALT_LENGTH`] bytes,
/// cannot be verified and is rejected as malformed.
pub(crate) fn parse(encoded: &str) -> Result<PasswordHash<'_>, EncoderError> {
    let parsed = PasswordHash::new(encoded).map_err(|e| {
        log::warn!("rejected malformed encoded hash: {e}");
        EncoderError::MalformedHash(format!("{e}"))
    })?;

    let (Some(salt), Some(_)) = (&parsed.salt, &parsed.hash) else {
        log::warn!("rejected encoded hash without salt or hash segment");
        return Err(EncoderError::MalformedHash(
            "missing salt or hash segment".to_string(),
        ));
    };

    let mut buf = [0u8; 64];
    let salt_length = salt
        .decode_b64(&mut buf)
        .map_err(|e| {
            log::warn!("rejected encoded hash with undecodable salt: {e}");
            EncoderError::MalformedHash(format!("salt is not valid base64: {e}"))
        })?
        .len();
    if salt_length < MIN_SALT_LENGTH {
        log::warn!("rejected encoded hash with {salt_length} byte salt");
        return Err(EncoderError::MalformedHash(format!(
            "salt is {salt_length} bytes, at least {MIN_SALT_LENGTH} required"
        )));
    }
    Ok(parsed)
}

/// Resolves the Argon2 variant named by the hash.
pub(crate) fn algorithm(parsed: &PasswordHash<'_>) -> Result<Algorithm, EncoderError> {
    parsed.algorithm.as_str().parse::<Algorithm>().map_err(|_| {
        log::warn!("rejected encoded hash with algorithm {}", parsed.algorithm);
        EncoderError::UnsupportedAlgorithm(parsed.algorithm.to_string())
    })
}

/// Reads the embedded cost parameters and checks the embedded version.
pub(crate) fn params(parsed: &PasswordHash<'_>) -> Result<Params, EncoderError> {
    if let Some(version) = parsed.version {
        Version::try_from(version).map_err(|e| {
            log::warn!("rejected encoded hash with version {version}");
            EncoderError::UnsupportedParameters(format!("version {version}: {e}"))
        })?;
    }

    Params::try_from(parsed).map_err(|e| {
        log::warn!("rejected encoded hash parameters: {e}");
        EncoderError::UnsupportedParameters(format!("{e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::{inspect, EncodedHashInfo};
    use crate::crypto::encoder::EncoderError;

    // Structure only, the hash segment is not a real derivation.
    const SAMPLE: &str = "$argon2id$v=19$m=64,t=1,p=1$c29tZXNhbHRzb21lc2FsdA$DJ0bCd0AprBuajwaXTv3Y5HZ6KEmz9PFf2Cx5SuSCzU";

    #[test]
    fn reports_embedded_parameters() {
        let info = inspect(SAMPLE).expect("sample should parse");
        assert_eq!(
            info,
            EncodedHashInfo {
                algorithm: "argon2id".to_string(),
                version: Some(19),
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
                salt_length: 16,
                hash_length: 32,
            }
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let info = inspect(SAMPLE).expect("sample should parse");
        let json = serde_json::to_value(&info).expect("info should serialize");
        assert_eq!(json["memoryKib"], 64);
        assert_eq!(json["saltLength"], 16);
    }

    #[test]
    fn rejects_non_phc_text() {
        let err = inspect("not-a-valid-hash").unwrap_err();
        assert!(matches!(err, EncoderError::MalformedHash(_)));
    }

    #[test]
    fn rejects_hash_without_hash_segment() {
        let err = inspect("$argon2id$v=19$m=64,t=1,p=1$c29tZXNhbHRzb21lc2FsdA").unwrap_err();
        assert!(matches!(err, EncoderError::MalformedHash(_)));
    }

    #[test]
    fn rejects_undecodable_or_short_salt() {
        let hash = "DJ0bCd0AprBuajwaXTv3Y5HZ6KEmz9PFf2Cx5SuSCzU";
        for salt in ["abcde", "abcdefghi", "YWJjZA"] {
            let encoded = format!("$argon2id$v=19$m=64,t=1,p=1${salt}${hash}");
            let err = inspect(&encoded).unwrap_err();
            assert!(
                matches!(err, EncoderError::MalformedHash(_)),
                "salt {salt} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn rejects_other_algorithms() {
        let err = inspect("$pbkdf2-sha256$i=1000$c29tZXNhbHRzb21lc2FsdA$DJ0bCd0AprBuajwaXTv3Y5HZ6KEmz9PFf2Cx5SuSCzU")
            .unwrap_err();
        assert!(matches!(err, EncoderError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = inspect("$argon2id$v=20$m=64,t=1,p=1$c29tZXNhbHRzb21lc2FsdA$DJ0bCd0AprBuajwaXTv3Y5HZ6KEmz9PFf2Cx5SuSCzU")
            .unwrap_err();
        assert!(matches!(err, EncoderError::UnsupportedParameters(_)));
    }
}
