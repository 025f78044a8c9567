//! Stable content hashing.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::VeraError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, VeraError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Leading twelve hex digits of a [`stable_hash_string`] digest, for log lines.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_payloads_share_a_hash() {
        let a = stable_hash_string(&("early", 9.5)).unwrap();
        let b = stable_hash_string(&("early", 9.5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_eq!(short_hash(&a), &a[..12]);
        assert_eq!(short_hash("abc"), "abc");
    }
}
