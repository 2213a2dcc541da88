//! Multihash record type
//!
//! On chain we can't store a multihash string, but we can store a fixed-size digest
//! plus two small integers. IPFS multihashes for sha2-256 are `[code][size][digest]`
//! with one byte each for the code and the size, so we split them into those three
//! fields. The digest is kept in the `0x`-prefixed hex form contracts take and return.

use crate::error::Error;

/// Multihash function code for sha2-256, the default for IPFS CIDv0.
pub const SHA2_256: u8 = 0x12;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multihash {
    digest: String,
    hash_function: u8,
    size: u8,
}

impl Multihash {
    pub fn new(digest: impl Into<String>, hash_function: u8, size: u8) -> Multihash {
        Multihash { digest: digest.into(), hash_function, size }
    }

    /// Builds a record from raw digest bytes, taking the size from the digest length.
    pub fn from_digest_bytes(hash_function: u8, digest: &[u8]) -> Result<Multihash, Error> {
        let size = u8::try_from(digest.len()).map_err(|_| Error::OutOfRange {
            field: "size",
            value: digest.len().to_string(),
        })?;
        Ok(Multihash::new(to_hex_digest(digest), hash_function, size))
    }

    pub fn digest(&self) -> &str { &self.digest }
    pub fn hash_function(&self) -> u8 { self.hash_function }
    pub fn size(&self) -> u8 { self.size }

    /// A zero size marks an absent entry.
    pub fn is_empty(&self) -> bool { self.size == 0 }

    pub fn digest_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(hex::decode(strip_hex_prefix(&self.digest))?)
    }
}

pub fn to_hex_digest(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub(crate) fn strip_hex_prefix(digest: &str) -> &str {
    digest.strip_prefix("0x").unwrap_or(digest)
}
