use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was not valid base58. Surfaced as-is from the codec.
    #[error(transparent)]
    Decode(#[from] bs58::decode::Error),

    #[error("decoded multihash is {0} bytes, need at least 2 (code and size)")]
    TooShort(usize),

    #[error("digest is not valid hex: {0}")]
    InvalidDigest(#[from] hex::FromHexError),

    #[error("multihash size {size} does not match digest length {digest_len}")]
    SizeMismatch { size: u8, digest_len: usize },

    #[error("{field} value {value} does not fit in a byte")]
    OutOfRange { field: &'static str, value: String },

    #[error("digest of {0} bytes does not fit in a 32-byte slot")]
    DigestTooLong(usize),

    #[error("slot io: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} is not the owner")]
    NotOwner(crate::owner::Address),

    #[error("no entry stored for {0}")]
    NoEntry(String),

    #[error(transparent)]
    Codec(#[from] Error),
}
