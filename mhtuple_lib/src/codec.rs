//! Conversion between base58 multihash strings and [`Multihash`] records.

use log::debug;

use crate::{
    error::Error,
    multihash::{to_hex_digest, Multihash},
    response::{ContractResponse, ToByte},
};

/// Splits a base58 multihash string into its code, size and digest.
pub fn decode(multihash: &str) -> Result<Multihash, Error> {
    let bytes = bs58::decode(multihash).into_vec()?;
    if bytes.len() < 2 {
        return Err(Error::TooShort(bytes.len()));
    }
    debug!("decoded {} into {} bytes", multihash, bytes.len());
    Ok(Multihash::new(to_hex_digest(&bytes[2..]), bytes[0], bytes[1]))
}

/// Joins a record back into a base58 multihash string.
///
/// A zero size means "no entry" and gives `None`, whatever the digest holds. The size is
/// written as given, without checking it against the digest length; see [`encode_strict`].
pub fn encode(multihash: &Multihash) -> Result<Option<String>, Error> {
    if multihash.is_empty() {
        return Ok(None);
    }
    let digest = multihash.digest_bytes()?;
    Ok(Some(encode_parts(multihash.hash_function(), multihash.size(), &digest)))
}

/// Like [`encode`], but rejects records whose size disagrees with the digest length.
pub fn encode_strict(multihash: &Multihash) -> Result<Option<String>, Error> {
    if multihash.is_empty() {
        return Ok(None);
    }
    let digest = multihash.digest_bytes()?;
    if digest.len() != multihash.size() as usize {
        return Err(Error::SizeMismatch { size: multihash.size(), digest_len: digest.len() });
    }
    Ok(Some(encode_parts(multihash.hash_function(), multihash.size(), &digest)))
}

fn encode_parts(hash_function: u8, size: u8, digest: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(2 + digest.len());
    bytes.push(hash_function);
    bytes.push(size);
    bytes.extend_from_slice(digest);
    bs58::encode(bytes).into_string()
}

pub fn parse_response_tuple<N: ToByte>(response: ContractResponse<N>) -> Result<Multihash, Error> {
    let ContractResponse { digest, hash_function, size } = response;
    Ok(Multihash::new(
        digest,
        hash_function.to_byte("hashFunction")?,
        size.to_byte("size")?,
    ))
}

pub fn decode_response_tuple<N: ToByte>(
    response: ContractResponse<N>,
) -> Result<Option<String>, Error> {
    encode(&parse_response_tuple(response)?)
}
