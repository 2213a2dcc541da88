//! Fixed-width slot layout
//!
//! The storage contract keeps one entry in a `bytes32` digest plus two `uint8` fields.
//! This module pins that down as a 34-byte layout: digest first, zero padded on the right,
//! then the hash function code, then the size. A zero size byte is an empty slot.

use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io;

use crate::{
    error::Error,
    multihash::{to_hex_digest, Multihash},
};

pub const DIGEST_FIELD_SIZE: usize = 32;
pub const SLOT_SIZE: usize = DIGEST_FIELD_SIZE + 2;

pub trait StaticSizeSerializable: Sized {
    fn write<W>(&self, write: &mut W) -> Result<(), Error>
    where
        W: io::Write;

    fn read<R>(read: &mut R) -> Result<Self, Error>
    where
        R: io::Read;

    const SER_SIZE: usize;

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::with_capacity(Self::SER_SIZE);
        self.write(&mut buf)?;
        Ok(buf)
    }

    fn from_bytes(mut bytes: &[u8]) -> Result<Self, Error> {
        Self::read(&mut bytes)
    }
}

pub type Slot = Option<Multihash>;

impl StaticSizeSerializable for Slot {
    fn write<W>(&self, write: &mut W) -> Result<(), Error>
    where
        W: io::Write,
    {
        match self {
            Some(m) => {
                let digest = m.digest_bytes()?;
                if digest.len() > DIGEST_FIELD_SIZE {
                    return Err(Error::DigestTooLong(digest.len()));
                }
                let mut field = [0u8; DIGEST_FIELD_SIZE];
                field[..digest.len()].copy_from_slice(&digest);
                write.write_all(&field)?;
                write.write_u8(m.hash_function())?;
                write.write_u8(m.size())?;
            }
            None => {
                write.write_all(&[0u8; SLOT_SIZE])?;
            }
        }
        Ok(())
    }

    fn read<R>(read: &mut R) -> Result<Self, Error>
    where
        R: io::Read,
    {
        let digest = {
            let mut digest = [0u8; DIGEST_FIELD_SIZE];
            read.read_exact(&mut digest)?;
            digest
        };
        let hash_function = read.read_u8()?;
        let size = read.read_u8()?;

        if size == 0 {
            Ok(None)
        } else {
            Ok(Some(Multihash::new(to_hex_digest(&digest), hash_function, size)))
        }
    }

    const SER_SIZE: usize = SLOT_SIZE;
}
