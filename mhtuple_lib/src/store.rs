//! Entry stores
//!
//! In-memory stand-ins for the on-chain key-value contracts. Entries are kept in their
//! fixed-width slot form and handed back as the `(digest, hashFunction, size)` tuple a
//! contract getter returns, so the codec sees exactly what a client library would.

use std::collections::HashMap;

use log::info;

use crate::{
    codec,
    error::{Error, StoreError},
    fixed_width::{Slot, StaticSizeSerializable, SLOT_SIZE},
    multihash::Multihash,
    owner::{AccessControl, Address},
    response::ContractResponse,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    EntrySet { key: Address, digest: String, hash_function: u8, size: u8 },
    EntryDeleted { key: Address },
}

pub trait EntryStore {
    type Key;

    fn set_entry(
        &mut self,
        caller: &Address,
        digest: &str,
        hash_function: u8,
        size: u8,
    ) -> Result<Event, StoreError>;

    /// Absent entries come back as the all-zero tuple.
    fn get_entry(&self, key: &Self::Key) -> Result<ContractResponse<u8>, StoreError>;

    fn clear_entry(&mut self, caller: &Address) -> Result<Event, StoreError>;

    /// Stores a base58 multihash string.
    fn set_multihash(&mut self, caller: &Address, multihash: &str) -> Result<Event, StoreError> {
        let m = codec::decode(multihash)?;
        self.set_entry(caller, m.digest(), m.hash_function(), m.size())
    }

    /// Reads an entry back as a base58 multihash string, `None` if nothing is stored.
    fn get_multihash(&self, key: &Self::Key) -> Result<Option<String>, StoreError> {
        Ok(codec::decode_response_tuple(self.get_entry(key)?)?)
    }
}

fn write_slot(digest: &str, hash_function: u8, size: u8) -> Result<[u8; SLOT_SIZE], Error> {
    let slot: Slot = Some(Multihash::new(digest, hash_function, size));
    let mut bytes = [0u8; SLOT_SIZE];
    slot.write(&mut &mut bytes[..])?;
    Ok(bytes)
}

fn read_slot(bytes: Option<&[u8; SLOT_SIZE]>) -> Result<ContractResponse<u8>, Error> {
    let slot = match bytes {
        Some(bytes) => Slot::from_bytes(bytes)?,
        None => None,
    };
    Ok(match slot {
        Some(m) => ContractResponse::new(m.digest(), m.hash_function(), m.size()),
        None => ContractResponse::new(format!("0x{}", "00".repeat(32)), 0, 0),
    })
}

fn is_set(bytes: Option<&[u8; SLOT_SIZE]>) -> bool {
    bytes.map_or(false, |b| b[SLOT_SIZE - 1] != 0)
}

/// A single entry that only the owner may write or clear.
#[derive(Debug, Clone)]
pub struct SingleEntryStore<A: AccessControl> {
    access: A,
    slot: Option<[u8; SLOT_SIZE]>,
}

impl<A: AccessControl> SingleEntryStore<A> {
    pub fn new(access: A) -> Self { SingleEntryStore { access, slot: None } }
    pub fn access(&self) -> &A { &self.access }
    pub fn access_mut(&mut self) -> &mut A { &mut self.access }
}

impl<A: AccessControl> EntryStore for SingleEntryStore<A> {
    type Key = ();

    fn set_entry(
        &mut self,
        caller: &Address,
        digest: &str,
        hash_function: u8,
        size: u8,
    ) -> Result<Event, StoreError> {
        self.access.ensure_owner(caller)?;
        self.slot = Some(write_slot(digest, hash_function, size)?);
        info!("entry set by {}", caller);
        Ok(Event::EntrySet { key: *caller, digest: digest.to_string(), hash_function, size })
    }

    fn get_entry(&self, _key: &()) -> Result<ContractResponse<u8>, StoreError> {
        Ok(read_slot(self.slot.as_ref())?)
    }

    fn clear_entry(&mut self, caller: &Address) -> Result<Event, StoreError> {
        self.access.ensure_owner(caller)?;
        if !is_set(self.slot.as_ref()) {
            return Err(StoreError::NoEntry(caller.to_string()));
        }
        self.slot = None;
        info!("entry cleared by {}", caller);
        Ok(Event::EntryDeleted { key: *caller })
    }
}

/// One entry per account; each caller writes and clears its own.
#[derive(Debug, Clone, Default)]
pub struct KeyedEntryStore {
    slots: HashMap<Address, [u8; SLOT_SIZE]>,
}

impl KeyedEntryStore {
    pub fn new() -> Self { Self::default() }
}

impl EntryStore for KeyedEntryStore {
    type Key = Address;

    fn set_entry(
        &mut self,
        caller: &Address,
        digest: &str,
        hash_function: u8,
        size: u8,
    ) -> Result<Event, StoreError> {
        self.slots.insert(*caller, write_slot(digest, hash_function, size)?);
        info!("entry set for {}", caller);
        Ok(Event::EntrySet { key: *caller, digest: digest.to_string(), hash_function, size })
    }

    fn get_entry(&self, key: &Address) -> Result<ContractResponse<u8>, StoreError> {
        Ok(read_slot(self.slots.get(key))?)
    }

    fn clear_entry(&mut self, caller: &Address) -> Result<Event, StoreError> {
        if !is_set(self.slots.get(caller)) {
            return Err(StoreError::NoEntry(caller.to_string()));
        }
        self.slots.remove(caller);
        info!("entry cleared for {}", caller);
        Ok(Event::EntryDeleted { key: *caller })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner::Owner;

    const ACCOUNTS: [Address; 2] = [Address::new([1; 20]), Address::new([2; 20])];

    const IPFS_HASHES: [&str; 2] = [
        "QmahqCsAUAw7zMv6P6Ae8PjCTck7taQA6FgGQLnWdKG7U8",
        "Qmb4atcgbbN5v4CDJ8nz5QG5L2pgwSTLd3raDrnyhLjnUH",
    ];

    fn single() -> SingleEntryStore<Owner> {
        SingleEntryStore::new(Owner::new(ACCOUNTS[0]))
    }

    #[test]
    fn test_get_after_set() {
        let mut store = single();
        store.set_multihash(&ACCOUNTS[0], IPFS_HASHES[0]).unwrap();
        assert_eq!(store.get_multihash(&()).unwrap().as_deref(), Some(IPFS_HASHES[0]));
    }

    #[test]
    fn test_set_emits_event() {
        let mut store = single();
        let event = store.set_multihash(&ACCOUNTS[0], IPFS_HASHES[0]).unwrap();
        let m = codec::decode(IPFS_HASHES[0]).unwrap();
        assert_eq!(
            event,
            Event::EntrySet {
                key: ACCOUNTS[0],
                digest: m.digest().to_string(),
                hash_function: 0x12,
                size: 32
            }
        );
    }

    #[test]
    fn test_non_owner_cannot_set() {
        let mut store = single();
        let res = store.set_multihash(&ACCOUNTS[1], IPFS_HASHES[1]);
        assert!(matches!(res, Err(StoreError::NotOwner(_))));
        assert_eq!(store.get_multihash(&()).unwrap(), None);
    }

    #[test]
    fn test_clear_after_set() {
        let mut store = single();
        store.set_multihash(&ACCOUNTS[0], IPFS_HASHES[0]).unwrap();
        let event = store.clear_entry(&ACCOUNTS[0]).unwrap();
        assert_eq!(event, Event::EntryDeleted { key: ACCOUNTS[0] });
        assert_eq!(store.get_multihash(&()).unwrap(), None);
    }

    #[test]
    fn test_clear_missing_entry_fails() {
        let mut store = single();
        assert!(matches!(store.clear_entry(&ACCOUNTS[0]), Err(StoreError::NoEntry(_))));
    }

    #[test]
    fn test_empty_entry_tuple() {
        let store = single();
        let response = store.get_entry(&()).unwrap();
        assert_eq!(response.size, 0);
        assert_eq!(response.hash_function, 0);
        assert_eq!(response.digest.len(), 66);
    }

    #[test]
    fn test_ownership_transfer_moves_write_access() {
        let mut store = single();
        store.access_mut().set_owner(&ACCOUNTS[0], ACCOUNTS[1]).unwrap();
        assert!(store.set_multihash(&ACCOUNTS[0], IPFS_HASHES[0]).is_err());
        store.set_multihash(&ACCOUNTS[1], IPFS_HASHES[1]).unwrap();
        assert_eq!(store.get_multihash(&()).unwrap().as_deref(), Some(IPFS_HASHES[1]));
    }

    #[test]
    fn test_keyed_store_per_caller() {
        let mut store = KeyedEntryStore::new();
        store.set_multihash(&ACCOUNTS[0], IPFS_HASHES[0]).unwrap();
        store.set_multihash(&ACCOUNTS[1], IPFS_HASHES[1]).unwrap();
        assert_eq!(store.get_multihash(&ACCOUNTS[0]).unwrap().as_deref(), Some(IPFS_HASHES[0]));
        assert_eq!(store.get_multihash(&ACCOUNTS[1]).unwrap().as_deref(), Some(IPFS_HASHES[1]));

        store.clear_entry(&ACCOUNTS[0]).unwrap();
        assert_eq!(store.get_multihash(&ACCOUNTS[0]).unwrap(), None);
        assert_eq!(store.get_multihash(&ACCOUNTS[1]).unwrap().as_deref(), Some(IPFS_HASHES[1]));
        assert!(matches!(store.clear_entry(&ACCOUNTS[0]), Err(StoreError::NoEntry(_))));
    }

    #[test]
    fn test_oversized_digest_rejected() {
        let mut store = KeyedEntryStore::new();
        let digest = format!("0x{}", "11".repeat(33));
        let res = store.set_entry(&ACCOUNTS[0], &digest, 0x12, 33);
        assert!(matches!(res, Err(StoreError::Codec(Error::DigestTooLong(33)))));
    }
}
