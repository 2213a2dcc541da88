//! Owner-gated access control, as exposed by the `Owner` contract.

use std::{fmt, str::FromStr};

use log::info;

use crate::error::StoreError;

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn new(bytes: [u8; 20]) -> Address { Address(bytes) }
    pub fn as_bytes(&self) -> &[u8; 20] { &self.0 }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self { Address(bytes) }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut bytes)?;
        Ok(Address(bytes))
    }
}

/// Emitted when ownership changes hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSet {
    pub previous: Address,
    pub owner: Address,
}

pub trait AccessControl {
    fn owner(&self) -> &Address;

    /// Transfers ownership. Only the current owner may call this.
    fn set_owner(&mut self, caller: &Address, new_owner: Address) -> Result<OwnerSet, StoreError>;

    fn ensure_owner(&self, caller: &Address) -> Result<(), StoreError> {
        if caller == self.owner() {
            Ok(())
        } else {
            Err(StoreError::NotOwner(*caller))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Owner {
    owner: Address,
}

impl Owner {
    /// The deployer becomes the first owner.
    pub fn new(deployer: Address) -> Self { Owner { owner: deployer } }
}

impl AccessControl for Owner {
    fn owner(&self) -> &Address { &self.owner }

    fn set_owner(&mut self, caller: &Address, new_owner: Address) -> Result<OwnerSet, StoreError> {
        self.ensure_owner(caller)?;
        let previous = std::mem::replace(&mut self.owner, new_owner);
        info!("owner changed from {} to {}", previous, new_owner);
        Ok(OwnerSet { previous, owner: new_owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNTS: [Address; 2] = [Address::new([1; 20]), Address::new([2; 20])];

    #[test]
    fn test_deployer_is_owner() {
        let owner = Owner::new(ACCOUNTS[0]);
        assert_eq!(owner.owner(), &ACCOUNTS[0]);
    }

    #[test]
    fn test_non_owner_cannot_set_owner() {
        let mut owner = Owner::new(ACCOUNTS[0]);
        let res = owner.set_owner(&ACCOUNTS[1], ACCOUNTS[1]);
        assert!(matches!(res, Err(StoreError::NotOwner(a)) if a == ACCOUNTS[1]));
        assert_eq!(owner.owner(), &ACCOUNTS[0]);
    }

    #[test]
    fn test_owner_transfer() {
        let mut owner = Owner::new(ACCOUNTS[0]);
        let event = owner.set_owner(&ACCOUNTS[0], ACCOUNTS[1]).unwrap();
        assert_eq!(event, OwnerSet { previous: ACCOUNTS[0], owner: ACCOUNTS[1] });
        assert_eq!(owner.owner(), &ACCOUNTS[1]);

        // the old owner has lost the right
        assert!(owner.set_owner(&ACCOUNTS[0], ACCOUNTS[0]).is_err());
    }

    #[test]
    fn test_address_parse_display() {
        let s = "0x0101010101010101010101010101010101010101";
        let a: Address = s.parse().unwrap();
        assert_eq!(a, ACCOUNTS[0]);
        assert_eq!(a.to_string(), s);
        assert!("0x1234".parse::<Address>().is_err());
    }
}
