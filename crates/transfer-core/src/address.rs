//! Address classification
//!
//! Namada transfer endpoints are either transparent (`tnam1...`) or shielded
//! payment addresses (`znam1...`). Classification is purely syntactic.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by all shielded payment addresses
pub const SHIELDED_ADDRESS_PREFIX: &str = "znam";

/// Prefix shared by all transparent addresses
pub const TRANSPARENT_ADDRESS_PREFIX: &str = "tnam";

/// Transfer endpoint address. The empty address means "not chosen yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap an address string as read from user input or the wallet
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The unset address
    pub fn empty() -> Self {
        Self::default()
    }

    /// Borrow as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if no address has been chosen
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Classify this address
    pub fn class(&self) -> AddressClass {
        classify(self.as_str())
    }

    /// Check the address carries a known prefix
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidAddress("address is empty".to_string()));
        }
        if !self.0.starts_with(SHIELDED_ADDRESS_PREFIX)
            && !self.0.starts_with(TRANSPARENT_ADDRESS_PREFIX)
        {
            return Err(Error::InvalidAddress(format!(
                "'{}' must start with '{}' or '{}'",
                self.0, TRANSPARENT_ADDRESS_PREFIX, SHIELDED_ADDRESS_PREFIX
            )));
        }
        Ok(())
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accounting model of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressClass {
    /// Privacy-preserving (MASP) accounting
    Shielded,
    /// Publicly visible accounting
    Transparent,
}

impl AddressClass {
    /// Name used when composing transfer kind names
    pub fn name(&self) -> &'static str {
        match self {
            AddressClass::Shielded => "Shielded",
            AddressClass::Transparent => "Transparent",
        }
    }

    /// Check for the shielded class
    pub fn is_shielded(&self) -> bool {
        matches!(self, AddressClass::Shielded)
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check whether `address` is a shielded payment address
pub fn is_shielded_address(address: &str) -> bool {
    address.starts_with(SHIELDED_ADDRESS_PREFIX)
}

/// Classify an address. Total: anything that is not shielded, including the
/// empty address, is transparent.
pub fn classify(address: &str) -> AddressClass {
    if is_shielded_address(address) {
        AddressClass::Shielded
    } else {
        AddressClass::Transparent
    }
}
