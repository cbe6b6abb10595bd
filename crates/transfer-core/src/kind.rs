//! Transfer kind resolution

use crate::address::{Address, AddressClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four mutually exclusive transfer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransferKind {
    /// Public to public
    TransparentToTransparent,
    /// Shielding transfer
    TransparentToShielded,
    /// Unshielding transfer
    ShieldedToTransparent,
    /// Private to private
    ShieldedToShielded,
}

impl TransferKind {
    /// Every kind, in registry order
    pub const ALL: [TransferKind; 4] = [
        TransferKind::TransparentToTransparent,
        TransferKind::TransparentToShielded,
        TransferKind::ShieldedToTransparent,
        TransferKind::ShieldedToShielded,
    ];

    /// Resolve the kind from source and destination classes
    pub fn resolve(source: AddressClass, destination: AddressClass) -> Self {
        match (source, destination) {
            (AddressClass::Transparent, AddressClass::Transparent) => {
                TransferKind::TransparentToTransparent
            }
            (AddressClass::Transparent, AddressClass::Shielded) => {
                TransferKind::TransparentToShielded
            }
            (AddressClass::Shielded, AddressClass::Transparent) => {
                TransferKind::ShieldedToTransparent
            }
            (AddressClass::Shielded, AddressClass::Shielded) => TransferKind::ShieldedToShielded,
        }
    }

    /// Resolve the kind directly from two addresses
    pub fn for_addresses(source: &Address, destination: &Address) -> Self {
        Self::resolve(source.class(), destination.class())
    }

    /// Source class of this kind
    pub fn source(&self) -> AddressClass {
        match self {
            TransferKind::TransparentToTransparent | TransferKind::TransparentToShielded => {
                AddressClass::Transparent
            }
            TransferKind::ShieldedToTransparent | TransferKind::ShieldedToShielded => {
                AddressClass::Shielded
            }
        }
    }

    /// Destination class of this kind
    pub fn destination(&self) -> AddressClass {
        match self {
            TransferKind::TransparentToTransparent | TransferKind::ShieldedToTransparent => {
                AddressClass::Transparent
            }
            TransferKind::TransparentToShielded | TransferKind::ShieldedToShielded => {
                AddressClass::Shielded
            }
        }
    }

    /// `"{source}To{destination}"`
    pub fn name(&self) -> &'static str {
        match self {
            TransferKind::TransparentToTransparent => "TransparentToTransparent",
            TransferKind::TransparentToShielded => "TransparentToShielded",
            TransferKind::ShieldedToTransparent => "ShieldedToTransparent",
            TransferKind::ShieldedToShielded => "ShieldedToShielded",
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
