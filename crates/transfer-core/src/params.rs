//! Per-kind transfer parameters handed to the signing service
//!
//! Built fresh from the current form values for every submission attempt.

use crate::address::Address;
use crate::kind::TransferKind;
use bigdecimal::BigDecimal;
use serde::Serialize;

/// Values read from the form for one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInputs {
    /// Source address (empty when unknown)
    pub source: Address,
    /// Destination address (empty when unknown)
    pub target: Address,
    /// Token address (empty when no asset is selected)
    pub token: String,
    /// Amount to transfer
    pub amount: BigDecimal,
}

/// One transparent or shielded-to-shielded movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferEntry {
    /// Sender
    pub source: Address,
    /// Recipient
    pub target: Address,
    /// Token address
    pub token: String,
    /// Amount
    pub amount: BigDecimal,
}

/// One shielding source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShieldingEntry {
    /// Transparent sender
    pub source: Address,
    /// Token address
    pub token: String,
    /// Amount
    pub amount: BigDecimal,
}

/// One unshielding recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnshieldingEntry {
    /// Transparent recipient
    pub target: Address,
    /// Token address
    pub token: String,
    /// Amount
    pub amount: BigDecimal,
}

/// Parameter shape expected by each transaction constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransferParams {
    /// Transparent → transparent
    Transparent {
        /// Movements
        data: Vec<TransferEntry>,
    },
    /// Transparent → shielded
    Shielding {
        /// Shielded recipient
        target: Address,
        /// Transparent sources
        data: Vec<ShieldingEntry>,
    },
    /// Shielded → transparent
    Unshielding {
        /// Shielded sender
        source: Address,
        /// Transparent recipients
        data: Vec<UnshieldingEntry>,
    },
    /// Shielded → shielded
    Shielded {
        /// Movements
        data: Vec<TransferEntry>,
    },
}

impl TransferParams {
    /// Build the parameter shape for `kind` from the current inputs
    pub fn build(kind: TransferKind, inputs: &TransferInputs) -> Self {
        let TransferInputs {
            source,
            target,
            token,
            amount,
        } = inputs.clone();

        match kind {
            TransferKind::TransparentToTransparent => TransferParams::Transparent {
                data: vec![TransferEntry {
                    source,
                    target,
                    token,
                    amount,
                }],
            },
            TransferKind::TransparentToShielded => TransferParams::Shielding {
                target,
                data: vec![ShieldingEntry {
                    source,
                    token,
                    amount,
                }],
            },
            TransferKind::ShieldedToTransparent => TransferParams::Unshielding {
                source,
                data: vec![UnshieldingEntry {
                    target,
                    token,
                    amount,
                }],
            },
            TransferKind::ShieldedToShielded => TransferParams::Shielded {
                data: vec![TransferEntry {
                    source,
                    target,
                    token,
                    amount,
                }],
            },
        }
    }

    /// Transfer kind this shape belongs to
    pub fn kind(&self) -> TransferKind {
        match self {
            TransferParams::Transparent { .. } => TransferKind::TransparentToTransparent,
            TransferParams::Shielding { .. } => TransferKind::TransparentToShielded,
            TransferParams::Unshielding { .. } => TransferKind::ShieldedToTransparent,
            TransferParams::Shielded { .. } => TransferKind::ShieldedToShielded,
        }
    }
}
