//! Namada transfer core
//!
//! Pure domain logic of the transfer screen: address classification,
//! transfer kind resolution, fee derivation, per-kind parameter shapes and
//! the transaction records shown to the user. Nothing in this crate performs
//! I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod asset;
pub mod error;
pub mod fees;
pub mod kind;
pub mod memo;
pub mod params;
pub mod transaction;

pub use address::{classify, is_shielded_address, Address, AddressClass, SHIELDED_ADDRESS_PREFIX};
pub use asset::{Asset, AssetDirectory, AssetWithAmount};
pub use error::{Error, ErrorCategory, Result};
pub use fees::{FeeCalculator, GasConfig, TransactionFee};
pub use kind::TransferKind;
pub use memo::{Memo, MAX_MEMO_LENGTH, MEMO_WARNING_LENGTH};
pub use params::{ShieldingEntry, TransferEntry, TransferInputs, TransferParams, UnshieldingEntry};
pub use transaction::{
    PartialTransferTransactionData, TransferStatus, TransferStep, TransferTransactionData,
    TxResponse,
};

pub use nam_transfer_params::{ApplicationFeatures, ChainId, ChainParameters};
pub use bigdecimal::BigDecimal;
