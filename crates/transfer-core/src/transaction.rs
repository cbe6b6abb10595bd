//! Transfer transaction records
//!
//! `TransferTransactionData` is the persisted form of a submitted transfer.
//! `PartialTransferTransactionData` is what the transfer screen displays: a
//! placeholder while signing, then the full record.

use crate::address::Address;
use crate::asset::Asset;
use crate::kind::TransferKind;
use crate::memo::Memo;
use chrono::{DateTime, Utc};
use nam_transfer_params::ChainId;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Progress of a transfer through its timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferStep {
    /// Waiting for the user to sign
    Sign,
    /// Broadcast, waiting for the chain to include it
    WaitingConfirmation,
    /// Finished (successfully or not)
    Complete,
}

/// Outcome as known to the transaction store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Not yet applied
    Pending,
    /// Applied on chain
    Success,
    /// Rejected or failed on chain
    Error,
}

/// Response of the signing/broadcast service for one broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    /// Wrapper transaction hash
    pub hash: String,
    /// Block height, when already known
    #[serde(default)]
    pub height: Option<u64>,
    /// Hashes of the inner transactions carried by the wrapper
    #[serde(default)]
    pub inner_tx_hashes: Vec<String>,
}

/// Persisted transfer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTransactionData {
    /// Transfer kind
    #[serde(rename = "type")]
    pub kind: TransferKind,
    /// Transferred asset
    pub asset: Asset,
    /// Chain the transfer was submitted to
    pub chain_id: ChainId,
    /// Inner transaction hash (store key)
    pub hash: String,
    /// Wrapper transaction hash
    pub wrapper_hash: String,
    /// Timeline step
    pub current_step: TransferStep,
    /// Store status
    pub status: TransferStatus,
    /// RPC endpoint used for the broadcast
    pub rpc_url: String,
    /// Sender
    pub source_address: Address,
    /// Recipient
    pub destination_address: Address,
    /// Transferred amount
    pub display_amount: BigDecimal,
    /// Attached memo
    #[serde(default)]
    pub memo: Option<Memo>,
    /// Failure reason reported by the chain
    #[serde(default)]
    pub error_message: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl TransferTransactionData {
    /// Mark the transfer as finished with `status`
    pub fn complete(mut self, status: TransferStatus, error_message: Option<String>) -> Self {
        self.current_step = TransferStep::Complete;
        self.status = status;
        self.error_message = error_message;
        self.updated_at = Utc::now();
        self
    }
}

/// Transaction record shown on the transfer screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PartialTransferTransactionData {
    /// Submitted, waiting for a signature
    Signing {
        /// Transfer kind
        #[serde(rename = "type")]
        kind: TransferKind,
        /// Transferred asset
        asset: Asset,
        /// Chain the transfer is submitted to
        #[serde(rename = "chainId")]
        chain_id: ChainId,
    },
    /// Signing service responded; full record available
    Recorded(TransferTransactionData),
}

impl PartialTransferTransactionData {
    /// Placeholder created when signing starts
    pub fn signing(kind: TransferKind, asset: Asset, chain_id: ChainId) -> Self {
        PartialTransferTransactionData::Signing {
            kind,
            asset,
            chain_id,
        }
    }

    /// Transfer kind
    pub fn kind(&self) -> TransferKind {
        match self {
            PartialTransferTransactionData::Signing { kind, .. } => *kind,
            PartialTransferTransactionData::Recorded(tx) => tx.kind,
        }
    }

    /// Current timeline step
    pub fn current_step(&self) -> TransferStep {
        match self {
            PartialTransferTransactionData::Signing { .. } => TransferStep::Sign,
            PartialTransferTransactionData::Recorded(tx) => tx.current_step,
        }
    }

    /// Transferred asset
    pub fn asset(&self) -> &Asset {
        match self {
            PartialTransferTransactionData::Signing { asset, .. } => asset,
            PartialTransferTransactionData::Recorded(tx) => &tx.asset,
        }
    }

    /// Chain ID
    pub fn chain_id(&self) -> &ChainId {
        match self {
            PartialTransferTransactionData::Signing { chain_id, .. } => chain_id,
            PartialTransferTransactionData::Recorded(tx) => &tx.chain_id,
        }
    }

    /// Hash, once the signing service has responded
    pub fn hash(&self) -> Option<&str> {
        self.record().map(|tx| tx.hash.as_str())
    }

    /// Full record, once available
    pub fn record(&self) -> Option<&TransferTransactionData> {
        match self {
            PartialTransferTransactionData::Signing { .. } => None,
            PartialTransferTransactionData::Recorded(tx) => Some(tx),
        }
    }
}

impl From<TransferTransactionData> for PartialTransferTransactionData {
    fn from(tx: TransferTransactionData) -> Self {
        PartialTransferTransactionData::Recorded(tx)
    }
}
