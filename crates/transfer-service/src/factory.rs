//! Transaction record creation
//!
//! Turns a signing-service response into the records kept by the
//! transaction store.

use chrono::Utc;
use nam_transfer_core::{
    Asset, ChainId, Memo, TransferInputs, TransferKind, TransferStatus, TransferStep,
    TransferTransactionData, TxResponse,
};

/// Everything needed to describe one broadcast
#[derive(Debug, Clone)]
pub struct RecordRequest {
    /// Transfer kind
    pub kind: TransferKind,
    /// Transferred asset
    pub asset: Asset,
    /// Chain ID
    pub chain_id: ChainId,
    /// RPC endpoint used for the broadcast
    pub rpc_url: String,
    /// Inputs the parameters were built from
    pub inputs: TransferInputs,
    /// Signing service response
    pub response: TxResponse,
    /// Attached memo
    pub memo: Option<Memo>,
}

/// Creates transaction records from a broadcast
pub trait TransactionRecordFactory: Send + Sync {
    /// Records for the inner transactions of the response, possibly none
    fn create_transfer_data(&self, request: &RecordRequest) -> Vec<TransferTransactionData>;
}

/// Default factory: one pending record per inner transaction hash
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseRecordFactory;

impl ResponseRecordFactory {
    /// Create new factory
    pub fn new() -> Self {
        Self
    }
}

impl TransactionRecordFactory for ResponseRecordFactory {
    fn create_transfer_data(&self, request: &RecordRequest) -> Vec<TransferTransactionData> {
        let now = Utc::now();
        request
            .response
            .inner_tx_hashes
            .iter()
            .map(|hash| TransferTransactionData {
                kind: request.kind,
                asset: request.asset.clone(),
                chain_id: request.chain_id.clone(),
                hash: hash.clone(),
                wrapper_hash: request.response.hash.clone(),
                current_step: TransferStep::WaitingConfirmation,
                status: TransferStatus::Pending,
                rpc_url: request.rpc_url.clone(),
                source_address: request.inputs.source.clone(),
                destination_address: request.inputs.target.clone(),
                display_amount: request.inputs.amount.clone(),
                memo: request.memo.clone(),
                error_message: None,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }
}
