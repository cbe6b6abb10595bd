//! Signing/broadcast collaborator
//!
//! One executor stands behind each transfer variant. It owns transaction
//! construction, signing, broadcasting and any retries; this crate only
//! decides which executor to call and how to read its answer.

use async_trait::async_trait;
use nam_transfer_core::{GasConfig, Memo, Result, TransferParams, TxResponse};

/// Builds, signs and broadcasts one kind of transfer
#[async_trait]
pub trait TransferExecutor: Send + Sync {
    /// Estimate gas for a transfer with these parameters
    async fn estimate_gas(&self, params: &TransferParams) -> Result<GasConfig>;

    /// Construct, sign and broadcast the transfer.
    ///
    /// `Ok(None)` means the service produced no response.
    async fn execute(&self, params: &TransferParams, memo: Option<&Memo>)
        -> Result<Option<TxResponse>>;
}
