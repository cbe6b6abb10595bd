//! Transfer submission state machine
//!
//! `Idle → AwaitingPreconditions → Signing → Completed`, with every failure
//! converging on one recovery path: the displayed record is cleared, the
//! error text is kept for display and the controller is ready for a fresh
//! attempt.

use crate::factory::{RecordRequest, TransactionRecordFactory};
use crate::form::TransferSnapshot;
use crate::logging::TransferEventLogger;
use crate::registry::{TransferVariant, TransferVariantRegistry};
use crate::store::{ListenerId, TransactionStore};
use crate::tracker::{TransactionLifecycleTracker, TransactionSlot};
use nam_transfer_core::{
    AssetWithAmount, ChainId, Error, ErrorCategory, FeeCalculator, Memo,
    PartialTransferTransactionData, Result, TransactionFee, TransferKind,
    TransferTransactionData,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Submission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionState {
    /// Nothing submitted, form editable
    Idle,
    /// Checking preconditions
    AwaitingPreconditions,
    /// Waiting for the signing service
    Signing,
    /// Record produced and stored
    Completed,
    /// Signing service answered with nothing usable
    Failed,
}

/// Read-only view of a controller, usable while a submission is running
#[derive(Clone)]
pub struct SubmissionMonitor {
    registry: TransferVariantRegistry,
    slot: TransactionSlot,
    state: Arc<RwLock<SubmissionState>>,
}

impl SubmissionMonitor {
    /// Current state
    pub fn state(&self) -> SubmissionState {
        *self.state.read()
    }

    /// Displayed transaction record
    pub fn transaction(&self) -> Option<PartialTransferTransactionData> {
        self.slot.read().clone()
    }

    /// Whether a signing call is outstanding
    pub fn is_pending(&self) -> bool {
        self.state() == SubmissionState::Signing || self.registry.iter().any(|v| v.is_pending())
    }
}

/// Puts the controller back to `Idle` when a submission future is dropped
/// while the signing service still holds it
struct SigningGuard {
    kind: TransferKind,
    slot: TransactionSlot,
    state: Arc<RwLock<SubmissionState>>,
    logger: Arc<TransferEventLogger>,
    armed: bool,
}

impl SigningGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SigningGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut slot = self.slot.write();
            if slot.as_ref().is_some_and(|tx| tx.record().is_none()) {
                *slot = None;
            }
        }
        *self.state.write() = SubmissionState::Idle;
        self.logger.log_abandoned(self.kind);
    }
}

/// Drives one transfer at a time from snapshot to stored record
pub struct SubmissionController {
    registry: TransferVariantRegistry,
    factory: Arc<dyn TransactionRecordFactory>,
    store: Arc<dyn TransactionStore>,
    slot: TransactionSlot,
    state: Arc<RwLock<SubmissionState>>,
    error_message: String,
    fees: FeeCalculator,
    logger: Arc<TransferEventLogger>,
    subscription: ListenerId,
}

impl SubmissionController {
    /// Create new controller and start tracking `store`
    pub fn new(
        registry: TransferVariantRegistry,
        factory: Arc<dyn TransactionRecordFactory>,
        store: Arc<dyn TransactionStore>,
    ) -> Self {
        Self::with_logger(registry, factory, store, Arc::new(TransferEventLogger::new()))
    }

    /// Create new controller reporting to `logger`
    pub fn with_logger(
        registry: TransferVariantRegistry,
        factory: Arc<dyn TransactionRecordFactory>,
        store: Arc<dyn TransactionStore>,
        logger: Arc<TransferEventLogger>,
    ) -> Self {
        let slot: TransactionSlot = Arc::new(RwLock::new(None));
        let tracker = TransactionLifecycleTracker::new(Arc::clone(&slot), Arc::clone(&logger));
        let subscription = tracker.attach(store.as_ref());

        Self {
            registry,
            factory,
            store,
            slot,
            state: Arc::new(RwLock::new(SubmissionState::Idle)),
            error_message: String::new(),
            fees: FeeCalculator::new(),
            logger,
            subscription,
        }
    }

    /// Current state
    pub fn state(&self) -> SubmissionState {
        *self.state.read()
    }

    fn set_state(&self, state: SubmissionState) {
        *self.state.write() = state;
    }

    /// Displayed transaction record
    pub fn transaction(&self) -> Option<PartialTransferTransactionData> {
        self.slot.read().clone()
    }

    /// Handle for watching state, record and pending flag from elsewhere
    pub fn monitor(&self) -> SubmissionMonitor {
        SubmissionMonitor {
            registry: self.registry.clone(),
            slot: Arc::clone(&self.slot),
            state: Arc::clone(&self.state),
        }
    }

    /// Message of the last failure, empty when none
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Whether a signing call is outstanding
    pub fn is_pending(&self) -> bool {
        self.state() == SubmissionState::Signing || self.registry.iter().any(|v| v.is_pending())
    }

    /// Variant registry
    pub fn registry(&self) -> &TransferVariantRegistry {
        &self.registry
    }

    /// Event logger
    pub fn logger(&self) -> &Arc<TransferEventLogger> {
        &self.logger
    }

    /// Fee for the snapshot's asset and the active variant's gas config
    pub fn transaction_fee(&self, snapshot: &TransferSnapshot) -> Option<TransactionFee> {
        let gas_config = self.registry.variant(snapshot.kind()).gas_config();
        self.fees
            .compute_fee(snapshot.selected_asset.as_ref(), gas_config.as_ref())
    }

    /// Dismiss the displayed record and return to `Idle`
    pub fn clear(&mut self) {
        *self.slot.write() = None;
        self.error_message.clear();
        self.set_state(SubmissionState::Idle);
    }

    /// Submit a transfer built from `snapshot`.
    ///
    /// Fails with [`Error::TransactionInProgress`] while a record is still
    /// displayed; call [`Self::clear`] first. Any other failure clears the
    /// record and is kept as [`Self::error_message`]. Dropping the returned
    /// future while it waits for the signing service returns the controller
    /// to `Idle` with no record.
    pub async fn submit(
        &mut self,
        snapshot: &TransferSnapshot,
        memo: Option<Memo>,
    ) -> Result<TransferTransactionData> {
        if self.slot.read().is_some() {
            return Err(Error::TransactionInProgress);
        }

        self.error_message.clear();
        self.set_state(SubmissionState::AwaitingPreconditions);

        let kind = snapshot.kind();
        self.logger.log_submission_started(kind);

        match self.run(kind, snapshot, memo).await {
            Ok(record) => Ok(record),
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    async fn run(
        &mut self,
        kind: TransferKind,
        snapshot: &TransferSnapshot,
        memo: Option<Memo>,
    ) -> Result<TransferTransactionData> {
        let variant = Arc::clone(self.registry.variant(kind));
        let (chain_id, asset) = check_preconditions(snapshot, &variant)?;

        self.set_state(SubmissionState::Signing);
        *self.slot.write() = Some(PartialTransferTransactionData::signing(
            kind,
            asset.asset.clone(),
            chain_id.clone(),
        ));
        self.logger.log_signing(kind, variant.event_type());
        let guard = SigningGuard {
            kind,
            slot: Arc::clone(&self.slot),
            state: Arc::clone(&self.state),
            logger: Arc::clone(&self.logger),
            armed: true,
        };

        let inputs = snapshot.inputs();
        let response = variant.execute(&inputs, memo.as_ref()).await;
        guard.disarm();
        let response = response?.ok_or(Error::InvalidTransactionResponse)?;

        let request = RecordRequest {
            kind,
            asset: asset.asset,
            chain_id,
            rpc_url: snapshot.rpc_url.clone(),
            inputs,
            response,
            memo,
        };
        let mut records = self.factory.create_transfer_data(&request);
        let record = match records.len() {
            0 => return Err(Error::EmptyTransferData),
            1 => records.remove(0),
            n => return Err(Error::BatchedTransferData(n)),
        };

        self.set_state(SubmissionState::Completed);
        *self.slot.write() = Some(record.clone().into());
        self.store.store_transaction(record.clone())?;

        self.logger.log_completed(kind, &record.hash);
        Ok(record)
    }

    fn fail(&mut self, err: &Error) {
        *self.slot.write() = None;
        self.error_message = err.to_string();

        if err.is_precondition() {
            self.logger.log_precondition_failed(err);
        } else {
            self.logger.log_failed(err);
        }

        self.set_state(match err.category() {
            ErrorCategory::Response => SubmissionState::Failed,
            _ => SubmissionState::Idle,
        });
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

/// First unmet precondition, in the order the form presents them
fn check_preconditions(
    snapshot: &TransferSnapshot,
    variant: &TransferVariant,
) -> Result<(ChainId, AssetWithAmount)> {
    if snapshot.source_address.is_none() {
        return Err(Error::SourceAddressUndefined);
    }
    let chain_id = snapshot.chain_id.clone().ok_or(Error::ChainIdUndefined)?;
    let asset = snapshot
        .selected_asset
        .clone()
        .ok_or(Error::NoAssetSelected)?;
    if variant.gas_config().is_none() {
        return Err(Error::NoGasConfig);
    }
    Ok((chain_id, asset))
}
