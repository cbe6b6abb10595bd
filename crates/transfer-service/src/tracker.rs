//! Post-submission record reconciliation
//!
//! After a transfer has a hash, the transaction store owns its progress
//! (confirmation, failure). The tracker replaces the displayed record with
//! the stored one whenever the store changes.

use crate::logging::TransferEventLogger;
use crate::store::{ListenerId, StoreListener, TransactionStore};
use nam_transfer_core::PartialTransferTransactionData;
use parking_lot::RwLock;
use std::sync::Arc;

/// The single displayed-transaction slot
pub type TransactionSlot = Arc<RwLock<Option<PartialTransferTransactionData>>>;

/// Keeps the displayed record in sync with the transaction store
#[derive(Clone)]
pub struct TransactionLifecycleTracker {
    slot: TransactionSlot,
    logger: Arc<TransferEventLogger>,
}

impl TransactionLifecycleTracker {
    /// Track `slot`
    pub fn new(slot: TransactionSlot, logger: Arc<TransferEventLogger>) -> Self {
        Self { slot, logger }
    }

    /// Replace the displayed record with the stored version of the same hash.
    ///
    /// No lookup happens while the record has no hash yet. Returns `true`
    /// when the displayed record changed.
    pub fn reconcile(&self, store: &dyn TransactionStore) -> bool {
        let hash = match self.slot.read().as_ref().and_then(|tx| tx.hash()) {
            Some(hash) => hash.to_string(),
            None => return false,
        };

        let Some(stored) = store.find_by_hash(&hash) else {
            return false;
        };

        let mut slot = self.slot.write();
        // The slot may have been cleared or resubmitted since the read above
        let still_displayed = slot.as_ref().and_then(|tx| tx.hash()) == Some(hash.as_str());
        if !still_displayed || slot.as_ref().and_then(|tx| tx.record()) == Some(&stored) {
            return false;
        }

        let step = stored.current_step;
        *slot = Some(PartialTransferTransactionData::from(stored));
        drop(slot);

        self.logger.log_record_replaced(&hash, step);
        true
    }

    /// Register with `store` so every change triggers [`Self::reconcile`]
    pub fn attach(&self, store: &dyn TransactionStore) -> ListenerId {
        let tracker = self.clone();
        let listener: StoreListener = Arc::new(move |store: &dyn TransactionStore| {
            tracker.reconcile(store);
        });
        store.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTransactionStore;
    use chrono::Utc;
    use nam_transfer_core::{
        Address, Asset, ChainId, BigDecimal, TransferKind, TransferStatus, TransferStep,
        TransferTransactionData,
    };

    fn record(hash: &str) -> TransferTransactionData {
        let now = Utc::now();
        TransferTransactionData {
            kind: TransferKind::ShieldedToTransparent,
            asset: Asset::new("NAM", "Namada"),
            chain_id: ChainId::new("local.1").unwrap(),
            hash: hash.to_string(),
            wrapper_hash: "W".to_string(),
            current_step: TransferStep::WaitingConfirmation,
            status: TransferStatus::Pending,
            rpc_url: "http://127.0.0.1:26657".to_string(),
            source_address: Address::new("znam1src"),
            destination_address: Address::new("tnam1dst"),
            display_amount: BigDecimal::from(10),
            memo: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn tracker() -> (TransactionLifecycleTracker, TransactionSlot) {
        let slot: TransactionSlot = Arc::new(RwLock::new(None));
        let tracker =
            TransactionLifecycleTracker::new(Arc::clone(&slot), Arc::new(TransferEventLogger::new()));
        (tracker, slot)
    }

    #[test]
    fn test_replaces_matching_record() {
        let (tracker, slot) = tracker();
        let store = MemoryTransactionStore::new();
        *slot.write() = Some(record("H1").into());

        let confirmed = record("H1").complete(TransferStatus::Success, None);
        store.store_transaction(confirmed.clone()).unwrap();

        assert!(tracker.reconcile(&store));
        assert_eq!(slot.read().as_ref().unwrap().record(), Some(&confirmed));
        // Second pass finds nothing new
        assert!(!tracker.reconcile(&store));
    }

    #[test]
    fn test_ignores_signing_placeholder() {
        let (tracker, slot) = tracker();
        let store = MemoryTransactionStore::new();
        store.store_transaction(record("H1")).unwrap();
        *slot.write() = Some(PartialTransferTransactionData::signing(
            TransferKind::ShieldedToTransparent,
            Asset::new("NAM", "Namada"),
            ChainId::new("local.1").unwrap(),
        ));

        assert!(!tracker.reconcile(&store));
        assert!(slot.read().as_ref().unwrap().hash().is_none());
    }

    #[test]
    fn test_ignores_unknown_hash_and_empty_slot() {
        let (tracker, slot) = tracker();
        let store = MemoryTransactionStore::new();
        store.store_transaction(record("OTHER")).unwrap();

        assert!(!tracker.reconcile(&store));

        *slot.write() = Some(record("H1").into());
        assert!(!tracker.reconcile(&store));
        assert_eq!(slot.read().as_ref().unwrap().hash(), Some("H1"));
    }

    #[test]
    fn test_attach_reacts_to_store_changes() {
        let (tracker, slot) = tracker();
        let store = MemoryTransactionStore::new();
        tracker.attach(&store);
        *slot.write() = Some(record("H1").into());

        store
            .store_transaction(record("H1").complete(TransferStatus::Error, Some("rejected".into())))
            .unwrap();

        let displayed = slot.read().clone().unwrap();
        assert_eq!(displayed.current_step(), TransferStep::Complete);
        assert_eq!(
            displayed.record().unwrap().error_message.as_deref(),
            Some("rejected")
        );
    }
}
