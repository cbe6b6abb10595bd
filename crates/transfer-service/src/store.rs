//! Transaction store
//!
//! The store is the source of truth for a transfer after submission. Writers
//! upsert records by hash; every write notifies the registered listeners with
//! the store itself so they can look up what changed.

use nam_transfer_core::{Result, TransferTransactionData};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked after every store change
pub type StoreListener = Arc<dyn Fn(&dyn TransactionStore) + Send + Sync>;

/// Handle returned by [`TransactionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Persistent transaction storage
pub trait TransactionStore: Send + Sync {
    /// Look up a record by inner transaction hash
    fn find_by_hash(&self, hash: &str) -> Option<TransferTransactionData>;

    /// Insert or replace a record (keyed by hash) and notify listeners
    fn store_transaction(&self, record: TransferTransactionData) -> Result<()>;

    /// All records, oldest first
    fn transactions(&self) -> Vec<TransferTransactionData>;

    /// Register a change listener
    fn subscribe(&self, listener: StoreListener) -> ListenerId;

    /// Remove a change listener
    fn unsubscribe(&self, id: ListenerId);
}

/// In-process store backed by a vector
#[derive(Default)]
pub struct MemoryTransactionStore {
    records: RwLock<Vec<TransferTransactionData>>,
    listeners: RwLock<Vec<(ListenerId, StoreListener)>>,
    next_listener: AtomicU64,
}

impl MemoryTransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    fn notify(&self) {
        // Listeners may call back into the store, so no lock is held here.
        let listeners: Vec<StoreListener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        let store: &dyn TransactionStore = self;
        for listener in listeners {
            listener(store);
        }
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn find_by_hash(&self, hash: &str) -> Option<TransferTransactionData> {
        self.records.read().iter().find(|tx| tx.hash == hash).cloned()
    }

    fn store_transaction(&self, record: TransferTransactionData) -> Result<()> {
        {
            let mut records = self.records.write();
            match records.iter_mut().find(|tx| tx.hash == record.hash) {
                Some(existing) => {
                    tracing::debug!(hash = %record.hash, "Replacing stored transaction");
                    *existing = record;
                }
                None => {
                    tracing::debug!(hash = %record.hash, "Storing new transaction");
                    records.push(record);
                }
            }
        }

        self.notify();
        Ok(())
    }

    fn transactions(&self) -> Vec<TransferTransactionData> {
        self.records.read().clone()
    }

    fn subscribe(&self, listener: StoreListener) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.write().retain(|(listener_id, _)| *listener_id != id);
    }
}
