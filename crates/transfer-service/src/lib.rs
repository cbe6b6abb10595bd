//! Namada transfer orchestration service
//!
//! Drives a transfer from form state to a persisted transaction record:
//! picks the variant for the current transfer kind, checks submission
//! preconditions, invokes the signing/broadcast collaborator and keeps the
//! displayed record in sync with the transaction store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod executor;
pub mod factory;
pub mod form;
pub mod logging;
pub mod registry;
pub mod store;
pub mod tracker;

pub use config::{LogConfig, ServiceConfig};
pub use controller::{SubmissionController, SubmissionMonitor, SubmissionState};
pub use executor::TransferExecutor;
pub use factory::{RecordRequest, ResponseRecordFactory, TransactionRecordFactory};
pub use form::{Account, AccountType, TransferContext, TransferForm, TransferSnapshot};
pub use logging::{init_logging, TransferEvent, TransferEventLogger};
pub use registry::{TransferVariant, TransferVariantRegistry, TxNotification};
pub use store::{ListenerId, MemoryTransactionStore, StoreListener, TransactionStore};
pub use tracker::{TransactionLifecycleTracker, TransactionSlot};

pub use nam_transfer_core::{Error, Result};
